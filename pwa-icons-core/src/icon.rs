use crate::color::HexColor;
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops::{self, FilterType},
    DynamicImage, ImageError, ImageReader, RgbImage, Rgba, RgbaImage,
};
use std::{
    io,
    num::NonZeroU32,
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("logo {} not found", .0.display())]
    LogoNotFound(PathBuf),
    #[error("failed to load logo {}", .0.display())]
    LoadLogo(PathBuf, #[source] ImageError),
    #[error("failed to create directory {}", .0.display())]
    CreateDir(PathBuf, #[source] io::Error),
    #[error("failed to encode {}", .0.display())]
    Encode(PathBuf, #[source] ImageError),
    #[error("failed to write {}", .0.display())]
    Write(PathBuf, #[source] io::Error),
}

/// Where the scaled logo ends up on the canvas.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Largest logo dimension for an icon: 80% of its side, rounded down.
pub fn logo_bound(size: NonZeroU32) -> u32 {
    (u64::from(size.get()) * 4 / 5) as u32
}

/// Shrinks `width × height` so neither side exceeds `bound`, keeping the aspect ratio.
/// Images that already fit are never enlarged.
pub fn fit_within(width: u32, height: u32, bound: u32) -> (u32, u32) {
    if width <= bound && height <= bound {
        return (width, height);
    }
    if width > height {
        (bound, scale_minor(width, height, bound, Rounding::PerPixel))
    } else {
        (scale_minor(height, width, bound, Rounding::Absolute), bound)
    }
}

/// How the rounding error of a scaled side is weighed when choosing floor or ceil.
#[derive(Debug, Clone, Copy)]
enum Rounding {
    /// error relative to the candidate length; used for wide images
    PerPixel,
    /// plain error; used for tall and square images
    Absolute,
}

// Picks floor or ceil of `minor * bound / major`, whichever keeps major:minor
// closer to the original ratio; ties go to floor.
fn scale_minor(major: u32, minor: u32, bound: u32, rounding: Rounding) -> u32 {
    let (major, minor, bound) = (u128::from(major), u128::from(minor), u128::from(bound));
    let exact = minor * bound;
    let floor = exact / major;
    if floor == 0 {
        return 1;
    }
    if exact % major == 0 {
        return floor as u32;
    }
    let ceil = floor + 1;
    let error = |n: u128| (major * n).abs_diff(bound * minor);
    let floor_wins = match rounding {
        // error(n) / n compared without division
        Rounding::PerPixel => error(floor) * ceil <= error(ceil) * floor,
        Rounding::Absolute => error(floor) <= error(ceil),
    };
    if floor_wins {
        floor as u32
    } else {
        ceil as u32
    }
}

/// Computes the centered placement of a `logo_width × logo_height` logo on an icon of
/// the given size, or `None` if the icon is too small to hold any logo.
pub fn place_logo(size: NonZeroU32, logo_width: u32, logo_height: u32) -> Option<Placement> {
    let bound = logo_bound(size);
    if bound == 0 || logo_width == 0 || logo_height == 0 {
        return None;
    }
    let (width, height) = fit_within(logo_width, logo_height, bound);
    let side = size.get();
    Some(Placement {
        x: (side - width) / 2,
        y: (side - height) / 2,
        width,
        height,
    })
}

/// Composites an image with an alpha channel onto an opaque background of the same size.
/// Images without alpha come back as plain RGB.
pub fn flatten(image: &DynamicImage, background: HexColor) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }
    let [red, green, blue] = background.to_rgb();
    let mut canvas =
        RgbaImage::from_pixel(image.width(), image.height(), Rgba([red, green, blue, 255]));
    imageops::overlay(&mut canvas, &image.to_rgba8(), 0, 0);
    DynamicImage::ImageRgba8(canvas).to_rgb8()
}

/// Renders one icon: the flattened logo scaled into 80% of the canvas and centered on a
/// solid background.
pub fn compose(logo: &DynamicImage, size: NonZeroU32, background: HexColor) -> RgbImage {
    let side = size.get();
    let mut canvas = RgbImage::from_pixel(side, side, background.into());
    let Some(placement) = place_logo(size, logo.width(), logo.height()) else {
        tracing::debug!("{}x{} icon has no room for a logo", side, side);
        return canvas;
    };

    let flat = flatten(logo, background);
    let scaled = if flat.dimensions() == (placement.width, placement.height) {
        flat
    } else {
        imageops::resize(
            &flat,
            placement.width,
            placement.height,
            FilterType::Lanczos3,
        )
    };
    imageops::replace(
        &mut canvas,
        &scaled,
        i64::from(placement.x),
        i64::from(placement.y),
    );
    canvas
}

pub fn load_logo(path: &Path) -> Result<DynamicImage, GenerateError> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GenerateError::LogoNotFound(path.to_owned()),
            _ => GenerateError::LoadLogo(path.to_owned(), ImageError::IoError(e)),
        })?;
    reader
        .decode()
        .map_err(|e| GenerateError::LoadLogo(path.to_owned(), e))
}

/// Encodes an image as a maximally compressed PNG and writes it, creating parent
/// directories. Returns the file size in bytes.
pub fn write_png(image: &RgbImage, path: &Path) -> Result<u64, GenerateError> {
    let mut png = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut png, CompressionType::Best, PngFilterType::Adaptive);
    image
        .write_with_encoder(encoder)
        .map_err(|e| GenerateError::Encode(path.to_owned(), e))?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| GenerateError::CreateDir(dir.to_owned(), e))?;
    }
    std::fs::write(path, &png).map_err(|e| GenerateError::Write(path.to_owned(), e))?;
    Ok(png.len() as u64)
}

/// Generates a single icon file from the logo at `logo_path`.
pub fn generate_icon(
    logo_path: &Path,
    size: NonZeroU32,
    output_path: &Path,
    background: HexColor,
) -> Result<u64, GenerateError> {
    let logo = load_logo(logo_path)?;
    tracing::debug!(
        "loaded logo {} ({}x{}, {:?})",
        logo_path.display(),
        logo.width(),
        logo.height(),
        logo.color()
    );
    let icon = compose(&logo, size, background);
    write_png(&icon, output_path)
}
