use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

pub const TEST_BINARY: &str = "test-pwa-icons";

/// Variables the binary reads settings from.
pub const ENV_VARS: &[&str] = &[
    "PWA_ICONS_CONFIG_FILE",
    "PWA_ICONS_LOGO",
    "PWA_ICONS_OUTPUT_DIR",
    "PWA_ICONS_BACKGROUND",
    "PWA_ICONS_SIZES",
    "PWA_ICONS_ON_ERROR",
];

/// A temporary project directory the binary runs in.
pub struct Workdir {
    dir: tempfile::TempDir,
}

impl Workdir {
    pub fn new() -> Self {
        Workdir {
            dir: tempfile::TempDir::new().unwrap(),
        }
    }

    fn prepare(&self, name: impl AsRef<Path>) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        path
    }

    pub fn with_file(self, name: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        std::fs::write(self.prepare(name), contents).unwrap();
        self
    }

    /// Writes an opaque single-color logo.
    pub fn with_logo(self, name: &str, width: u32, height: u32, color: Rgb<u8>) -> Self {
        RgbImage::from_pixel(width, height, color)
            .save(self.prepare(name))
            .unwrap();
        self
    }

    /// Writes a logo that is transparent except for an opaque square in the middle.
    pub fn with_transparent_logo(self, name: &str, side: u32) -> Self {
        let mut logo = RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 0]));
        for x in side / 4..side * 3 / 4 {
            for y in side / 4..side * 3 / 4 {
                logo.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        logo.save(self.prepare(name)).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(path)
    }

    pub fn open_image(&self, path: impl AsRef<Path>) -> image::DynamicImage {
        image::open(self.join(path)).unwrap()
    }
}

impl Default for Workdir {
    fn default() -> Self {
        Self::new()
    }
}
