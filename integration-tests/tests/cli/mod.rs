use crate::{pwa_icons, stderr, stdout};
use image::{GenericImageView, Rgb, Rgba};
use integration_tests::Workdir;
use pwa_icons_core::{color::HexColor, config::Config};
use std::{num::NonZeroU32, path::PathBuf};

const RED: Rgb<u8> = Rgb([255, 0, 0]);
const DEFAULT_SIZES: [u32; 8] = [72, 96, 128, 144, 152, 192, 384, 512];

fn corner_pixels(image: &image::DynamicImage) -> Vec<Rgba<u8>> {
    let (w, h) = image.dimensions();
    vec![
        image.get_pixel(0, 0),
        image.get_pixel(w - 1, 0),
        image.get_pixel(0, h - 1),
        image.get_pixel(w - 1, h - 1),
    ]
}

#[test]
fn should_generate_default_sizes_with_default_settings() {
    let workdir = Workdir::new().with_logo("logo.png", 200, 100, RED);

    let output = pwa_icons(&workdir).assert().success().get_output().clone();

    let stdout = stdout(&output);
    for size in DEFAULT_SIZES {
        let name = format!("icon-{size}x{size}.png");
        let icon = workdir.open_image(PathBuf::from("public/icons").join(&name));
        assert_eq!(icon.dimensions(), (size, size));
        assert!(stdout.contains(&name), "missing {name} in {stdout}");
    }
    assert!(stdout.contains("Background: #316559"));
    assert!(stdout.contains("generated 8 icons"));
}

#[test]
fn should_composite_logo_on_background() {
    let workdir = Workdir::new().with_logo("logo.png", 200, 100, RED);

    pwa_icons(&workdir)
        .args(["--sizes", "192"])
        .assert()
        .success();

    let icon = workdir.open_image("public/icons/icon-192x192.png").to_rgb8();
    let background = Rgb([49, 101, 89]);
    assert_eq!(icon.dimensions(), (192, 192));
    for (x, y) in [(0, 0), (191, 0), (0, 191), (191, 191)] {
        assert_eq!(*icon.get_pixel(x, y), background);
    }
    let logo_columns = (0..192)
        .filter(|&x| *icon.get_pixel(x, 96) != background)
        .count();
    let logo_rows = (0..192)
        .filter(|&y| *icon.get_pixel(96, y) != background)
        .count();
    assert_eq!(logo_columns, 153);
    assert!((76..=77).contains(&logo_rows), "logo is {logo_rows} rows high");
    assert_ne!(*icon.get_pixel(96, 96), background);
}

#[test]
fn should_read_settings_from_config_file() {
    let workdir = Workdir::new()
        .with_logo("assets/brand.png", 64, 64, RED)
        .with_file(
            "pwa-icons.toml",
            //language=TOML
            r##"
            logo = "assets/brand.png"
            output-dir = "static/icons"
            background = "#FFFFFF"
            sizes = [48, 64]
            "##,
        );

    pwa_icons(&workdir).assert().success();

    for size in [48, 64] {
        let icon = workdir.open_image(format!("static/icons/icon-{size}x{size}.png"));
        assert_eq!(icon.dimensions(), (size, size));
        assert!(corner_pixels(&icon)
            .iter()
            .all(|p| *p == Rgba([255, 255, 255, 255])));
    }
    assert!(!workdir.join("public").exists());
}

#[test]
fn should_prefer_flags_over_environment_over_config_file() {
    let workdir = Workdir::new()
        .with_logo("logo.png", 32, 32, RED)
        .with_file("pwa-icons.toml", "sizes = [16]\noutput-dir = \"from-file\"");

    pwa_icons(&workdir)
        .env("PWA_ICONS_SIZES", "24,40")
        .env("PWA_ICONS_OUTPUT_DIR", "from-env")
        .args(["--output-dir", "from-flag"])
        .assert()
        .success();

    assert!(workdir.join("from-flag/icon-24x24.png").is_file());
    assert!(workdir.join("from-flag/icon-40x40.png").is_file());
    assert!(!workdir.join("from-flag/icon-16x16.png").exists());
    assert!(!workdir.join("from-env").exists());
    assert!(!workdir.join("from-file").exists());
}

#[test]
fn should_read_explicit_config_file() {
    let workdir = Workdir::new()
        .with_logo("logo.png", 32, 32, RED)
        .with_file("conf/icons.toml", "sizes = [20]\noutput-dir = \"out\"");

    pwa_icons(&workdir)
        .args(["--config-file", "conf/icons.toml"])
        .assert()
        .success();

    assert!(workdir.join("out/icon-20x20.png").is_file());
}

#[test]
fn should_fail_on_missing_explicit_config_file() {
    let workdir = Workdir::new().with_logo("logo.png", 32, 32, RED);

    let output = pwa_icons(&workdir)
        .args(["--config-file", "missing.toml"])
        .assert()
        .failure()
        .get_output()
        .clone();

    assert!(stderr(&output).contains("missing.toml"));
    assert!(!workdir.join("public").exists());
}

#[test]
fn should_fail_on_invalid_config_file() {
    let workdir = Workdir::new()
        .with_logo("logo.png", 32, 32, RED)
        .with_file("pwa-icons.toml", r#"background = "green""#);

    pwa_icons(&workdir).assert().failure();

    assert!(!workdir.join("public").exists());
}

#[test]
fn should_flatten_transparent_logo() {
    let workdir = Workdir::new().with_transparent_logo("logo.png", 100);

    pwa_icons(&workdir)
        .args(["--sizes", "128", "--background", "#000000"])
        .assert()
        .success();

    let icon = workdir.open_image("public/icons/icon-128x128.png");
    assert!(!icon.color().has_alpha());
    let icon = icon.to_rgb8();
    assert_eq!(*icon.get_pixel(0, 0), Rgb([0, 0, 0]));
    assert_eq!(*icon.get_pixel(64, 64), Rgb([255, 255, 255]));
}

#[test]
fn should_report_every_failure_and_exit_with_error() {
    let workdir = Workdir::new();

    let output = pwa_icons(&workdir)
        .args(["--sizes", "72,96", "--logo", "missing.png"])
        .assert()
        .failure()
        .get_output()
        .clone();

    let stdout = stdout(&output);
    assert!(stdout.contains("icon-72x72.png (72x72): logo missing.png not found"));
    assert!(stdout.contains("icon-96x96.png (96x96): logo missing.png not found"));
    assert!(stderr(&output).contains("2 of 2 icon sizes failed"));
    assert!(!workdir.join("public/icons/icon-72x72.png").exists());
    assert!(!workdir.join("public/icons/icon-96x96.png").exists());
}

#[test]
fn should_stop_at_first_failure_when_aborting() {
    let workdir = Workdir::new();

    let output = pwa_icons(&workdir)
        .args(["--sizes", "72,96", "--logo", "missing.png", "--on-error", "abort"])
        .assert()
        .failure()
        .get_output()
        .clone();

    let stdout = stdout(&output);
    assert!(stdout.contains("icon-72x72.png"));
    assert!(!stdout.contains("icon-96x96.png"));
    assert!(stderr(&output).contains("2 of 2 icon sizes failed"));
}

#[test]
fn should_produce_identical_icons_on_rerun() {
    let workdir = Workdir::new().with_logo("logo.png", 300, 120, RED);

    pwa_icons(&workdir).args(["--sizes", "144"]).assert().success();
    let first = std::fs::read(workdir.join("public/icons/icon-144x144.png")).unwrap();
    pwa_icons(&workdir).args(["--sizes", "144"]).assert().success();
    let second = std::fs::read(workdir.join("public/icons/icon-144x144.png")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn should_print_active_config() {
    let workdir = Workdir::new().with_file("pwa-icons.toml", "sizes = [48]");

    let output = pwa_icons(&workdir)
        .args(["config", "--background", "#abcdef"])
        .assert()
        .success()
        .get_output()
        .clone();

    let config: Config = toml::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        config,
        Config {
            background: HexColor::new(0xab, 0xcd, 0xef),
            sizes: vec![NonZeroU32::new(48).unwrap()],
            ..Default::default()
        }
    );
    assert!(!workdir.join("public").exists());
}

#[test]
fn should_print_version() {
    let workdir = Workdir::new();

    let output = pwa_icons(&workdir)
        .arg("version")
        .assert()
        .success()
        .get_output()
        .clone();

    assert!(stdout(&output).starts_with("pwa-icons: "));
}
