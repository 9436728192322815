//! CLI integration tests for `sprite5 export`, `favicon` and `data-url`.

use std::path::{Path, PathBuf};
use std::process::Command;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

fn sprite5_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sprite5"))
}

fn run(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(sprite5_binary())
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env("XDG_DATA_HOME", dir.join("xdg-data"))
        .args(args)
        .output()
        .expect("Failed to execute sprite5");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_export_png_named_by_token() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("out");
    let (_, stderr, ok) = run(dir.path(), &["export", "0x112A2A1", "-o", out.to_str().unwrap()]);
    assert!(ok, "stderr: {}", stderr);

    let path = out.join("0x112A2A1.png");
    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (5, 5));
    // 0x112A2A1 has (0,0) painted and (1,0) empty
    assert_eq!(image.get_pixel(0, 0)[3], 255);
    assert_eq!(image.get_pixel(1, 0)[3], 0);
}

#[test]
fn test_export_png_scaled_and_dark() {
    let dir = tempfile::TempDir::new().unwrap();
    let (_, _, ok) = run(dir.path(), &["--dark", "export", "0x1", "--scale", "3", "-o", "."]);
    assert!(ok);

    let image = image::open(dir.path().join("0x1.png")).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (15, 15));
    assert_eq!(image.get_pixel(2, 2).0, [255, 255, 255, 255]);
    assert_eq!(image.get_pixel(3, 0).0, [255, 255, 255, 0]);
}

#[test]
fn test_export_svg() {
    let dir = tempfile::TempDir::new().unwrap();
    let (_, _, ok) = run(dir.path(), &["export", "0x1", "--format", "svg", "-o", "."]);
    assert!(ok);

    let svg = std::fs::read_to_string(dir.path().join("0x1.svg")).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 5 5""#));
    assert!(svg.contains(r#"<path d="M0 0h1v1H0z"/>"#));
    assert!(!svg.contains("fill="));
}

#[test]
fn test_export_scale_from_config() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("sprite5.toml"), "[render]\nscale = 2\n").unwrap();
    let (_, _, ok) = run(dir.path(), &["export", "0x1", "-o", "."]);
    assert!(ok);

    let image = image::open(dir.path().join("0x1.png")).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (10, 10));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("sprite5.toml"), "[render]\nscale = 0\n").unwrap();
    let (_, stderr, ok) = run(dir.path(), &["export", "0x1", "-o", "."]);
    assert!(!ok);
    assert!(stderr.contains("render.scale"));
}

#[test]
fn test_favicon_dark_fill() {
    let dir = tempfile::TempDir::new().unwrap();
    let (stdout, _, ok) = run(dir.path(), &["--dark", "favicon", "0x1"]);
    assert!(ok);

    let payload = stdout.trim().strip_prefix("data:image/svg+xml;base64,").unwrap();
    let svg = String::from_utf8(STANDARD.decode(payload).unwrap()).unwrap();
    assert!(svg.contains(r#"fill="white""#));
}

#[test]
fn test_data_url_one_line_per_token() {
    let dir = tempfile::TempDir::new().unwrap();
    let (stdout, _, ok) = run(dir.path(), &["data-url", "0x1FFFFFF", "0x1", "0x0"]);
    assert!(ok);

    let urls: Vec<&str> = stdout.lines().collect();
    assert_eq!(urls.len(), 3);
    for url in &urls {
        assert!(url.starts_with("data:image/png;base64,"));
    }

    // The second image must not carry paint from the first
    let png = STANDARD.decode(urls[1].trim_start_matches("data:image/png;base64,")).unwrap();
    let image = image::load_from_memory(&png).unwrap().to_rgba8();
    let opaque = image.pixels().filter(|p| p[3] == 255).count();
    assert_eq!(opaque, 1);
}

#[test]
fn test_data_url_rejects_bad_token() {
    let dir = tempfile::TempDir::new().unwrap();
    let (stdout, stderr, ok) = run(dir.path(), &["data-url", "0x1", "nope"]);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("nope"));
}
