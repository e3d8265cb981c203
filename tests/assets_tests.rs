use std::path::PathBuf;

use party_pascal::assets::{AssetLoader, ImageAssets};
use party_pascal::core::Rgba;

/// Fresh directory under the system temp dir
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("party-pascal-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(dir.join("icons")).unwrap();
    dir
}

fn write_png(path: &PathBuf, width: u32, height: u32, color: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(color));
    img.save(path).unwrap();
}

#[test]
fn test_decodes_png_from_asset_root() {
    let dir = scratch_dir("decode");
    write_png(&dir.join("icons/play.png"), 8, 4, [200, 10, 20, 255]);

    let mut assets = ImageAssets::new(&dir);
    let img = assets.image("icons/play.png");
    assert_eq!(img.dimensions(), (8, 4));
    assert_eq!(img.get(7, 3), Some(Rgba::rgb(200, 10, 20)));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_fit_resamples_decoded_image() {
    let dir = scratch_dir("fit");
    write_png(&dir.join("icons/exit.png"), 100, 50, [0, 0, 255, 255]);

    let mut assets = ImageAssets::new(&dir);
    let img = assets.image_fit("icons/exit.png", 44, 44);
    assert_eq!(img.dimensions(), (44, 44));
    assert_eq!(img.get(20, 20), Some(Rgba::rgb(0, 0, 255)));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_keeps_transparency() {
    let dir = scratch_dir("alpha");
    write_png(&dir.join("icons/ghost.png"), 2, 2, [255, 255, 255, 0]);

    let mut assets = ImageAssets::new(&dir);
    assert_eq!(assets.image("icons/ghost.png").get(0, 0).map(|c| c.a), Some(0));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_corrupt_file_gives_placeholder() {
    let dir = scratch_dir("corrupt");
    std::fs::write(dir.join("icons/broken.png"), b"not a png").unwrap();

    let mut assets = ImageAssets::new(&dir).with_placeholder(Rgba::rgb(5, 5, 5));
    let img = assets.image_fit("icons/broken.png", 10, 10);
    assert_eq!(img.dimensions(), (10, 10));
    assert_eq!(img.get(9, 9), Some(Rgba::rgb(5, 5, 5)));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_unparseable_font_gives_bitmap_fallback() {
    let dir = scratch_dir("font");
    std::fs::create_dir_all(dir.join("fonts")).unwrap();
    std::fs::write(dir.join("fonts/ui.ttf"), b"not a font").unwrap();

    let mut assets = ImageAssets::new(&dir);
    let font = assets.font("fonts/ui.ttf", 32);
    assert!(font.is_fallback());

    let label = font.render("VOLTAR", Rgba::WHITE);
    assert_eq!(label.dimensions(), (6 * 32, 32));

    std::fs::remove_dir_all(&dir).ok();
}
