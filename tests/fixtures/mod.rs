// 統合テスト用のフィクスチャ
#![allow(dead_code)]

use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

/// 1x1の最小PNG
pub const MINIMAL_PNG_DATA: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
    0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
    0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00,
    0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub fn write_png(path: &Path) -> PathBuf {
    fs::write(path, MINIMAL_PNG_DATA).unwrap();
    path.to_path_buf()
}

/// 拡張子に応じた形式でグラデーション画像を保存する
pub fn write_image(path: &Path, width: u32, height: u32) -> PathBuf {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7) as u8, (y * 5) as u8, ((x + y) * 3) as u8])
    });
    img.save(path).unwrap();
    path.to_path_buf()
}

/// デコードできない画像ファイル
pub fn write_corrupted(path: &Path) -> PathBuf {
    fs::write(path, b"NOT_AN_IMAGE").unwrap();
    path.to_path_buf()
}

/// `count` 枚のPNGを作る
pub fn write_pngs(dir: &Path, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| write_png(&dir.join(format!("image{i:02}.png"))))
        .collect()
}

/// 入れ子のディレクトリと画像以外のファイルを含むツリー
///
/// 変換対象は4ファイル
pub fn setup_photo_tree(base: &Path) -> Vec<PathBuf> {
    let trips = base.join("trips");
    let deep = trips.join("2024").join("summer");
    fs::create_dir_all(&deep).unwrap();

    fs::write(base.join("readme.txt"), "not an image").unwrap();
    fs::write(trips.join("notes.json"), r#"{"album": true}"#).unwrap();

    vec![
        write_image(&base.join("cover.jpg"), 16, 12),
        write_png(&base.join("icon.PNG")),
        write_image(&trips.join("map.bmp"), 8, 8),
        write_image(&deep.join("beach.jpeg"), 24, 16),
    ]
}

pub fn webp_for(source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_owned();
    name.push(".webp");
    PathBuf::from(name)
}

/// WebPとして読めるかどうか
pub fn is_webp(path: &Path) -> bool {
    fs::read(path)
        .map(|bytes| image::guess_format(&bytes).ok() == Some(image::ImageFormat::WebP))
        .unwrap_or(false)
}
