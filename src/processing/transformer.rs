// 1ファイル分の変換
//
// 読み込み → デコード → 出力ファイル作成 → エンコード → 書き込み の順に進み、
// 失敗した工程をConvertErrorで返す。呼び出し間で可変状態を共有しない。

use super::error::ConvertError;
use super::types::{ConversionReport, Quality, WorkItem};
use crate::encoder::ImageEncoderBackend;
use crate::image_loader::ImageLoaderBackend;
use async_trait::async_trait;
use mockall::automock;
use std::time::Instant;
use tokio::io::AsyncWriteExt;

/// 変換処理のトレイト
///
/// 異なるパスに対してであれば複数タスクから同時に呼び出してよい。
#[automock]
#[async_trait]
pub trait Transformer: Send + Sync {
    async fn transform(
        &self,
        item: &WorkItem,
        quality: Quality,
    ) -> Result<ConversionReport, ConvertError>;
}

/// ローダーとエンコーダーを組み合わせた変換実装
#[derive(Clone, Debug)]
pub struct ImageTransformer<L, E> {
    loader: L,
    encoder: E,
}

impl<L, E> ImageTransformer<L, E>
where
    L: ImageLoaderBackend,
    E: ImageEncoderBackend,
{
    pub fn new(loader: L, encoder: E) -> Self {
        Self { loader, encoder }
    }
}

#[async_trait]
impl<L, E> Transformer for ImageTransformer<L, E>
where
    L: ImageLoaderBackend,
    E: ImageEncoderBackend,
{
    async fn transform(
        &self,
        item: &WorkItem,
        quality: Quality,
    ) -> Result<ConversionReport, ConvertError> {
        let start_time = Instant::now();
        let source = &item.source_path;
        let destination = &item.destination_path;

        let data = tokio::fs::read(source)
            .await
            .map_err(|source_err| ConvertError::SourceOpen {
                path: source.clone(),
                source: source_err,
            })?;

        let loaded = self
            .loader
            .load_from_bytes(data)
            .await
            .map_err(|e| ConvertError::Decode {
                path: source.clone(),
                source: e,
            })?;

        let mut output = tokio::fs::File::create(destination)
            .await
            .map_err(|e| ConvertError::DestinationCreate {
                path: destination.clone(),
                source: e,
            })?;

        let encoded = self
            .encoder
            .encode(loaded.image, quality)
            .await
            .map_err(|e| ConvertError::Encode {
                path: destination.clone(),
                source: e,
            })?;

        let write_error = |e| ConvertError::Write {
            path: destination.clone(),
            source: e,
        };
        output.write_all(&encoded).await.map_err(write_error)?;
        output.flush().await.map_err(write_error)?;

        Ok(ConversionReport {
            destination_path: destination.clone(),
            quality,
            lossless: self.encoder.is_lossless(),
            source_format: loaded.format,
            bytes_written: encoded.len() as u64,
            image_dimensions: loaded.dimensions,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::webp_encoder::WebpEncoder;
    use crate::image_loader::standard::StandardImageLoader;
    use crate::processing::tests::{create_test_png_file, MINIMAL_PNG_DATA};
    use image::ImageFormat;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn transformer() -> ImageTransformer<StandardImageLoader, WebpEncoder> {
        ImageTransformer::new(StandardImageLoader::new(), WebpEncoder::new())
    }

    #[tokio::test]
    async fn test_transform_success() {
        let (_temp_dir, test_file) = create_test_png_file("test.png");
        let item = WorkItem::new(&test_file, 0);

        let report = transformer()
            .transform(&item, Quality::new(90).unwrap())
            .await
            .unwrap();

        assert_eq!(report.destination_path, item.destination_path);
        assert!(report.destination_path.to_string_lossy().ends_with("test.png.webp"));
        assert_eq!(report.quality.value(), 90);
        assert_eq!(report.image_dimensions, (1, 1));
        assert!(!report.lossless);
        assert_eq!(report.source_format, Some(ImageFormat::Png));

        let written = fs::read(&item.destination_path).unwrap();
        assert_eq!(written.len() as u64, report.bytes_written);
        assert_eq!(image::guess_format(&written).unwrap(), ImageFormat::WebP);
        // 元ファイルは残る
        assert_eq!(fs::read(&test_file).unwrap(), MINIMAL_PNG_DATA);
    }

    #[tokio::test]
    async fn test_transform_jpeg_lossless() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("photo.jpg");
        image::RgbImage::new(12, 7).save(&source).unwrap();

        let transformer = ImageTransformer::new(StandardImageLoader::new(), WebpEncoder::lossless());
        let item = WorkItem::new(&source, 0);
        let report = transformer.transform(&item, Quality::default()).await.unwrap();

        assert!(report.lossless);
        assert_eq!(report.source_format, Some(ImageFormat::Jpeg));
        let decoded = image::open(&item.destination_path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }

    #[tokio::test]
    async fn test_transform_missing_source() {
        let item = WorkItem::new("/nonexistent/file.jpg", 0);
        let error = transformer()
            .transform(&item, Quality::default())
            .await
            .unwrap_err();

        assert!(matches!(error, ConvertError::SourceOpen { .. }));
        assert_eq!(error.path(), PathBuf::from("/nonexistent/file.jpg").as_path());
        assert!(!item.destination_path.exists());
    }

    #[tokio::test]
    async fn test_transform_undecodable_source() {
        let temp_dir = TempDir::new().unwrap();
        let invalid_file = temp_dir.path().join("invalid.jpg");
        fs::write(&invalid_file, b"not a valid image").unwrap();

        let item = WorkItem::new(&invalid_file, 0);
        let error = transformer()
            .transform(&item, Quality::default())
            .await
            .unwrap_err();

        assert!(matches!(error, ConvertError::Decode { .. }));
        assert_eq!(error.step(), "decode");
        // デコード失敗時は出力ファイルを作らない
        assert!(!item.destination_path.exists());
    }

    #[tokio::test]
    async fn test_transform_uncreatable_destination() {
        let (_temp_dir, test_file) = create_test_png_file("test.png");
        let item = WorkItem {
            source_path: test_file,
            destination_path: PathBuf::from("/nonexistent/dir/test.png.webp"),
            sequence_index: 0,
        };

        let error = transformer()
            .transform(&item, Quality::default())
            .await
            .unwrap_err();

        assert!(matches!(error, ConvertError::DestinationCreate { .. }));
        assert!(error.to_string().contains("/nonexistent/dir/test.png.webp"));
    }

    #[tokio::test]
    async fn test_transform_overwrites_identically() {
        let (_temp_dir, test_file) = create_test_png_file("again.png");
        let item = WorkItem::new(&test_file, 0);
        let transformer = transformer();

        transformer.transform(&item, Quality::default()).await.unwrap();
        let first = fs::read(&item.destination_path).unwrap();
        transformer.transform(&item, Quality::default()).await.unwrap();
        let second = fs::read(&item.destination_path).unwrap();

        assert_eq!(first, second);
    }
}
