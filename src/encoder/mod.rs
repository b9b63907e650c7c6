use crate::processing::types::Quality;
use anyhow::Result;
use async_trait::async_trait;
use image::DynamicImage;

pub mod webp_encoder;

/// 画像エンコードバックエンドのトレイト
///
/// 呼び出し間で可変状態を共有しないこと（複数タスクから同時に呼ばれる）。
#[async_trait]
pub trait ImageEncoderBackend: Send + Sync {
    /// 画像をエンコードしてバイト列を返す
    async fn encode(&self, image: DynamicImage, quality: Quality) -> Result<Vec<u8>>;

    /// 可逆圧縮かどうか（trueの場合qualityは使われない）
    fn is_lossless(&self) -> bool {
        false
    }
}
