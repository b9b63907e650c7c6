// 変換処理の設定管理

pub mod traits;

#[cfg(test)]
pub mod test_mocks;

// 公開API
pub use traits::*;

#[cfg(test)]
pub use test_mocks::*;
