// 進捗報告機能

pub mod traits;

#[cfg(test)]
pub mod test_mocks;

// 公開API
pub use traits::*;

#[cfg(test)]
pub use test_mocks::*;
