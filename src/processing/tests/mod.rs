// テストユーティリティとモック実装


pub use mocks::*;
pub use test_data::*;
