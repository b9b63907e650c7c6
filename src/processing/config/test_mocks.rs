// テスト用の設定モック実装

use super::traits::ProcessingConfig;
use crate::processing::types::Quality;

pub struct MockProcessingConfig {
    pub max_concurrent: usize,
    pub quality: Quality,
    pub lossless: bool,
    pub enable_progress: bool,
}

impl ProcessingConfig for MockProcessingConfig {
    fn max_concurrent_tasks(&self) -> usize {
        self.max_concurrent
    }

    fn quality(&self) -> Quality {
        self.quality
    }

    fn lossless(&self) -> bool {
        self.lossless
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_config_trait_object() {
        let config = MockProcessingConfig {
            max_concurrent: 4,
            quality: Quality::new(75).unwrap(),
            lossless: true,
            enable_progress: false,
        };

        let config_ref: &dyn ProcessingConfig = &config;
        assert_eq!(config_ref.max_concurrent_tasks(), 4);
        assert_eq!(config_ref.quality().value(), 75);
        assert!(config_ref.lossless());
        assert!(!config_ref.enable_progress_reporting());
    }
}
