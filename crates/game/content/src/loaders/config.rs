//! Rules configuration loader.

use std::path::Path;

use sheet_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rule constants from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load rule constants from a TOML file.
    ///
    /// Keys missing from the file keep their [`RulesConfig::default`] value.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let config: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;
        if config.wyld_cancer_injury_threshold <= 0 {
            anyhow::bail!(
                "wyld_cancer_injury_threshold must be positive, got {}",
                config.wyld_cancer_injury_threshold
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("base_languages = 3\n").unwrap();
        assert_eq!(config.base_languages, 3);
        assert_eq!(
            config.wyld_cancer_injury_threshold,
            RulesConfig::DEFAULT_WYLD_CANCER_INJURY_THRESHOLD
        );
        assert_eq!(config.mastery_slots, RulesConfig::DEFAULT_MASTERY_SLOTS);
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let err = ConfigLoader::parse("wyld_cancer_injury_threshold = 0\n").unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn malformed_toml_is_reported() {
        assert!(ConfigLoader::parse("base_languages = \"two\"\n").is_err());
    }
}
