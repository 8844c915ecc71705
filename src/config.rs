use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use larder_purchase::{DateExtractor, ProductRecognizer, ScanSession};
use larder_shared::RecipeSearchFilters;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub suggestion: SuggestionConfig,
    #[serde(default)]
    pub purchase: PurchaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SuggestionConfig {
    #[serde(default = "default_expiration_threshold_days")]
    pub expiration_threshold_days: i64,
    #[serde(default = "default_expiration_weight_multiplier")]
    pub expiration_weight_multiplier: f64,
    #[serde(default)]
    pub max_results: Option<usize>,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            expiration_threshold_days: default_expiration_threshold_days(),
            expiration_weight_multiplier: default_expiration_weight_multiplier(),
            max_results: None,
        }
    }
}

impl SuggestionConfig {
    /// Filters seeded with the configured ranking knobs.
    pub fn filters(&self) -> RecipeSearchFilters {
        RecipeSearchFilters {
            expiration_threshold: self.expiration_threshold_days,
            expiration_weight_multiplier: self.expiration_weight_multiplier,
            max_results: self.max_results,
            ..RecipeSearchFilters::default()
        }
    }
}

fn default_expiration_threshold_days() -> i64 {
    larder_shared::DEFAULT_EXPIRATION_THRESHOLD_DAYS
}

fn default_expiration_weight_multiplier() -> f64 {
    larder_shared::DEFAULT_EXPIRATION_WEIGHT_MULTIPLIER
}

#[derive(Debug, Deserialize, Clone)]
pub struct PurchaseConfig {
    #[serde(default = "default_min_recognition_confidence")]
    pub min_recognition_confidence: f64,
}

impl Default for PurchaseConfig {
    fn default() -> Self {
        Self {
            min_recognition_confidence: default_min_recognition_confidence(),
        }
    }
}

impl PurchaseConfig {
    /// Scan session that drops recognitions under the configured confidence floor.
    pub fn scan_session<R: ProductRecognizer, D: DateExtractor>(
        &self,
        recognizer: R,
        extractor: D,
    ) -> ScanSession<R, D> {
        ScanSession::new(recognizer, extractor, self.min_recognition_confidence)
    }
}

fn default_min_recognition_confidence() -> f64 {
    0.5
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LARDER__LOGGING__LEVEL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .set_default(
                "suggestion.expiration_threshold_days",
                default_expiration_threshold_days(),
            )?
            .set_default(
                "suggestion.expiration_weight_multiplier",
                default_expiration_weight_multiplier(),
            )?
            .set_default(
                "purchase.min_recognition_confidence",
                default_min_recognition_confidence(),
            )?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Missing file is fine, defaults and env still apply
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("LARDER")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(format!(
                "Unknown logging format '{}', expected 'pretty' or 'json'",
                self.logging.format
            ));
        }
        if self.suggestion.expiration_threshold_days < 0 {
            return Err("Suggestion expiration_threshold_days must not be negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.suggestion.expiration_weight_multiplier) {
            return Err("Suggestion expiration_weight_multiplier must be within 0..=1".to_string());
        }
        if self.suggestion.max_results == Some(0) {
            return Err("Suggestion max_results must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.purchase.min_recognition_confidence) {
            return Err("Purchase min_recognition_confidence must be within 0..=1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.suggestion.expiration_threshold_days, 7);
        assert_eq!(config.suggestion.expiration_weight_multiplier, 0.3);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.suggestion.expiration_weight_multiplier = 1.2;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.suggestion.expiration_threshold_days = -1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.purchase.min_recognition_confidence = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_suggestion_config_seeds_filters() {
        let config = SuggestionConfig {
            expiration_threshold_days: 3,
            expiration_weight_multiplier: 0.5,
            max_results: Some(10),
        };

        let filters = config.filters();
        assert_eq!(filters.expiration_threshold, 3);
        assert_eq!(filters.expiration_weight_multiplier, 0.5);
        assert_eq!(filters.max_results, Some(10));
        assert!(!filters.prioritize_expiring);
    }

    #[test]
    fn test_purchase_config_scan_session_applies_floor() {
        use larder_purchase::{RecognizedProduct, StaticDateExtractor, StaticRecognizer};
        use larder_shared::Category;

        let product = |name: &str, confidence| RecognizedProduct {
            name: name.to_string(),
            category: Category::Dairy,
            confidence,
            unit: None,
        };
        let session = PurchaseConfig::default().scan_session(
            StaticRecognizer::new(vec![product("Yogurt", 0.9), product("Cheese", 0.2)]),
            StaticDateExtractor::new(Vec::new()),
        );

        let items = session.scan(b"photo", None).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Yogurt");
    }
}
