//! Discovery thresholds and their optional YAML override file.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::categories::{category, Category, CATEGORIES};
use crate::ConfigError;

/// Result ordering requested from the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchOrder {
    Date,
    Rating,
    Relevance,
    Title,
    ViewCount,
}

impl SearchOrder {
    /// Wire value for the `order` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SearchOrder::Date => "date",
            SearchOrder::Rating => "rating",
            SearchOrder::Relevance => "relevance",
            SearchOrder::Title => "title",
            SearchOrder::ViewCount => "viewCount",
        }
    }
}

impl std::fmt::Display for SearchOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds driving per-category channel discovery.
///
/// Every field has a built-in default; a YAML file only needs to name the
/// fields it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoverySettings {
    /// Two-letter region used both for search and for the country filter.
    pub region_code: String,
    pub target_per_category: usize,
    /// Multiplier applied to the target to size the channel lookup pool.
    pub overfetch_factor: usize,
    pub min_subscribers: u64,
    /// Minimum uploads inside the lookback window for a channel to count as active.
    pub min_recent_uploads: u64,
    pub lookback_days: u32,
    pub search_max_pages: usize,
    pub search_order: SearchOrder,
    /// Restrict search hits to videos published within this many days.
    pub search_window_days: Option<u32>,
    /// Subset of category ids to discover; `None` means the full table.
    pub categories: Option<Vec<u32>>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            region_code: "US".to_string(),
            target_per_category: 10,
            overfetch_factor: 3,
            min_subscribers: 1_000,
            min_recent_uploads: 12,
            lookback_days: 365,
            search_max_pages: 5,
            search_order: SearchOrder::Date,
            search_window_days: None,
            categories: None,
        }
    }
}

impl DiscoverySettings {
    /// Categories to run, in table order when no subset is configured and in
    /// configured order otherwise.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        match &self.categories {
            None => CATEGORIES.to_vec(),
            Some(ids) => ids.iter().filter_map(|id| category(*id)).collect(),
        }
    }

    /// Checks the settings for values that would make discovery meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region_code.len() != 2 || !self.region_code.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(ConfigError::Validation(format!(
                "region_code '{}' must be a two-letter uppercase country code",
                self.region_code
            )));
        }
        if self.target_per_category == 0 {
            return Err(ConfigError::Validation(
                "target_per_category must be at least 1".to_string(),
            ));
        }
        if self.overfetch_factor == 0 {
            return Err(ConfigError::Validation(
                "overfetch_factor must be at least 1".to_string(),
            ));
        }
        if self.lookback_days == 0 {
            return Err(ConfigError::Validation(
                "lookback_days must be at least 1".to_string(),
            ));
        }
        if self.search_max_pages == 0 {
            return Err(ConfigError::Validation(
                "search_max_pages must be at least 1".to_string(),
            ));
        }
        if let Some(ids) = &self.categories {
            if ids.is_empty() {
                return Err(ConfigError::Validation(
                    "categories must not be empty when set".to_string(),
                ));
            }
            let mut seen = HashSet::new();
            for id in ids {
                if category(*id).is_none() {
                    return Err(ConfigError::Validation(format!("unknown category id {id}")));
                }
                if !seen.insert(*id) {
                    return Err(ConfigError::Validation(format!(
                        "duplicate category id {id}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Load discovery settings, applying the YAML file at `path` over the defaults
/// when one is given.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_discovery_settings(path: Option<&Path>) -> Result<DiscoverySettings, ConfigError> {
    let settings = match path {
        None => DiscoverySettings::default(),
        Some(path) => {
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::SettingsFileIo {
                    path: path.display().to_string(),
                    source: e,
                })?;
            parse_discovery_settings(&content)?
        }
    };

    settings.validate()?;
    Ok(settings)
}

fn parse_discovery_settings(content: &str) -> Result<DiscoverySettings, ConfigError> {
    if content.trim().is_empty() {
        return Ok(DiscoverySettings::default());
    }
    serde_yaml::from_str(content).map_err(ConfigError::SettingsFileParse)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = DiscoverySettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.categories().len(), 11);
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let settings = parse_discovery_settings(
            "region_code: GB\ntarget_per_category: 25\nsearch_order: viewCount\n",
        )
        .unwrap();
        assert_eq!(settings.region_code, "GB");
        assert_eq!(settings.target_per_category, 25);
        assert_eq!(settings.search_order, SearchOrder::ViewCount);
        assert_eq!(settings.overfetch_factor, 3);
        assert_eq!(settings.lookback_days, 365);
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(
            parse_discovery_settings("  \n").unwrap(),
            DiscoverySettings::default()
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = parse_discovery_settings("regoin_code: US\n").unwrap_err();
        assert!(matches!(err, ConfigError::SettingsFileParse(_)));
    }

    #[test]
    fn category_subset_preserves_configured_order() {
        let settings = parse_discovery_settings("categories: [20, 17]\n").unwrap();
        let ids: Vec<u32> = settings.categories().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![20, 17]);
    }

    #[test]
    fn validate_rejects_unknown_category() {
        let settings = DiscoverySettings {
            categories: Some(vec![20, 99]),
            ..DiscoverySettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("unknown category id 99"));
    }

    #[test]
    fn validate_rejects_duplicate_category() {
        let settings = DiscoverySettings {
            categories: Some(vec![20, 20]),
            ..DiscoverySettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_target() {
        let settings = DiscoverySettings {
            target_per_category: 0,
            ..DiscoverySettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_lowercase_region() {
        let settings = DiscoverySettings {
            region_code: "us".to_string(),
            ..DiscoverySettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn load_without_path_returns_defaults() {
        assert_eq!(
            load_discovery_settings(None).unwrap(),
            DiscoverySettings::default()
        );
    }

    #[test]
    fn load_reads_and_validates_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_subscribers: 5000\nsearch_window_days: 30").unwrap();
        let settings = load_discovery_settings(Some(file.path())).unwrap();
        assert_eq!(settings.min_subscribers, 5000);
        assert_eq!(settings.search_window_days, Some(30));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_discovery_settings(Some(Path::new("/nonexistent/discovery.yaml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::SettingsFileIo { .. }));
    }
}
