//! Host environment the editor was started in.

use std::time::Duration;

use pagecraft_config::{Config, EntityRef, FeatureFlags};

/// Everything the editor needs to know about its host page.
///
/// Read once from [`Config`] at startup and handed to the controllers that need it; nothing reads
/// or writes host globals after that.
#[derive(Debug, Clone, PartialEq)]
pub struct HostEnvironment {
    pub base_url: String,
    pub editor_path: String,
    /// Entity to open right away, if the host page names one.
    pub entity: Option<EntityRef>,
    pub default_region: String,
    pub features: FeatureFlags,
    pub persistence_debounce: Duration,
    pub preview_debounce: Duration,
    pub history_limit: Option<usize>,
}

impl HostEnvironment {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.host.base_url.clone(),
            editor_path: config.host.editor_path.trim_end_matches('/').to_owned(),
            entity: config.host.entity.clone(),
            default_region: config.host.default_region.clone(),
            features: config.features.flags(),
            persistence_debounce: config.persistence.window(),
            preview_debounce: config.preview.window(),
            history_limit: config.history.max_steps(),
        }
    }

    pub fn has_feature(&self, feature: FeatureFlags) -> bool {
        self.features.contains(feature)
    }
}

impl Default for HostEnvironment {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
