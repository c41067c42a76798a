use serde::{Deserialize, Serialize};

/// Configuration for the zfood module (`modules.zfood` in the app config).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZFoodConfig {
    /// `take` used when a list request does not specify one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Upper bound accepted for `take`.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for ZFoodConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    50
}

fn default_max_page_size() -> u32 {
    1000
}
