//! View settings shared by every table of an application.
//!
//! Settings can be built in code or read from YAML:
//!
//! ```yaml
//! default_page_size: 25
//! max_page_size: 200
//! all_sentinel: any
//! null_order: first
//! density: compact
//! ```
//!
//! Missing keys take their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::ordering::NullOrder;

/// Row density of a rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    #[default]
    Normal,
    Comfortable,
}

impl Density {
    /// Row height in pixels.
    pub fn row_height(self) -> u32 {
        match self {
            Density::Compact => 32,
            Density::Normal => 44,
            Density::Comfortable => 56,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewSettings {
    /// Page size used by [`Query::page_index`](crate::Query::page_index).
    pub default_page_size: usize,
    /// Largest page a query may ask for; any size when unset.
    pub max_page_size: Option<usize>,
    /// Filter choice meaning "no constraint".
    pub all_sentinel: String,
    pub null_order: NullOrder,
    pub density: Density,
}

impl Default for ViewSettings {
    fn default() -> Self {
        ViewSettings {
            default_page_size: 10,
            max_page_size: None,
            all_sentinel: "all".to_owned(),
            null_order: NullOrder::Last,
            density: Density::Normal,
        }
    }
}

impl ViewSettings {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let settings: ViewSettings = serde_yaml::from_str(source)?;
        settings.validate()
    }

    pub fn validate(self) -> Result<Self> {
        if self.default_page_size == 0 {
            return Err(ConfigurationError::InvalidSettings {
                reason: "default_page_size must be at least 1".to_owned(),
            });
        }
        if let Some(max) = self.max_page_size.filter(|max| self.default_page_size > *max) {
            return Err(ConfigurationError::InvalidSettings {
                reason: format!(
                    "default_page_size {} exceeds max_page_size {max}",
                    self.default_page_size
                ),
            });
        }
        if self.all_sentinel.is_empty() {
            return Err(ConfigurationError::InvalidSettings {
                reason: "all_sentinel must not be empty".to_owned(),
            });
        }
        Ok(self)
    }
}
