//! # Application Configuration
//!
//! Runtime settings with sensible defaults, overridable through
//! `PAWSHOP_*` environment variables:
//!
//! | Variable               | Default          |
//! |------------------------|------------------|
//! | `PAWSHOP_STORE_NAME`   | `Pawshop`        |
//! | `PAWSHOP_DATA_DIR`     | `./data`         |
//! | `PAWSHOP_TAX_RATE_BPS` | `1600` (16%)     |
//! | `PAWSHOP_RECEIPT_WIDTH`| `32`             |

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use pawshop_core::REGISTER_TAX_RATE_BPS;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Store name printed on receipts and reports.
    pub store_name: String,

    /// Directory holding the JSON document slots.
    pub data_dir: PathBuf,

    /// Register tax rate in basis points.
    pub tax_rate_bps: u32,

    /// Receipt paper width in characters.
    pub receipt_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store_name: "Pawshop".to_string(),
            data_dir: PathBuf::from("./data"),
            tax_rate_bps: REGISTER_TAX_RATE_BPS,
            receipt_width: 32,
        }
    }
}

impl AppConfig {
    /// Builds the config from defaults plus `PAWSHOP_*` overrides.
    /// Unparseable numeric overrides are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        if let Ok(name) = env::var("PAWSHOP_STORE_NAME") {
            config.store_name = name;
        }
        if let Ok(dir) = env::var("PAWSHOP_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(raw) = env::var("PAWSHOP_TAX_RATE_BPS") {
            match raw.parse() {
                Ok(bps) => config.tax_rate_bps = bps,
                Err(_) => warn!(%raw, "ignoring invalid PAWSHOP_TAX_RATE_BPS"),
            }
        }
        if let Ok(raw) = env::var("PAWSHOP_RECEIPT_WIDTH") {
            match raw.parse() {
                Ok(width) => config.receipt_width = width,
                Err(_) => warn!(%raw, "ignoring invalid PAWSHOP_RECEIPT_WIDTH"),
            }
        }

        config
    }

    /// Receipt options derived from the store settings.
    pub fn receipt_options(&self) -> pawshop_core::receipt::ReceiptOptions {
        pawshop_core::receipt::ReceiptOptions {
            store_name: self.store_name.clone(),
            width: self.receipt_width,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store_name, "Pawshop");
        assert_eq!(config.tax_rate_bps, 1600);
        assert_eq!(config.receipt_width, 32);
    }
}
