//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_auth::MockLatency;
use storefront_commerce::cart::PricingRules;
use storefront_commerce::{Currency, Money};

/// Storefront configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Default log filter when `STOREFRONT_LOG` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Order summary pricing.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Mock sign-in behaviour.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Delivery location persistence.
    #[serde(default)]
    pub location: LocationConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file. The bundled demo catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Shipping and tax, in major units of the catalog currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_free_shipping")]
    pub free_shipping_threshold: f64,

    #[serde(default = "default_flat_shipping")]
    pub flat_shipping: f64,

    /// Tax rate as a percentage of the subtotal.
    #[serde(default = "default_tax_percent")]
    pub tax_percent: f64,
}

fn default_free_shipping() -> f64 {
    500.0
}

fn default_flat_shipping() -> f64 {
    25.0
}

fn default_tax_percent() -> f64 {
    8.0
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: default_free_shipping(),
            flat_shipping: default_flat_shipping(),
            tax_percent: default_tax_percent(),
        }
    }
}

impl PricingConfig {
    /// Convert to rules for `currency`.
    pub fn rules(&self, currency: Currency) -> Result<PricingRules> {
        for (name, value) in [
            ("free_shipping_threshold", self.free_shipping_threshold),
            ("flat_shipping", self.flat_shipping),
            ("tax_percent", self.tax_percent),
        ] {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("pricing.{} must be a non-negative number, got {}", name, value);
            }
        }
        Ok(PricingRules {
            free_shipping_threshold: Money::from_decimal(self.free_shipping_threshold, currency),
            flat_shipping: Money::from_decimal(self.flat_shipping, currency),
            tax_rate_bps: (self.tax_percent * 100.0).round() as u32,
        })
    }
}

/// Mock identity provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_login_latency")]
    pub login_latency_ms: u64,

    #[serde(default = "default_register_latency")]
    pub register_latency_ms: u64,
}

fn default_login_latency() -> u64 {
    500
}

fn default_register_latency() -> u64 {
    800
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_latency_ms: default_login_latency(),
            register_latency_ms: default_register_latency(),
        }
    }
}

impl AuthConfig {
    pub fn latency(&self) -> MockLatency {
        MockLatency {
            login: Duration::from_millis(self.login_latency_ms),
            register: Duration::from_millis(self.register_latency_ms),
        }
    }
}

/// Location configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// JSON file the delivery location is saved to.
    /// Defaults to `.storefront/state.json` in the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<String>,
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

# Log filter used when STOREFRONT_LOG is unset
log_level = "warn"

[catalog]
# path = "catalog.json"

[pricing]
free_shipping_threshold = 500.0
flat_shipping = 25.0
tax_percent = 8.0

[auth]
login_latency_ms = 500
register_latency_ms = 800

[location]
# store_path = ".storefront/state.json"
"#
    .to_string()
}
