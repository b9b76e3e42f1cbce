use crate::utils::money::Amount;
use std::env;
use std::fmt;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_PROCESSOR_URL: &str = "https://api.ghostspaysv2.com/functions/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuração imutável, montada uma vez no startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub service_name: String,
    pub self_test_enabled: bool,
    pub processor: ProcessorConfig,
    pub product: ProductConfig,
}

#[derive(Clone)]
pub struct ProcessorConfig {
    pub base_url: String,
    pub secret_key: String,
    pub company_id: String,
    pub timeout_secs: u64,
}

// Never print the secret key.
impl fmt::Debug for ProcessorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorConfig")
            .field("base_url", &self.base_url)
            .field("secret_key", &"<redacted>")
            .field("company_id", &self.company_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Catalog entry sold by the storefront plus the tags sent as metadata.
#[derive(Debug, Clone)]
pub struct ProductConfig {
    pub name: String,
    pub price: Amount,
    pub support_email: String,
    pub external_ref_prefix: String,
    pub slug: String,
    pub access_type: String,
    pub source: String,
    pub default_campaign: String,
    pub custom_campaign: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            service_name: "Venda Hoje - Checkout API".to_string(),
            self_test_enabled: false,
            processor: ProcessorConfig::default(),
            product: ProductConfig::default(),
        }
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROCESSOR_URL.to_string(),
            secret_key: String::new(),
            company_id: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            name: "Mentoria Venda Hoje - Acesso Vitalício".to_string(),
            price: Amount::DEFAULT_PRODUCT_PRICE,
            support_email: "suporte.vendahoje@gmail.com".to_string(),
            external_ref_prefix: "venda-hoje".to_string(),
            slug: "mentoria_venda_hoje".to_string(),
            access_type: "vitalicio".to_string(),
            source: "landing_page".to_string(),
            default_campaign: "oferta_promocional".to_string(),
            custom_campaign: "venda_hoje_promo".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let product_defaults = defaults.product;
        let processor_defaults = defaults.processor;

        Self {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_PORT),
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            self_test_enabled: env::var("SELF_TEST_ENABLED")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            processor: ProcessorConfig {
                base_url: env::var("PROCESSOR_BASE_URL").unwrap_or(processor_defaults.base_url),
                secret_key: env::var("PROCESSOR_SECRET_KEY").unwrap_or_default(),
                company_id: env::var("PROCESSOR_COMPANY_ID").unwrap_or_default(),
                timeout_secs: env::var("PROCESSOR_TIMEOUT_SECS")
                    .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                    .parse()
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
            product: ProductConfig {
                name: env::var("PRODUCT_NAME").unwrap_or(product_defaults.name),
                price: env::var("PRODUCT_PRICE")
                    .ok()
                    .map(|raw| parse_price(&raw))
                    .unwrap_or(product_defaults.price),
                support_email: env::var("SUPPORT_EMAIL").unwrap_or(product_defaults.support_email),
                external_ref_prefix: env::var("EXTERNAL_REF_PREFIX")
                    .unwrap_or(product_defaults.external_ref_prefix),
                ..product_defaults
            },
        }
    }
}

fn parse_price(raw: &str) -> Amount {
    match raw.trim().parse::<u64>().ok().and_then(Amount::new) {
        Some(price) => price,
        None => {
            warn!(
                "PRODUCT_PRICE={} is not a valid amount in cents (minimum {}), using {}",
                raw,
                Amount::MIN.cents(),
                Amount::DEFAULT_PRODUCT_PRICE.cents()
            );
            Amount::DEFAULT_PRODUCT_PRICE
        }
    }
}
