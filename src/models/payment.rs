use crate::error::RelayError;
use crate::utils::money::Amount;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

// Payload enviado pela landing page. Tudo opcional: a decisão
// Default/Custom é feita em `CheckoutRequest::parse`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutBody {
    #[serde(default)]
    pub customer: Option<CustomerBody>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "postbackUrl")]
    pub postback_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub document: Option<String>,
}

/// A checkout that already passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomCheckout {
    pub customer: CustomerInfo,
    pub amount: Amount,
    pub description: Option<String>,
    pub postback_url: Option<Url>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutRequest {
    /// Compra única do produto padrão, sem dados do cliente
    Default,
    Custom(CustomCheckout),
}

impl CheckoutRequest {
    /// Decides the checkout variant from the raw request body.
    ///
    /// An empty body, JSON `null`, anything that is not an object, or an object
    /// without a `customer` block selects [`CheckoutRequest::Default`]. The
    /// custom path requires a name, an email and an amount of at least
    /// [`Amount::MIN`]; a missing amount falls back to `default_amount`.
    pub fn parse(body: &[u8], default_amount: Amount) -> Result<Self, RelayError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(CheckoutRequest::Default);
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| RelayError::Validation(format!("invalid JSON body: {}", e)))?;

        Self::from_value(value, default_amount)
    }

    pub fn from_value(value: Value, default_amount: Amount) -> Result<Self, RelayError> {
        if !value.is_object() {
            debug!("Checkout body is not an object, using default product");
            return Ok(CheckoutRequest::Default);
        }

        let body: CheckoutBody = serde_json::from_value(value)
            .map_err(|e| RelayError::Validation(format!("invalid checkout payload: {}", e)))?;

        let Some(customer) = body.customer else {
            return Ok(CheckoutRequest::Default);
        };

        let name = non_blank(customer.name);
        let email = non_blank(customer.email);
        let (Some(name), Some(email)) = (name, email) else {
            return Err(RelayError::Validation(
                "customer name and email are required".to_string(),
            ));
        };

        let amount = match body.amount {
            None => default_amount,
            Some(cents) => Amount::from_wire(cents).ok_or_else(|| {
                RelayError::Validation(format!(
                    "minimum amount is R$ 1.00 ({} cents)",
                    Amount::MIN.cents()
                ))
            })?,
        };

        Ok(CheckoutRequest::Custom(CustomCheckout {
            customer: CustomerInfo {
                name,
                email,
                phone: non_blank(customer.phone),
                document: customer.document,
            },
            amount,
            description: body.description,
            postback_url: parse_postback_url(body.postback_url)?,
        }))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_postback_url(raw: Option<String>) -> Result<Option<Url>, RelayError> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };

    match Url::parse(&raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Some(url)),
        _ => Err(RelayError::Validation(format!(
            "postbackUrl must be an absolute http(s) URL: {}",
            raw
        ))),
    }
}

// Resposta formatada para o frontend

#[derive(Debug, Clone, Serialize)]
pub struct PaymentCreated {
    pub success: bool,
    pub transaction: TransactionSummary,
    pub pix: PixCode,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionSummary {
    pub id: Value,
    pub status: Value,
    pub amount: Value,
    pub created_at: Value,
}

/// `qr_code`, `code` and `copy_paste` always carry the same value; the
/// storefront reads whichever name its widget expects.
#[derive(Debug, Clone, Serialize)]
pub struct PixCode {
    pub qr_code: Option<String>,
    pub code: Option<String>,
    pub expires_at: Value,
    pub copy_paste: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentStatus {
    pub success: bool,
    pub status: Value,
    pub paid_at: Value,
    pub transaction: Value,
}
