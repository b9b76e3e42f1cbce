use crate::utils::money::Amount;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Payload para enviar ao payment processor (POST /transactions)
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorPayload {
    pub payment_method: String,
    pub customer: ProcessorCustomer,
    pub items: Vec<ProcessorItem>,
    pub amount: Amount,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postback_url: Option<String>,
    pub metadata: PaymentMetadata,
    pub pix: PixOptions,
    pub expires_in_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProcessorCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub document: ProcessorDocument,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProcessorDocument {
    pub number: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorItem {
    pub title: String,
    pub unit_price: Amount,
    pub quantity: u32,
    pub external_ref: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentMetadata {
    pub product: String,
    pub access_type: String,
    pub source: String,
    pub campaign: String,
}

/// Always sent as `{}`; the processor fills in the PIX charge.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PixOptions {}

// Resposta do processor

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorTransaction {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub created_at: Value,
    #[serde(default)]
    pub pix: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessorPix {
    #[serde(default)]
    pub qrcode: Option<String>,
    #[serde(default, rename = "qrCode")]
    pub qr_code_camel: Option<String>,
    #[serde(default, rename = "expirationDate")]
    pub expiration_date: Value,
}

impl ProcessorPix {
    /// The processor has shipped both spellings; the first non-empty one wins.
    pub fn qr_code(&self) -> Option<&str> {
        [&self.qrcode, &self.qr_code_camel]
            .into_iter()
            .filter_map(|code| code.as_deref())
            .find(|code| !code.is_empty())
    }
}
