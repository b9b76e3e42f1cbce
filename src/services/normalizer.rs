//! Builds the processor payload from a decided checkout variant.

use crate::app::config::ProductConfig;
use crate::models::payment::{CheckoutRequest, CustomCheckout};
use crate::models::processor::{
    PaymentMetadata, PixOptions, ProcessorCustomer, ProcessorDocument, ProcessorItem,
    ProcessorPayload,
};
use crate::utils::document::{clean_document, DEFAULT_CPF};
use crate::utils::money::Amount;
use chrono::{DateTime, Utc};

pub const PAYMENT_METHOD: &str = "PIX";
pub const DOCUMENT_TYPE: &str = "CPF";
pub const DEFAULT_PHONE: &str = "11999999999";
pub const DEFAULT_CUSTOMER_NAME: &str = "Cliente Venda Hoje";
pub const EXPIRES_IN_DAYS: u32 = 1;

/// Per-call facts that do not come from the body.
#[derive(Debug, Clone)]
pub struct CallerContext {
    pub ip: Option<String>,
    pub now: DateTime<Utc>,
}

impl CallerContext {
    pub fn new(ip: Option<String>) -> Self {
        Self { ip, now: Utc::now() }
    }
}

pub fn normalize(
    request: &CheckoutRequest,
    product: &ProductConfig,
    caller: &CallerContext,
) -> ProcessorPayload {
    match request {
        CheckoutRequest::Default => default_payload(product, caller),
        CheckoutRequest::Custom(custom) => custom_payload(custom, product, caller),
    }
}

fn default_payload(product: &ProductConfig, caller: &CallerContext) -> ProcessorPayload {
    ProcessorPayload {
        payment_method: PAYMENT_METHOD.to_string(),
        customer: ProcessorCustomer {
            name: DEFAULT_CUSTOMER_NAME.to_string(),
            email: product.support_email.clone(),
            phone: DEFAULT_PHONE.to_string(),
            document: cpf(DEFAULT_CPF.to_string()),
        },
        items: vec![line_item(product, product.price, caller)],
        amount: product.price,
        description: product.name.clone(),
        postback_url: None,
        metadata: metadata(product, &product.default_campaign),
        pix: PixOptions::default(),
        expires_in_days: EXPIRES_IN_DAYS,
        ip: None,
    }
}

fn custom_payload(
    custom: &CustomCheckout,
    product: &ProductConfig,
    caller: &CallerContext,
) -> ProcessorPayload {
    let customer = &custom.customer;

    ProcessorPayload {
        payment_method: PAYMENT_METHOD.to_string(),
        customer: ProcessorCustomer {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer
                .phone
                .clone()
                .unwrap_or_else(|| DEFAULT_PHONE.to_string()),
            document: cpf(clean_document(customer.document.as_deref())),
        },
        items: vec![line_item(product, custom.amount, caller)],
        amount: custom.amount,
        description: custom
            .description
            .clone()
            .unwrap_or_else(|| product.name.clone()),
        postback_url: custom.postback_url.as_ref().map(|url| url.to_string()),
        metadata: metadata(product, &product.custom_campaign),
        pix: PixOptions::default(),
        expires_in_days: EXPIRES_IN_DAYS,
        ip: caller.ip.clone(),
    }
}

fn cpf(number: String) -> ProcessorDocument {
    ProcessorDocument {
        number,
        kind: DOCUMENT_TYPE.to_string(),
    }
}

fn line_item(product: &ProductConfig, unit_price: Amount, caller: &CallerContext) -> ProcessorItem {
    ProcessorItem {
        title: product.name.clone(),
        unit_price,
        quantity: 1,
        external_ref: external_ref(&product.external_ref_prefix, caller.now),
    }
}

/// Second granularity: two checkouts in the same second share a reference.
pub fn external_ref(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}", prefix, now.timestamp())
}

fn metadata(product: &ProductConfig, campaign: &str) -> PaymentMetadata {
    PaymentMetadata {
        product: product.slug.clone(),
        access_type: product.access_type.clone(),
        source: product.source.clone(),
        campaign: campaign.to_string(),
    }
}
