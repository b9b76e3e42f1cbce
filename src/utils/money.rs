//! Utilitários para manipulação de valores monetários (centavos de BRL)

use serde::Serialize;

/// Amount in minor units (centavos). Never below [`Amount::MIN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// R$ 1,00
    pub const MIN: Amount = Amount(100);
    /// R$ 8,90
    pub const DEFAULT_PRODUCT_PRICE: Amount = Amount(890);

    pub fn new(cents: u64) -> Option<Self> {
        (cents >= Self::MIN.0).then_some(Amount(cents))
    }

    /// Accepts the signed integer a storefront sends over JSON.
    pub fn from_wire(cents: i64) -> Option<Self> {
        u64::try_from(cents).ok().and_then(Self::new)
    }

    pub fn cents(self) -> u64 {
        self.0
    }
}

pub fn format_currency(cents: u64) -> String {
    format!("R$ {}.{:02}", cents / 100, cents % 100)
}
