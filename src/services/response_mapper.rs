use crate::error::RelayError;
use crate::models::payment::{PaymentCreated, PaymentStatus, PixCode, TransactionSummary};
use crate::models::processor::{ProcessorPix, ProcessorTransaction};
use serde_json::Value;
use tracing::warn;

pub const PIX_MISSING: &str = "PIX data not returned by the payment processor";

/// Maps a created transaction into the storefront contract.
///
/// Fails when the processor omitted the `pix` block (or sent it empty): the
/// storefront cannot render a charge without it.
pub fn to_payment_created(transaction: ProcessorTransaction) -> Result<PaymentCreated, RelayError> {
    let pix = extract_pix(transaction.pix.as_ref())?;

    let qr_code = pix.qr_code().map(str::to_string);
    if qr_code.is_none() {
        warn!(id = %transaction.id, "PIX block has no QR code");
    }

    Ok(PaymentCreated {
        success: true,
        transaction: TransactionSummary {
            id: transaction.id,
            status: transaction.status,
            amount: transaction.amount,
            created_at: transaction.created_at,
        },
        pix: PixCode {
            qr_code: qr_code.clone(),
            code: qr_code.clone(),
            expires_at: pix.expiration_date,
            copy_paste: qr_code,
        },
    })
}

fn extract_pix(pix: Option<&Value>) -> Result<ProcessorPix, RelayError> {
    match pix {
        Some(Value::Object(fields)) if !fields.is_empty() => {
            serde_json::from_value(Value::Object(fields.clone())).map_err(|e| {
                RelayError::ProcessorContract(format!("{}: {}", PIX_MISSING, e))
            })
        }
        _ => Err(RelayError::ProcessorContract(PIX_MISSING.to_string())),
    }
}

pub fn to_payment_status(record: Value) -> PaymentStatus {
    let field = |name: &str| record.get(name).cloned().unwrap_or(Value::Null);

    PaymentStatus {
        success: true,
        status: field("status"),
        paid_at: field("paidAt"),
        transaction: record,
    }
}
