//! Invoice data model
//!
//! These types mirror the JSON shapes exchanged with the invoice service.
//! The remote service owns the full record; only the fields the dashboard
//! reads are typed, everything else rides along untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One invoice as imported from the Zoho books connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedInvoice {
    pub invoice_id: String,
    pub invoice_number: String,
    pub customer_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub status: String,
    /// Present once the invoice has been transformed into signing shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformed_invoice: Option<TransformedInvoice>,
    /// Remote fields the dashboard does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Canonical invoice shape required for signing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformedInvoice {
    /// Invoice reference number, issued when the invoice is signed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irn: Option<String>,
    #[serde(flatten)]
    pub body: serde_json::Map<String, Value>,
}

/// Wire envelope for the imported-invoice listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportEnvelope {
    pub data: ImportData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportData {
    pub imported: Vec<ImportedInvoice>,
}

impl ImportEnvelope {
    pub fn new(imported: Vec<ImportedInvoice>) -> Self {
        Self {
            data: ImportData { imported },
        }
    }
}

/// Wire envelope for a transform response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformEnvelope {
    pub transformed: TransformedInvoice,
}

/// Invoice submission as handed to the sign endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSubmission {
    pub invoice_id: String,
    pub transformed_invoice: TransformedInvoice,
}

/// Fallback listing used when the import service is unreachable
pub fn sample_imported_invoices() -> Vec<ImportedInvoice> {
    let samples = [
        (
            "90300000079426",
            "INV-000001",
            "Acme Traders Pvt Ltd",
            "2024-03-04",
            118_000.0,
        ),
        (
            "90300000079427",
            "INV-000002",
            "Meridian Supplies",
            "2024-03-06",
            54_300.5,
        ),
        (
            "90300000079431",
            "INV-000003",
            "Kestrel Logistics",
            "2024-03-11",
            7_850.0,
        ),
    ];

    samples
        .into_iter()
        .map(
            |(invoice_id, invoice_number, customer_name, date, total)| ImportedInvoice {
                invoice_id: invoice_id.to_string(),
                invoice_number: invoice_number.to_string(),
                customer_name: customer_name.to_string(),
                date: date.to_string(),
                total,
                currency_code: "INR".to_string(),
                status: "draft".to_string(),
                transformed_invoice: None,
                extra: serde_json::Map::new(),
            },
        )
        .collect()
}
