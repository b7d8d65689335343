//! Shared dashboard state fed by the action layer
//!
//! The mutation methods are the sinks the invoice pipeline feeds on
//! successful responses; failed requests never touch this state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::model::{ImportedInvoice, TransformedInvoice};

/// In-memory view state of the invoice pipeline
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Imported invoices as last fetched from the connector
    pub imported: Vec<ImportedInvoice>,
    /// Transformed payloads keyed by invoice id
    pub transformed: HashMap<String, TransformedInvoice>,
    /// Invoice ids that have been signed and handed to transmission
    pub submitted: Vec<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the imported listing wholesale
    pub fn mutate_imported_invoices(&mut self, imported: Vec<ImportedInvoice>) {
        tracing::debug!("Storing {} imported invoices", imported.len());
        self.imported = imported;
    }

    /// Record the transformed payload for one invoice and reflect it on the
    /// imported entry when present
    pub fn mutate_transformed_invoice(&mut self, transformed: TransformedInvoice, invoice_id: &str) {
        if let Some(invoice) = self
            .imported
            .iter_mut()
            .find(|i| i.invoice_id == invoice_id)
        {
            invoice.transformed_invoice = Some(transformed.clone());
        }
        self.transformed.insert(invoice_id.to_string(), transformed);
    }

    /// Record that an invoice has been submitted for signing
    pub fn mutate_submitted_invoice(&mut self, invoice_id: &str) {
        if !self.submitted.iter().any(|id| id == invoice_id) {
            self.submitted.push(invoice_id.to_string());
        }
    }

    /// Transformed payload for an invoice, if transformation has run
    pub fn transformed_invoice(&self, invoice_id: &str) -> Option<&TransformedInvoice> {
        self.transformed.get(invoice_id)
    }

    pub fn is_submitted(&self, invoice_id: &str) -> bool {
        self.submitted.iter().any(|id| id == invoice_id)
    }
}

/// Thread-safe shared state handle
pub type StateHandle = Arc<RwLock<DashboardState>>;

pub fn new_state_handle() -> StateHandle {
    Arc::new(RwLock::new(DashboardState::new()))
}
