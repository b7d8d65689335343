//! API endpoint path table
//!
//! Builds the service paths from shared namespace fragments so every
//! action resolves its endpoint from one place.

/// Versioned API path table
#[derive(Debug, Clone)]
pub struct ApiRoutes {
    invoice_namespace: String,
    transmitting_namespace: String,
    qr_namespace: String,
}

impl ApiRoutes {
    pub fn new(version: &str) -> Self {
        Self {
            invoice_namespace: format!("invoices/{}", version),
            transmitting_namespace: format!("transmitting/{}", version),
            qr_namespace: format!("invoice-qr/{}", version),
        }
    }

    /// Path for listing imported invoices
    pub fn get_invoices(&self) -> String {
        format!("{}/imports/zoho/invoices", self.invoice_namespace)
    }

    /// Path for transforming one imported invoice
    pub fn transform_invoice(&self, invoice_id: &str) -> String {
        format!("{}/{}", self.get_invoices(), invoice_id)
    }

    /// Path for signing/submitting a transformed invoice
    pub fn submit_invoice(&self) -> String {
        format!("{}/sign", self.invoice_namespace)
    }

    /// Base path for transmitting signed invoices
    pub fn transmit_base(&self) -> &str {
        &self.transmitting_namespace
    }

    /// Path for transmitting one signed invoice by IRN
    pub fn transmit_invoice(&self, irn: &str) -> String {
        format!("{}/{}", self.transmitting_namespace, irn)
    }

    /// Path for fetching an invoice QR code
    pub fn qr_code(&self) -> &str {
        &self.qr_namespace
    }

    /// Path for listing incoming invoices
    pub fn incoming_invoices(&self) -> String {
        format!("{}/received", self.transmitting_namespace)
    }
}

impl Default for ApiRoutes {
    fn default() -> Self {
        Self::new("v1")
    }
}
