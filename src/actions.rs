//! Invoice pipeline actions
//!
//! Thin wrappers over the invoice service API: each action issues one
//! request, feeds the shared state on HTTP 200, and otherwise hands the
//! failure back to the caller undifferentiated. No retries, no timeouts
//! beyond transport defaults.

use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::credentials::CredentialProvider;
use crate::endpoints::ApiRoutes;
use crate::io::{HttpClient, HttpResponse};
use crate::model::{sample_imported_invoices, ImportEnvelope, InvoiceSubmission, TransformEnvelope};
use crate::state::StateHandle;

/// Header carrying the Zoho connector token
pub const ZOHO_AUTHORIZATION_HEADER: &str = "zoho_authorization";

/// Why an action did not succeed
///
/// The service contract is binary; client error, server error, and transport
/// failure are deliberately not told apart beyond what is captured here.
#[derive(Debug, Clone)]
pub enum ApiFailure {
    /// The service answered with a non-200 status
    Status { status: u16, body: String },
    /// The request never completed
    Transport(String),
    /// The service answered 200 but the body did not match the wire shape
    Decode(String),
}

impl ApiFailure {
    fn from_response(response: HttpResponse) -> Self {
        ApiFailure::Status {
            status: response.status,
            body: response.body,
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::Status { status, body } => write!(f, "status {}: {}", status, body),
            ApiFailure::Transport(msg) => write!(f, "transport: {}", msg),
            ApiFailure::Decode(msg) => write!(f, "decode: {}", msg),
        }
    }
}

/// Explicit binary outcome of one action
#[derive(Debug, Clone)]
pub enum ApiOutcome<T> {
    Success(T),
    Failure(ApiFailure),
}

impl<T> ApiOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            ApiOutcome::Success(value) => Some(value),
            ApiOutcome::Failure(_) => None,
        }
    }
}

/// Dashboard action layer
pub struct DashboardActions {
    http: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialProvider>,
    state: StateHandle,
    routes: ApiRoutes,
    base_url: String,
    service_provider_key: String,
}

impl fmt::Debug for DashboardActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardActions")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DashboardActions {
    pub fn new(
        config: &Config,
        http: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialProvider>,
        state: StateHandle,
    ) -> Self {
        Self {
            http,
            credentials,
            state,
            routes: ApiRoutes::new(&config.api_version),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            service_provider_key: config.service_provider_key.clone(),
        }
    }

    pub fn state(&self) -> &StateHandle {
        &self.state
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn provider_token(&self) -> Option<String> {
        let token = self.credentials.get(&self.service_provider_key);
        if token.is_none() {
            tracing::debug!(
                "No token under '{}'; sending request without provider header",
                self.service_provider_key
            );
        }
        token.map(|t| t.access_token)
    }

    /// Fetch the imported-invoice listing from the connector.
    ///
    /// On HTTP 200 the listing is stored in the shared state and the parsed
    /// envelope returned. Any other outcome falls back to the hardcoded
    /// sample listing without touching state.
    pub async fn fetch_business_invoices(&self) -> ImportEnvelope {
        let url = self.url(&self.routes.get_invoices());
        let token = self.provider_token();
        let mut headers: Vec<(&str, &str)> = Vec::new();
        if let Some(token) = token.as_deref() {
            headers.push((ZOHO_AUTHORIZATION_HEADER, token));
        }

        match self.http.get(&url, &headers).await {
            Ok(response) if response.status == 200 => {
                match serde_json::from_str::<ImportEnvelope>(&response.body) {
                    Ok(envelope) => {
                        self.state
                            .write()
                            .await
                            .mutate_imported_invoices(envelope.data.imported.clone());
                        envelope
                    }
                    Err(e) => {
                        tracing::debug!("Import listing did not decode: {}", e);
                        ImportEnvelope::new(sample_imported_invoices())
                    }
                }
            }
            Ok(response) => {
                tracing::debug!(
                    "Import listing returned status {}; using sample listing",
                    response.status
                );
                ImportEnvelope::new(sample_imported_invoices())
            }
            Err(e) => {
                tracing::debug!("Import listing failed: {}; using sample listing", e);
                ImportEnvelope::new(sample_imported_invoices())
            }
        }
    }

    /// Transform one imported invoice into signing shape.
    ///
    /// On HTTP 200 the transformed payload is recorded against the invoice id.
    pub async fn transform_business_invoice(
        &self,
        invoice_id: &str,
    ) -> ApiOutcome<TransformEnvelope> {
        let url = self.url(&self.routes.transform_invoice(invoice_id));
        let token = self.provider_token();
        let mut headers: Vec<(&str, &str)> = Vec::new();
        if let Some(token) = token.as_deref() {
            headers.push((ZOHO_AUTHORIZATION_HEADER, token));
        }

        match self
            .http
            .post_json(&url, &serde_json::json!({}), &headers)
            .await
        {
            Ok(response) if response.status == 200 => {
                match serde_json::from_str::<TransformEnvelope>(&response.body) {
                    Ok(envelope) => {
                        self.state
                            .write()
                            .await
                            .mutate_transformed_invoice(envelope.transformed.clone(), invoice_id);
                        ApiOutcome::Success(envelope)
                    }
                    Err(e) => ApiOutcome::Failure(ApiFailure::Decode(e.to_string())),
                }
            }
            Ok(response) => ApiOutcome::Failure(ApiFailure::from_response(response)),
            Err(e) => ApiOutcome::Failure(ApiFailure::Transport(e.to_string())),
        }
    }

    /// Submit a transformed invoice for signing.
    ///
    /// On HTTP 200 the invoice is handed to transmission under the IRN the
    /// sign response reports (the submitted payload's IRN when the response
    /// omits one) and the invoice id is recorded as submitted.
    pub async fn submit_business_invoice(
        &self,
        submission: &InvoiceSubmission,
    ) -> ApiOutcome<HttpResponse> {
        let url = self.url(&self.routes.submit_invoice());
        let body = match serde_json::to_value(&submission.transformed_invoice) {
            Ok(body) => body,
            Err(e) => return ApiOutcome::Failure(ApiFailure::Decode(e.to_string())),
        };

        match self.http.post_json(&url, &body, &[]).await {
            Ok(response) if response.status == 200 => {
                let irn = extract_irn(&response.body)
                    .or_else(|| submission.transformed_invoice.irn.clone());
                match irn {
                    Some(irn) => {
                        if let ApiOutcome::Failure(failure) =
                            self.transmit_business_invoice(&irn).await
                        {
                            tracing::debug!("Transmit after sign failed: {}", failure);
                        }
                    }
                    None => {
                        tracing::debug!("Sign response carried no IRN; skipping transmit");
                    }
                }
                self.state
                    .write()
                    .await
                    .mutate_submitted_invoice(&submission.invoice_id);
                ApiOutcome::Success(response)
            }
            Ok(response) => ApiOutcome::Failure(ApiFailure::from_response(response)),
            Err(e) => ApiOutcome::Failure(ApiFailure::Transport(e.to_string())),
        }
    }

    /// Deliver a signed invoice to the receiving system by IRN.
    pub async fn transmit_business_invoice(&self, irn: &str) -> ApiOutcome<HttpResponse> {
        let url = self.url(&self.routes.transmit_invoice(irn));

        match self.http.post_json(&url, &serde_json::json!({}), &[]).await {
            Ok(response) if response.status == 200 => ApiOutcome::Success(response),
            Ok(response) => ApiOutcome::Failure(ApiFailure::from_response(response)),
            Err(e) => ApiOutcome::Failure(ApiFailure::Transport(e.to_string())),
        }
    }

    /// Fetch the QR code for a signed invoice.
    pub async fn fetch_qr_code(&self, irn: &str) -> ApiOutcome<HttpResponse> {
        let url = self.url(self.routes.qr_code());

        match self
            .http
            .post_json(&url, &serde_json::json!({ "irn": irn }), &[])
            .await
        {
            Ok(response) if response.status == 200 => ApiOutcome::Success(response),
            Ok(response) => ApiOutcome::Failure(ApiFailure::from_response(response)),
            Err(e) => ApiOutcome::Failure(ApiFailure::Transport(e.to_string())),
        }
    }

    /// Fetch invoices received from other businesses.
    pub async fn fetch_incoming_invoices(&self) -> ApiOutcome<HttpResponse> {
        let url = self.url(&self.routes.incoming_invoices());

        match self.http.get(&url, &[]).await {
            Ok(response) if response.status == 200 => ApiOutcome::Success(response),
            Ok(response) => ApiOutcome::Failure(ApiFailure::from_response(response)),
            Err(e) => ApiOutcome::Failure(ApiFailure::Transport(e.to_string())),
        }
    }
}

/// Pull the IRN out of a sign response body, top-level or under `data`
fn extract_irn(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("irn")
        .or_else(|| value.get("data").and_then(|d| d.get("irn")))
        .and_then(|irn| irn.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MockCredentialProvider;
    use crate::credentials::ServiceProviderToken;
    use crate::io::MockHttpClient;
    use crate::model::TransformedInvoice;
    use crate::state::new_state_handle;

    fn test_config() -> Config {
        Config {
            api_base_url: "http://localhost:8000".to_string(),
            api_version: "v1".to_string(),
            service_provider_key: "zoho_service_provider".to_string(),
            credentials_path: None,
        }
    }

    fn zoho_credentials() -> MockCredentialProvider {
        let mut credentials = MockCredentialProvider::new();
        credentials.expect_get().returning(|_| {
            Some(ServiceProviderToken {
                access_token: "zoho-tok".to_string(),
            })
        });
        credentials
    }

    fn no_credentials() -> MockCredentialProvider {
        let mut credentials = MockCredentialProvider::new();
        credentials.expect_get().returning(|_| None);
        credentials
    }

    fn actions(
        http: MockHttpClient,
        credentials: MockCredentialProvider,
    ) -> (DashboardActions, crate::state::StateHandle) {
        let state = new_state_handle();
        let actions = DashboardActions::new(
            &test_config(),
            Arc::new(http),
            Arc::new(credentials),
            Arc::clone(&state),
        );
        (actions, state)
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    const IMPORT_BODY: &str = r#"{"data":{"imported":[{
        "invoice_id": "inv-1",
        "invoice_number": "INV-9",
        "customer_name": "Acme",
        "date": "2024-01-01",
        "total": 100.0,
        "currency_code": "INR",
        "status": "draft"
    }]}}"#;

    #[tokio::test]
    async fn fetch_success_feeds_state_and_returns_envelope() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .withf(|url, headers| {
                url == "http://localhost:8000/invoices/v1/imports/zoho/invoices"
                    && headers.contains(&(ZOHO_AUTHORIZATION_HEADER, "zoho-tok"))
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(ok(IMPORT_BODY)) }));

        let (actions, state) = actions(http, zoho_credentials());
        let envelope = actions.fetch_business_invoices().await;

        assert_eq!(envelope.data.imported.len(), 1);
        assert_eq!(envelope.data.imported[0].invoice_id, "inv-1");
        let state = state.read().await;
        assert_eq!(state.imported.len(), 1);
        assert_eq!(state.imported[0].invoice_number, "INV-9");
    }

    #[tokio::test]
    async fn fetch_non_200_falls_back_to_samples_without_mutation() {
        let mut http = MockHttpClient::new();
        http.expect_get().returning(|_, _| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 502,
                    body: "Bad Gateway".to_string(),
                })
            })
        });

        let (actions, state) = actions(http, zoho_credentials());
        let envelope = actions.fetch_business_invoices().await;

        assert_eq!(envelope.data.imported, sample_imported_invoices());
        assert!(state.read().await.imported.is_empty());
    }

    #[tokio::test]
    async fn fetch_transport_failure_falls_back_to_samples() {
        let mut http = MockHttpClient::new();
        http.expect_get().returning(|_, _| {
            Box::pin(async { Err(crate::DashboardError::Http("connection refused".to_string())) })
        });

        let (actions, state) = actions(http, zoho_credentials());
        let envelope = actions.fetch_business_invoices().await;

        assert_eq!(envelope.data.imported, sample_imported_invoices());
        assert!(state.read().await.imported.is_empty());
    }

    #[tokio::test]
    async fn fetch_without_token_sends_no_provider_header() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .withf(|_, headers| headers.is_empty())
            .returning(|_, _| Box::pin(async { Ok(ok(IMPORT_BODY)) }));

        let (actions, _state) = actions(http, no_credentials());
        let envelope = actions.fetch_business_invoices().await;
        assert_eq!(envelope.data.imported.len(), 1);
    }

    #[tokio::test]
    async fn transform_success_records_payload_against_invoice_id() {
        let mut http = MockHttpClient::new();
        http.expect_post_json()
            .withf(|url, _, headers| {
                url == "http://localhost:8000/invoices/v1/imports/zoho/invoices/inv-1"
                    && headers.contains(&(ZOHO_AUTHORIZATION_HEADER, "zoho-tok"))
            })
            .times(1)
            .returning(|_, _, _| {
                Box::pin(async { Ok(ok(r#"{"transformed": {"irn": null, "doc_type": "INV"}}"#)) })
            });

        let (actions, state) = actions(http, zoho_credentials());
        let outcome = actions.transform_business_invoice("inv-1").await;

        assert!(outcome.is_success());
        let state = state.read().await;
        let transformed = state.transformed_invoice("inv-1").unwrap();
        assert_eq!(transformed.body["doc_type"], "INV");
    }

    #[tokio::test]
    async fn transform_non_200_returns_failure_without_mutation() {
        let mut http = MockHttpClient::new();
        http.expect_post_json().returning(|_, _, _| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 422,
                    body: r#"{"error": "unmappable invoice"}"#.to_string(),
                })
            })
        });

        let (actions, state) = actions(http, zoho_credentials());
        let outcome = actions.transform_business_invoice("inv-1").await;

        match outcome {
            ApiOutcome::Failure(ApiFailure::Status { status, .. }) => assert_eq!(status, 422),
            other => panic!("expected status failure, got {other:?}"),
        }
        assert!(state.read().await.transformed_invoice("inv-1").is_none());
    }

    #[tokio::test]
    async fn transform_undecodable_body_returns_decode_failure() {
        let mut http = MockHttpClient::new();
        http.expect_post_json()
            .returning(|_, _, _| Box::pin(async { Ok(ok("not json")) }));

        let (actions, state) = actions(http, zoho_credentials());
        let outcome = actions.transform_business_invoice("inv-1").await;

        assert!(matches!(
            outcome,
            ApiOutcome::Failure(ApiFailure::Decode(_))
        ));
        assert!(state.read().await.transformed_invoice("inv-1").is_none());
    }

    fn submission(irn: Option<&str>) -> InvoiceSubmission {
        InvoiceSubmission {
            invoice_id: "inv-1".to_string(),
            transformed_invoice: TransformedInvoice {
                irn: irn.map(str::to_string),
                body: serde_json::Map::new(),
            },
        }
    }

    #[tokio::test]
    async fn submit_success_transmits_returned_irn_and_records_submission() {
        let mut http = MockHttpClient::new();
        http.expect_post_json()
            .withf(|url, _, _| url == "http://localhost:8000/invoices/v1/sign")
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(ok(r#"{"irn": "IRN-FROM-SIGN"}"#)) }));
        http.expect_post_json()
            .withf(|url, _, _| url == "http://localhost:8000/transmitting/v1/IRN-FROM-SIGN")
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(ok("{}")) }));

        let (actions, state) = actions(http, no_credentials());
        let outcome = actions
            .submit_business_invoice(&submission(Some("IRN-IN-PAYLOAD")))
            .await;

        assert!(outcome.is_success());
        assert!(state.read().await.is_submitted("inv-1"));
    }

    #[tokio::test]
    async fn submit_falls_back_to_payload_irn_when_response_has_none() {
        let mut http = MockHttpClient::new();
        http.expect_post_json()
            .withf(|url, _, _| url.ends_with("/sign"))
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(ok(r#"{"ack_no": 112010}"#)) }));
        http.expect_post_json()
            .withf(|url, _, _| url.ends_with("/transmitting/v1/IRN-IN-PAYLOAD"))
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(ok("{}")) }));

        let (actions, _state) = actions(http, no_credentials());
        let outcome = actions
            .submit_business_invoice(&submission(Some("IRN-IN-PAYLOAD")))
            .await;
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn submit_success_survives_transmit_failure() {
        let mut http = MockHttpClient::new();
        http.expect_post_json()
            .withf(|url, _, _| url.ends_with("/sign"))
            .returning(|_, _, _| Box::pin(async { Ok(ok(r#"{"irn": "IRN-1"}"#)) }));
        http.expect_post_json()
            .withf(|url, _, _| url.contains("/transmitting/"))
            .returning(|_, _, _| {
                Box::pin(async {
                    Err(crate::DashboardError::Http("connection reset".to_string()))
                })
            });

        let (actions, state) = actions(http, no_credentials());
        let outcome = actions.submit_business_invoice(&submission(None)).await;

        assert!(outcome.is_success());
        assert!(state.read().await.is_submitted("inv-1"));
    }

    #[tokio::test]
    async fn submit_failure_neither_transmits_nor_mutates() {
        let mut http = MockHttpClient::new();
        http.expect_post_json()
            .withf(|url, _, _| url.ends_with("/sign"))
            .times(1)
            .returning(|_, _, _| {
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 400,
                        body: r#"{"error": "invalid gstin"}"#.to_string(),
                    })
                })
            });

        let (actions, state) = actions(http, no_credentials());
        let outcome = actions
            .submit_business_invoice(&submission(Some("IRN-1")))
            .await;

        assert!(!outcome.is_success());
        assert!(!state.read().await.is_submitted("inv-1"));
    }

    #[tokio::test]
    async fn transmit_passes_outcome_through() {
        let mut http = MockHttpClient::new();
        http.expect_post_json()
            .withf(|url, body, headers| {
                url == "http://localhost:8000/transmitting/v1/IRN-7"
                    && body == &serde_json::json!({})
                    && headers.is_empty()
            })
            .returning(|_, _, _| Box::pin(async { Ok(ok(r#"{"accepted": true}"#)) }));

        let (actions, _state) = actions(http, no_credentials());
        let outcome = actions.transmit_business_invoice("IRN-7").await;
        let response = outcome.success().unwrap();
        assert_eq!(response.body, r#"{"accepted": true}"#);
    }

    #[tokio::test]
    async fn qr_code_posts_irn_body() {
        let mut http = MockHttpClient::new();
        http.expect_post_json()
            .withf(|url, body, _| {
                url == "http://localhost:8000/invoice-qr/v1"
                    && body == &serde_json::json!({ "irn": "IRN-7" })
            })
            .returning(|_, _, _| Box::pin(async { Ok(ok(r#"{"qr": "base64..."}"#)) }));

        let (actions, _state) = actions(http, no_credentials());
        assert!(actions.fetch_qr_code("IRN-7").await.is_success());
    }

    #[tokio::test]
    async fn incoming_invoices_gets_received_listing() {
        let mut http = MockHttpClient::new();
        http.expect_get()
            .withf(|url, headers| {
                url == "http://localhost:8000/transmitting/v1/received" && headers.is_empty()
            })
            .returning(|_, _| Box::pin(async { Ok(ok(r#"{"received": []}"#)) }));

        let (actions, _state) = actions(http, no_credentials());
        assert!(actions.fetch_incoming_invoices().await.is_success());
    }

    #[tokio::test]
    async fn incoming_invoices_failure_is_passed_through() {
        let mut http = MockHttpClient::new();
        http.expect_get().returning(|_, _| {
            Box::pin(async { Err(crate::DashboardError::Http("timeout".to_string())) })
        });

        let (actions, _state) = actions(http, no_credentials());
        match actions.fetch_incoming_invoices().await {
            ApiOutcome::Failure(ApiFailure::Transport(msg)) => assert!(msg.contains("timeout")),
            other => panic!("expected transport failure, got {other:?}"),
        }
    }

    #[test]
    fn extract_irn_reads_top_level_and_nested() {
        assert_eq!(extract_irn(r#"{"irn": "A"}"#).as_deref(), Some("A"));
        assert_eq!(
            extract_irn(r#"{"data": {"irn": "B"}}"#).as_deref(),
            Some("B")
        );
        assert!(extract_irn(r#"{"ack_no": 1}"#).is_none());
        assert!(extract_irn("not json").is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let config = Config {
            api_base_url: "http://localhost:8000/".to_string(),
            ..test_config()
        };
        let actions = DashboardActions::new(
            &config,
            Arc::new(MockHttpClient::new()),
            Arc::new(no_credentials()),
            new_state_handle(),
        );
        assert_eq!(actions.url("invoices/v1/sign"), "http://localhost:8000/invoices/v1/sign");
    }
}
