//! CISL Dashboard client module
//!
//! Route tables, sidebar navigation config, and the thin action layer over
//! the invoice service API: import, transform, sign/submit, transmit, and
//! QR-code retrieval.

pub mod actions;
pub mod config;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod io;
pub mod model;
pub mod routes;
pub mod sidebar;
pub mod state;

pub use actions::{ApiFailure, ApiOutcome, DashboardActions};
pub use config::{load_config, Config};
pub use endpoints::ApiRoutes;
pub use error::{DashboardError, Result};
pub use routes::dashboard_routes;
pub use sidebar::sidebar_routes;
pub use state::{new_state_handle, StateHandle};
