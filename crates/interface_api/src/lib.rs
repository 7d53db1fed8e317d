//! HTTP API Layer
//!
//! This crate exposes the quote wizard over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: One handler per wizard transition plus health checks
//! - **Middleware**: Request ids, tracing and request logging
//! - **Backends**: The port adapters the wizard runs against
//! - **Error Handling**: Consistent error responses
//!
//! Every wizard request carries the full set of raw form fields as a JSON
//! object; the server keeps no per-customer session.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState, Backends};
//!
//! let state = AppState::new(Backends::in_memory(), clock, config)?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notify;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::{Clock, CoreError, HealthCheckable};
use domain_quote::memory::{InMemoryCatalog, InMemoryOrderStore, InMemoryRateTable};
use domain_quote::{
    AgeRateTable, InsuranceCatalog, MessageCatalog, OrderMailer, OrderStore, WizardController,
};
use infra_db::{DatabasePool, PostgresAgeRateTable, PostgresInsuranceCatalog, PostgresOrderStore};

use crate::config::ApiConfig;
use crate::handlers::{health, wizard};
use crate::middleware::request_logging;
use crate::notify::TracingNotifier;

/// The adapters behind the wizard ports
#[derive(Clone)]
pub struct Backends {
    pub catalog: Arc<dyn InsuranceCatalog>,
    pub rates: Arc<dyn AgeRateTable>,
    pub orders: Arc<dyn OrderStore>,
    probes: Vec<Arc<dyn HealthCheckable>>,
}

impl Backends {
    pub fn new<C, R, O>(catalog: Arc<C>, rates: Arc<R>, orders: Arc<O>) -> Self
    where
        C: InsuranceCatalog,
        R: AgeRateTable,
        O: OrderStore,
    {
        let probes = vec![
            catalog.clone() as Arc<dyn HealthCheckable>,
            rates.clone() as Arc<dyn HealthCheckable>,
            orders.clone() as Arc<dyn HealthCheckable>,
        ];
        Self {
            catalog,
            rates,
            orders,
            probes,
        }
    }

    /// In-memory adapters seeded with the sample catalog and rates
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryCatalog::sample()),
            Arc::new(InMemoryRateTable::sample()),
            Arc::new(InMemoryOrderStore::new()),
        )
    }

    /// PostgreSQL adapters sharing one pool
    pub fn postgres(pool: DatabasePool) -> Self {
        Self::new(
            Arc::new(PostgresInsuranceCatalog::new(pool.clone())),
            Arc::new(PostgresAgeRateTable::new(pool.clone())),
            Arc::new(PostgresOrderStore::new(pool)),
        )
    }

    /// Adapters polled by the readiness check
    pub fn probes(&self) -> &[Arc<dyn HealthCheckable>] {
        &self.probes
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub controller: WizardController,
    pub backends: Backends,
    pub mailer: Option<OrderMailer>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the controller to the backends
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` if the configured locale is not
    /// supported
    pub fn new(
        backends: Backends,
        clock: Arc<dyn Clock>,
        config: ApiConfig,
    ) -> Result<Self, CoreError> {
        let messages = MessageCatalog::new(config.locale()?);
        let controller = WizardController::new(
            backends.catalog.clone(),
            backends.rates.clone(),
            backends.orders.clone(),
            clock,
        )
        .with_messages(messages);

        let mailer = config
            .notify_on_order
            .then(|| OrderMailer::new(Arc::new(TracingNotifier::new(config.mail_from.clone()))));

        Ok(Self {
            controller,
            backends,
            mailer,
            config,
        })
    }

    /// Replaces the mailer, e.g. with a recording notifier in tests
    pub fn with_mailer(mut self, mailer: OrderMailer) -> Self {
        self.mailer = Some(mailer);
        self
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Wired controller, backends and configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let wizard_routes = Router::new()
        .route("/start", get(wizard::start))
        .route("/confirm", post(wizard::confirm))
        .route("/estimate", post(wizard::estimate))
        .route("/estimate/back", post(wizard::back_to_input))
        .route("/order", post(wizard::order))
        .route("/order/back", post(wizard::back_to_confirm))
        .layer(axum_middleware::from_fn(request_logging));

    Router::new()
        .merge(health_routes)
        .merge(wizard_routes)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
