//! Admin API.
//!
//! - `GET /admin/status`: version and subscribed config ids
//! - `GET /admin/overrides`: loggers currently overridden and their levels
//! - `PUT /admin/configs/{id}`: push a full snapshot for a config id
//!
//! Every route requires `Authorization: Bearer <api_key>`.

pub mod auth;
pub mod handlers;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::backend::LoggingSystem;
use crate::level::{Level, LoggerName};
use crate::reconcile::LogLevelReconciler;
use crate::source::HttpConfigSource;

/// Read access to the overrides currently in force.
pub trait OverrideView: Send + Sync {
    fn overrides(&self) -> BTreeMap<LoggerName, Option<Level>>;
}

impl<L: LoggingSystem> OverrideView for LogLevelReconciler<L> {
    fn overrides(&self) -> BTreeMap<LoggerName, Option<Level>> {
        LogLevelReconciler::overrides(self)
    }
}

/// State shared by admin handlers.
#[derive(Clone)]
pub struct AdminState {
    pub source: Arc<HttpConfigSource>,
    pub overrides: Arc<dyn OverrideView>,
    pub api_key: Arc<str>,
}

pub fn setup_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/overrides", get(get_overrides))
        .route("/admin/configs/{id}", put(put_config))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
