//! JSON REST API for mycontacts.
//!
//! Exposes an axum [`Router`] backed by a [`ContactService`] over any
//! [`Storage`]. Request validation beyond JSON shape, auth and TLS are not
//! handled here.

pub mod contacts;
pub mod error;
pub mod identities;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{delete, get},
};
use mycontacts_core::{service::ContactService, store::Storage};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `MYCONTACTS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: Arc<ContactService<S>>) -> Router<()>
where
  S: Storage + 'static,
{
  Router::new()
    .route(
      "/contacts",
      get(contacts::list::<S>)
        .post(contacts::create::<S>)
        .put(contacts::update::<S>),
    )
    .route("/contacts/{id}", delete(contacts::delete_one::<S>))
    .route("/contacts/by-name/{name}", get(contacts::by_name::<S>))
    .route("/contacts/by-phone/{phone}", get(contacts::by_phone::<S>))
    .route("/identities", get(identities::list::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────
