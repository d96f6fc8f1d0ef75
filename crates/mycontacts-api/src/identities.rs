//! Handler for `GET /identities`: the raw person rows, ids included.

use std::sync::Arc;

use axum::{Json, extract::State};
use mycontacts_core::{person::Person, service::ContactService, store::Storage};

use crate::error::ApiError;

/// `GET /identities`
pub async fn list<S: Storage>(
  State(service): State<Arc<ContactService<S>>>,
) -> Result<Json<Vec<Person>>, ApiError> {
  Ok(Json(service.get_all_identities().await?))
}
