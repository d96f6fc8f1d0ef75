//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | Every contact, unordered |
//! | `POST`   | `/contacts` | Body: [`ContactAggregate`]; returns 201 |
//! | `PUT`    | `/contacts` | Body: [`ContactAggregate`]; replaces by `fullName`, returns 204 |
//! | `DELETE` | `/contacts/:id` | Person id; returns 204 |
//! | `GET`    | `/contacts/by-name/:name` | Exact full-name match |
//! | `GET`    | `/contacts/by-phone/:phone` | Owner of the number |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use mycontacts_core::{
  contact::ContactAggregate,
  service::ContactService,
  store::Storage,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /contacts`
pub async fn list<S: Storage>(
  State(service): State<Arc<ContactService<S>>>,
) -> Result<Json<Vec<ContactAggregate>>, ApiError> {
  Ok(Json(service.get_all_contacts().await?))
}

/// `POST /contacts`
pub async fn create<S: Storage>(
  State(service): State<Arc<ContactService<S>>>,
  Json(body): Json<ContactAggregate>,
) -> Result<StatusCode, ApiError> {
  service.create_contact(body).await?;
  Ok(StatusCode::CREATED)
}

/// `PUT /contacts`
pub async fn update<S: Storage>(
  State(service): State<Arc<ContactService<S>>>,
  Json(body): Json<ContactAggregate>,
) -> Result<StatusCode, ApiError> {
  service.update_contact(body).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /contacts/:id`
pub async fn delete_one<S: Storage>(
  State(service): State<Arc<ContactService<S>>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  service.delete_contact(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /contacts/by-name/:name`
pub async fn by_name<S: Storage>(
  State(service): State<Arc<ContactService<S>>>,
  Path(name): Path<String>,
) -> Result<Json<ContactAggregate>, ApiError> {
  Ok(Json(service.get_contact_by_name(name).await?))
}

/// `GET /contacts/by-phone/:phone`
pub async fn by_phone<S: Storage>(
  State(service): State<Arc<ContactService<S>>>,
  Path(phone): Path<String>,
) -> Result<Json<ContactAggregate>, ApiError> {
  Ok(Json(service.get_contact_by_phone_number(phone).await?))
}
