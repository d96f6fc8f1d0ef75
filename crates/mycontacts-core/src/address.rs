//! Address rows owned by a person.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored address. `owner` is the id of the [`Person`](crate::person::Person)
/// it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
  pub id:           Uuid,
  pub owner:        Uuid,
  pub created_date: DateTime<Utc>,
  pub country:      String,
  pub city:         String,
  pub street:       String,
  pub house_number: String,
  pub apartment:    Option<String>,
}

/// An address about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAddress {
  pub owner:        Uuid,
  pub created_date: DateTime<Utc>,
  pub country:      String,
  pub city:         String,
  pub street:       String,
  pub house_number: String,
  pub apartment:    Option<String>,
}
