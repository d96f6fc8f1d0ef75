//! Phone-number rows owned by a person.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored phone number. A number has at most one owner at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
  pub id:           Uuid,
  pub owner:        Uuid,
  pub created_date: DateTime<Utc>,
  pub phone_number: String,
}

#[derive(Debug, Clone)]
pub struct NewPhoneNumber {
  pub owner:        Uuid,
  pub created_date: DateTime<Utc>,
  pub phone_number: String,
}
