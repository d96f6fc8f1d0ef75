//! Person: the identity anchor of a contact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored person row. The id is assigned by storage on first save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub id:           Uuid,
  pub full_name:    String,
  pub email:        String,
  pub created_date: DateTime<Utc>,
}

/// Input to [`PersonStore::save`](crate::store::PersonStore::save).
///
/// With `id: None` the store assigns a fresh id. With `Some(id)` the row with
/// that id is written in place, or inserted if it does not exist yet.
#[derive(Debug, Clone)]
pub struct NewPerson {
  pub id:           Option<Uuid>,
  pub full_name:    String,
  pub email:        String,
  pub created_date: DateTime<Utc>,
}

impl NewPerson {
  /// A person with no id yet, stamped with the current time.
  pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      id:           None,
      full_name:    full_name.into(),
      email:        email.into(),
      created_date: Utc::now(),
    }
  }

  /// Pin the id, turning the save into a replace of that row.
  pub fn with_id(mut self, id: Uuid) -> Self {
    self.id = Some(id);
    self
  }
}
