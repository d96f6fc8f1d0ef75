//! Storage collection traits and the unit-of-work boundary.
//!
//! The three collection traits are synchronous and only ever used inside a
//! [`Storage::transaction`] call, which is what makes a multi-collection
//! operation atomic. Backends (e.g. `mycontacts-store-sqlite`) implement all
//! of them; [`ContactService`](crate::service::ContactService) depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  address::{Address, NewAddress},
  person::{NewPerson, Person},
  phone::{NewPhoneNumber, PhoneNumber},
};

// ─── Collections ─────────────────────────────────────────────────────────────

pub trait PersonStore {
  /// Persist `person`. Assigns a fresh id when `person.id` is `None`;
  /// otherwise writes that row in place (inserting it if absent).
  fn save(&self, person: NewPerson) -> Result<Person>;

  fn find_by_id(&self, id: Uuid) -> Result<Option<Person>>;

  /// Exact, case-sensitive match on the full name.
  fn find_by_full_name(&self, full_name: &str) -> Result<Option<Person>>;

  /// Every stored person, in no particular order.
  fn find_all(&self) -> Result<Vec<Person>>;

  /// Delete the person row. Fails if child rows still reference it.
  fn delete(&self, person: &Person) -> Result<()>;
}

pub trait AddressStore {
  fn save_all(&self, addresses: Vec<NewAddress>) -> Result<Vec<Address>>;

  /// All addresses owned by `owner`, in insertion order.
  fn find_all_by_owner(&self, owner: &Person) -> Result<Vec<Address>>;

  fn delete_all_by_owner(&self, owner: &Person) -> Result<()>;
}

pub trait PhoneNumberStore {
  fn save_all(&self, numbers: Vec<NewPhoneNumber>) -> Result<Vec<PhoneNumber>>;

  /// All numbers owned by `owner`, in insertion order.
  fn find_all_by_owner(&self, owner: &Person) -> Result<Vec<PhoneNumber>>;

  fn find_by_number(&self, number: &str) -> Result<Option<PhoneNumber>>;

  fn delete_all_by_owner(&self, owner: &Person) -> Result<()>;
}

// ─── Unit of work ────────────────────────────────────────────────────────────

/// The three collections as seen from inside one transaction.
pub trait UnitOfWork {
  fn persons(&self) -> &dyn PersonStore;
  fn addresses(&self) -> &dyn AddressStore;
  fn phone_numbers(&self) -> &dyn PhoneNumberStore;
}

/// A backend that can run work atomically.
///
/// Implementations must commit when `work` returns `Ok` and roll back every
/// write `work` made when it returns `Err` or when the commit itself fails.
/// The returned future is `Send` so the service can be shared across a
/// multi-threaded runtime (e.g. tokio with `axum`).
pub trait Storage: Send + Sync {
  fn transaction<T, F>(&self, work: F) -> impl Future<Output = Result<T>> + Send + '_
  where
    T: Send + 'static,
    F: FnOnce(&dyn UnitOfWork) -> Result<T> + Send + 'static;
}
