//! [`ContactService`]: keeps a person and its child rows consistent.
//!
//! Every operation runs as one [`Storage::transaction`], so callers never
//! observe a person with only some of its children, or children without a
//! person.

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  contact::ContactAggregate,
  person::{NewPerson, Person},
  store::{Storage, UnitOfWork},
};

/// The contact aggregate service over a storage backend `S`.
#[derive(Debug, Clone)]
pub struct ContactService<S> {
  storage: S,
}

impl<S: Storage> ContactService<S> {
  pub fn new(storage: S) -> Self { Self { storage } }

  pub fn storage(&self) -> &S { &self.storage }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Insert a new person and one row per address and phone number.
  pub async fn create_contact(&self, contact: ContactAggregate) -> Result<()> {
    let person = self
      .storage
      .transaction(move |uow| {
        let person = uow.persons().save(contact.new_person())?;
        save_children(uow, &person, &contact)?;
        Ok(person)
      })
      .await?;

    tracing::info!(person_id = %person.id, full_name = %person.full_name, "created contact");
    Ok(())
  }

  /// Delete a person and everything it owns. Children go first.
  pub async fn delete_contact(&self, id: Uuid) -> Result<()> {
    self
      .storage
      .transaction(move |uow| {
        let person = uow
          .persons()
          .find_by_id(id)?
          .ok_or_else(|| Error::UserNotFound(id.to_string()))?;
        delete_children(uow, &person)?;
        uow.persons().delete(&person)
      })
      .await?;

    tracing::info!(person_id = %id, "deleted contact");
    Ok(())
  }

  /// Replace the contact whose full name matches `contact.full_name`.
  ///
  /// The person keeps its id; email and creation timestamp are overwritten and
  /// every previously stored address and phone number is discarded, then the
  /// children in `contact` are inserted. Nothing is merged.
  pub async fn update_contact(&self, contact: ContactAggregate) -> Result<()> {
    let id = self
      .storage
      .transaction(move |uow| {
        let existing = uow
          .persons()
          .find_by_full_name(&contact.full_name)?
          .ok_or_else(|| Error::UserNotFound(contact.full_name.clone()))?;
        delete_children(uow, &existing)?;

        let replacement = NewPerson::new(contact.full_name.clone(), contact.email.clone())
          .with_id(existing.id);
        let person = uow.persons().save(replacement)?;
        save_children(uow, &person, &contact)?;
        Ok(person.id)
      })
      .await?;

    tracing::info!(person_id = %id, "replaced contact");
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// Every stored contact, assembled. Order is whatever storage yields.
  pub async fn get_all_contacts(&self) -> Result<Vec<ContactAggregate>> {
    self
      .storage
      .transaction(|uow| {
        uow
          .persons()
          .find_all()?
          .iter()
          .map(|person| assemble(uow, person))
          .collect()
      })
      .await
  }

  /// The contact owning `number`, with all of its numbers re-read.
  pub async fn get_contact_by_phone_number(
    &self,
    number: impl Into<String>,
  ) -> Result<ContactAggregate> {
    let number = number.into();
    self
      .storage
      .transaction(move |uow| {
        let active = uow
          .phone_numbers()
          .find_by_number(&number)?
          .ok_or_else(|| Error::PhoneNumberNotFound(number.clone()))?;
        let owner = uow
          .persons()
          .find_by_id(active.owner)?
          .ok_or_else(|| Error::UserNotFound(active.owner.to_string()))?;
        assemble(uow, &owner)
      })
      .await
  }

  /// The contact whose full name is exactly `full_name`.
  pub async fn get_contact_by_name(
    &self,
    full_name: impl Into<String>,
  ) -> Result<ContactAggregate> {
    let full_name = full_name.into();
    self
      .storage
      .transaction(move |uow| {
        let person = uow
          .persons()
          .find_by_full_name(&full_name)?
          .ok_or_else(|| Error::UserNotFound(full_name.clone()))?;
        assemble(uow, &person)
      })
      .await
  }

  /// The raw person rows, ids included.
  ///
  /// Lower level than [`get_all_contacts`](Self::get_all_contacts): no
  /// children are read. Callers use it to learn the ids that
  /// [`delete_contact`](Self::delete_contact) takes.
  pub async fn get_all_identities(&self) -> Result<Vec<Person>> {
    self
      .storage
      .transaction(|uow| uow.persons().find_all())
      .await
  }
}

// ─── Shared steps ────────────────────────────────────────────────────────────

fn save_children(
  uow: &dyn UnitOfWork,
  person: &Person,
  contact: &ContactAggregate,
) -> Result<()> {
  let now = Utc::now();
  uow
    .phone_numbers()
    .save_all(contact.new_phone_numbers(person, now))?;
  uow.addresses().save_all(contact.new_addresses(person, now))?;
  Ok(())
}

fn delete_children(uow: &dyn UnitOfWork, person: &Person) -> Result<()> {
  uow.addresses().delete_all_by_owner(person)?;
  uow.phone_numbers().delete_all_by_owner(person)?;
  Ok(())
}

/// Read the person's addresses and phone numbers and merge them.
fn assemble(uow: &dyn UnitOfWork, person: &Person) -> Result<ContactAggregate> {
  let addresses = uow.addresses().find_all_by_owner(person)?;
  let phone_numbers = uow.phone_numbers().find_all_by_owner(person)?;
  Ok(ContactAggregate::assemble(person, &addresses, &phone_numbers))
}
