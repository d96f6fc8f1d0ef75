//! The contact aggregate: the shape callers read and write.
//!
//! A [`ContactAggregate`] is never stored. Writes decompose it into one
//! [`NewPerson`] plus owned child rows; reads assemble it back from the rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  address::{Address, NewAddress},
  person::{NewPerson, Person},
  phone::{NewPhoneNumber, PhoneNumber},
};

/// One address as it appears inside an aggregate, without id or owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressEntry {
  pub country:      String,
  pub city:         String,
  pub street:       String,
  pub house_number: String,
  #[serde(default)]
  pub apartment:    Option<String>,
}

/// Full name, email, and every address and phone number of one contact.
///
/// The full name doubles as the lookup key for updates and name reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAggregate {
  pub full_name:     String,
  pub email:         String,
  #[serde(default)]
  pub addresses:     Vec<AddressEntry>,
  #[serde(default)]
  pub phone_numbers: Vec<String>,
}

impl AddressEntry {
  pub fn to_new_address(&self, owner: &Person, at: DateTime<Utc>) -> NewAddress {
    NewAddress {
      owner:        owner.id,
      created_date: at,
      country:      self.country.clone(),
      city:         self.city.clone(),
      street:       self.street.clone(),
      house_number: self.house_number.clone(),
      apartment:    self.apartment.clone(),
    }
  }
}

impl From<&Address> for AddressEntry {
  fn from(a: &Address) -> Self {
    Self {
      country:      a.country.clone(),
      city:         a.city.clone(),
      street:       a.street.clone(),
      house_number: a.house_number.clone(),
      apartment:    a.apartment.clone(),
    }
  }
}

impl ContactAggregate {
  /// The person half of the aggregate, with no id and a fresh timestamp.
  pub fn new_person(&self) -> NewPerson {
    NewPerson::new(self.full_name.clone(), self.email.clone())
  }

  /// Address rows for `owner`, one per entry, in input order.
  pub fn new_addresses(&self, owner: &Person, at: DateTime<Utc>) -> Vec<NewAddress> {
    self
      .addresses
      .iter()
      .map(|entry| entry.to_new_address(owner, at))
      .collect()
  }

  /// Phone-number rows for `owner`, one per number, in input order.
  pub fn new_phone_numbers(
    &self,
    owner: &Person,
    at: DateTime<Utc>,
  ) -> Vec<NewPhoneNumber> {
    self
      .phone_numbers
      .iter()
      .map(|number| NewPhoneNumber {
        owner:        owner.id,
        created_date: at,
        phone_number: number.clone(),
      })
      .collect()
  }

  /// Merge a person and its rows into the transfer shape.
  ///
  /// Every row is kept: nothing is filtered or deduplicated.
  pub fn assemble(
    person: &Person,
    addresses: &[Address],
    phone_numbers: &[PhoneNumber],
  ) -> Self {
    Self {
      full_name:     person.full_name.clone(),
      email:         person.email.clone(),
      addresses:     addresses.iter().map(AddressEntry::from).collect(),
      phone_numbers: phone_numbers
        .iter()
        .map(|p| p.phone_number.clone())
        .collect(),
    }
  }
}
