//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings; UUIDs are hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use mycontacts_core::{address::Address, person::Person, phone::PhoneNumber};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `persons` row.
pub struct RawPerson {
  pub person_id:    String,
  pub full_name:    String,
  pub email:        String,
  pub created_date: String,
}

impl RawPerson {
  pub const COLUMNS: &'static str = "person_id, full_name, email, created_date";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id:    row.get(0)?,
      full_name:    row.get(1)?,
      email:        row.get(2)?,
      created_date: row.get(3)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:           decode_uuid(&self.person_id)?,
      full_name:    self.full_name,
      email:        self.email,
      created_date: decode_dt(&self.created_date)?,
    })
  }
}

/// Raw strings read directly from an `addresses` row.
pub struct RawAddress {
  pub address_id:   String,
  pub owner_id:     String,
  pub created_date: String,
  pub country:      String,
  pub city:         String,
  pub street:       String,
  pub house_number: String,
  pub apartment:    Option<String>,
}

impl RawAddress {
  pub const COLUMNS: &'static str =
    "address_id, owner_id, created_date, country, city, street, house_number, apartment";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      address_id:   row.get(0)?,
      owner_id:     row.get(1)?,
      created_date: row.get(2)?,
      country:      row.get(3)?,
      city:         row.get(4)?,
      street:       row.get(5)?,
      house_number: row.get(6)?,
      apartment:    row.get(7)?,
    })
  }

  pub fn into_address(self) -> Result<Address> {
    Ok(Address {
      id:           decode_uuid(&self.address_id)?,
      owner:        decode_uuid(&self.owner_id)?,
      created_date: decode_dt(&self.created_date)?,
      country:      self.country,
      city:         self.city,
      street:       self.street,
      house_number: self.house_number,
      apartment:    self.apartment,
    })
  }
}

/// Raw strings read directly from a `phone_numbers` row.
pub struct RawPhoneNumber {
  pub phone_number_id: String,
  pub owner_id:        String,
  pub created_date:    String,
  pub phone_number:    String,
}

impl RawPhoneNumber {
  pub const COLUMNS: &'static str =
    "phone_number_id, owner_id, created_date, phone_number";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      phone_number_id: row.get(0)?,
      owner_id:        row.get(1)?,
      created_date:    row.get(2)?,
      phone_number:    row.get(3)?,
    })
  }

  pub fn into_phone_number(self) -> Result<PhoneNumber> {
    Ok(PhoneNumber {
      id:           decode_uuid(&self.phone_number_id)?,
      owner:        decode_uuid(&self.owner_id)?,
      created_date: decode_dt(&self.created_date)?,
      phone_number: self.phone_number,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dt_roundtrips_through_rfc3339() {
    let now = Utc::now();
    assert_eq!(decode_dt(&encode_dt(now)).unwrap(), now);
  }

  #[test]
  fn bad_dt_is_a_parse_error() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }

  #[test]
  fn bad_uuid_is_rejected() {
    assert!(matches!(decode_uuid("not-a-uuid"), Err(Error::Uuid(_))));
  }
}
