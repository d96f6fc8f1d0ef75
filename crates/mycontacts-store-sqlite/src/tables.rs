//! [`SqliteTables`]: the collection traits over one open transaction.

use mycontacts_core::{
  address::{Address, NewAddress},
  person::{NewPerson, Person},
  phone::{NewPhoneNumber, PhoneNumber},
  store::{AddressStore, PersonStore, PhoneNumberStore, UnitOfWork},
};
use rusqlite::{Connection, OptionalExtension as _};
use uuid::Uuid;

use crate::{
  Result,
  encode::{RawAddress, RawPerson, RawPhoneNumber, encode_dt, encode_uuid},
};

/// Borrowed view of a connection that is inside a transaction.
///
/// Built by [`SqliteStore`](crate::SqliteStore) for the duration of one
/// `transaction` call; never outlives it.
pub struct SqliteTables<'c> {
  conn: &'c Connection,
}

impl<'c> SqliteTables<'c> {
  pub fn new(conn: &'c Connection) -> Self { Self { conn } }

  // ── persons ───────────────────────────────────────────────────────────────

  fn save_person(&self, input: NewPerson) -> Result<Person> {
    let person = Person {
      id:           input.id.unwrap_or_else(Uuid::new_v4),
      full_name:    input.full_name,
      email:        input.email,
      created_date: input.created_date,
    };

    // Upsert on the id: a replace keeps the row (and its id) in place.
    self.conn.execute(
      "INSERT INTO persons (person_id, full_name, email, created_date)
       VALUES (?1, ?2, ?3, ?4)
       ON CONFLICT(person_id) DO UPDATE SET
         full_name    = excluded.full_name,
         email        = excluded.email,
         created_date = excluded.created_date",
      rusqlite::params![
        encode_uuid(person.id),
        person.full_name,
        person.email,
        encode_dt(person.created_date),
      ],
    )?;

    Ok(person)
  }

  fn query_person(&self, clause: &str, key: &str) -> Result<Option<Person>> {
    let sql = format!("SELECT {} FROM persons WHERE {clause} = ?1", RawPerson::COLUMNS);
    let raw = self
      .conn
      .query_row(&sql, rusqlite::params![key], RawPerson::from_row)
      .optional()?;
    raw.map(RawPerson::into_person).transpose()
  }

  fn all_persons(&self) -> Result<Vec<Person>> {
    let sql = format!("SELECT {} FROM persons", RawPerson::COLUMNS);
    let mut stmt = self.conn.prepare(&sql)?;
    let raws = stmt
      .query_map([], RawPerson::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawPerson::into_person).collect()
  }

  fn delete_person(&self, person: &Person) -> Result<()> {
    self.conn.execute(
      "DELETE FROM persons WHERE person_id = ?1",
      rusqlite::params![encode_uuid(person.id)],
    )?;
    Ok(())
  }

  // ── addresses ─────────────────────────────────────────────────────────────

  fn insert_addresses(&self, inputs: Vec<NewAddress>) -> Result<Vec<Address>> {
    let mut stmt = self.conn.prepare(
      "INSERT INTO addresses (
         address_id, owner_id, created_date,
         country, city, street, house_number, apartment
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;

    let mut saved = Vec::with_capacity(inputs.len());
    for input in inputs {
      let address = Address {
        id:           Uuid::new_v4(),
        owner:        input.owner,
        created_date: input.created_date,
        country:      input.country,
        city:         input.city,
        street:       input.street,
        house_number: input.house_number,
        apartment:    input.apartment,
      };
      stmt.execute(rusqlite::params![
        encode_uuid(address.id),
        encode_uuid(address.owner),
        encode_dt(address.created_date),
        address.country,
        address.city,
        address.street,
        address.house_number,
        address.apartment,
      ])?;
      saved.push(address);
    }
    Ok(saved)
  }

  fn addresses_of(&self, owner: &Person) -> Result<Vec<Address>> {
    let sql = format!(
      "SELECT {} FROM addresses WHERE owner_id = ?1 ORDER BY rowid",
      RawAddress::COLUMNS
    );
    let mut stmt = self.conn.prepare(&sql)?;
    let raws = stmt
      .query_map(rusqlite::params![encode_uuid(owner.id)], RawAddress::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawAddress::into_address).collect()
  }

  // ── phone numbers ─────────────────────────────────────────────────────────

  fn insert_phone_numbers(
    &self,
    inputs: Vec<NewPhoneNumber>,
  ) -> Result<Vec<PhoneNumber>> {
    let mut stmt = self.conn.prepare(
      "INSERT INTO phone_numbers (phone_number_id, owner_id, created_date, phone_number)
       VALUES (?1, ?2, ?3, ?4)",
    )?;

    let mut saved = Vec::with_capacity(inputs.len());
    for input in inputs {
      let number = PhoneNumber {
        id:           Uuid::new_v4(),
        owner:        input.owner,
        created_date: input.created_date,
        phone_number: input.phone_number,
      };
      stmt.execute(rusqlite::params![
        encode_uuid(number.id),
        encode_uuid(number.owner),
        encode_dt(number.created_date),
        number.phone_number,
      ])?;
      saved.push(number);
    }
    Ok(saved)
  }

  fn phone_numbers_of(&self, owner: &Person) -> Result<Vec<PhoneNumber>> {
    let sql = format!(
      "SELECT {} FROM phone_numbers WHERE owner_id = ?1 ORDER BY rowid",
      RawPhoneNumber::COLUMNS
    );
    let mut stmt = self.conn.prepare(&sql)?;
    let raws = stmt
      .query_map(rusqlite::params![encode_uuid(owner.id)], RawPhoneNumber::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawPhoneNumber::into_phone_number).collect()
  }

  fn phone_number_by_value(&self, number: &str) -> Result<Option<PhoneNumber>> {
    let sql = format!(
      "SELECT {} FROM phone_numbers WHERE phone_number = ?1",
      RawPhoneNumber::COLUMNS
    );
    let raw = self
      .conn
      .query_row(&sql, rusqlite::params![number], RawPhoneNumber::from_row)
      .optional()?;
    raw.map(RawPhoneNumber::into_phone_number).transpose()
  }

  // ── shared ────────────────────────────────────────────────────────────────

  /// `table` is always one of our own literals, never caller input.
  fn delete_owned(&self, table: &str, owner: &Person) -> Result<usize> {
    let removed = self.conn.execute(
      &format!("DELETE FROM {table} WHERE owner_id = ?1"),
      rusqlite::params![encode_uuid(owner.id)],
    )?;
    tracing::debug!(table, owner = %owner.id, removed, "deleted owned rows");
    Ok(removed)
  }
}

// ─── Collection impls ────────────────────────────────────────────────────────

impl PersonStore for SqliteTables<'_> {
  fn save(&self, person: NewPerson) -> mycontacts_core::Result<Person> {
    Ok(self.save_person(person)?)
  }

  fn find_by_id(&self, id: Uuid) -> mycontacts_core::Result<Option<Person>> {
    Ok(self.query_person("person_id", &encode_uuid(id))?)
  }

  fn find_by_full_name(
    &self,
    full_name: &str,
  ) -> mycontacts_core::Result<Option<Person>> {
    Ok(self.query_person("full_name", full_name)?)
  }

  fn find_all(&self) -> mycontacts_core::Result<Vec<Person>> {
    Ok(self.all_persons()?)
  }

  fn delete(&self, person: &Person) -> mycontacts_core::Result<()> {
    Ok(self.delete_person(person)?)
  }
}

impl AddressStore for SqliteTables<'_> {
  fn save_all(
    &self,
    addresses: Vec<NewAddress>,
  ) -> mycontacts_core::Result<Vec<Address>> {
    Ok(self.insert_addresses(addresses)?)
  }

  fn find_all_by_owner(&self, owner: &Person) -> mycontacts_core::Result<Vec<Address>> {
    Ok(self.addresses_of(owner)?)
  }

  fn delete_all_by_owner(&self, owner: &Person) -> mycontacts_core::Result<()> {
    self.delete_owned("addresses", owner)?;
    Ok(())
  }
}

impl PhoneNumberStore for SqliteTables<'_> {
  fn save_all(
    &self,
    numbers: Vec<NewPhoneNumber>,
  ) -> mycontacts_core::Result<Vec<PhoneNumber>> {
    Ok(self.insert_phone_numbers(numbers)?)
  }

  fn find_all_by_owner(
    &self,
    owner: &Person,
  ) -> mycontacts_core::Result<Vec<PhoneNumber>> {
    Ok(self.phone_numbers_of(owner)?)
  }

  fn find_by_number(&self, number: &str) -> mycontacts_core::Result<Option<PhoneNumber>> {
    Ok(self.phone_number_by_value(number)?)
  }

  fn delete_all_by_owner(&self, owner: &Person) -> mycontacts_core::Result<()> {
    self.delete_owned("phone_numbers", owner)?;
    Ok(())
  }
}

impl UnitOfWork for SqliteTables<'_> {
  fn persons(&self) -> &dyn PersonStore { self }

  fn addresses(&self) -> &dyn AddressStore { self }

  fn phone_numbers(&self) -> &dyn PhoneNumberStore { self }
}
