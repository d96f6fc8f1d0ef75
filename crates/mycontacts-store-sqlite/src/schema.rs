//! SQL schema for the mycontacts SQLite store.
//!
//! Executed once at connection startup. There is no migration step; the
//! version is recorded in `PRAGMA user_version` only.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Full names are the lookup key for updates and name reads.
CREATE TABLE IF NOT EXISTS persons (
    person_id    TEXT PRIMARY KEY,
    full_name    TEXT NOT NULL UNIQUE,
    email        TEXT NOT NULL,
    created_date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS addresses (
    address_id   TEXT PRIMARY KEY,
    owner_id     TEXT NOT NULL REFERENCES persons(person_id),
    created_date TEXT NOT NULL,
    country      TEXT NOT NULL,
    city         TEXT NOT NULL,
    street       TEXT NOT NULL,
    house_number TEXT NOT NULL,
    apartment    TEXT
);

-- A number belongs to at most one person.
CREATE TABLE IF NOT EXISTS phone_numbers (
    phone_number_id TEXT PRIMARY KEY,
    owner_id        TEXT NOT NULL REFERENCES persons(person_id),
    created_date    TEXT NOT NULL,
    phone_number    TEXT NOT NULL UNIQUE
);

CREATE INDEX IF NOT EXISTS addresses_owner_idx     ON addresses(owner_id);
CREATE INDEX IF NOT EXISTS phone_numbers_owner_idx ON phone_numbers(owner_id);

PRAGMA user_version = 1;
";
