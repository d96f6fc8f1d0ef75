//! Core types and trait definitions for the mycontacts aggregate service.
//!
//! A contact is one [`Person`](person::Person) plus the
//! [`Address`](address::Address) and [`PhoneNumber`](phone::PhoneNumber) rows
//! it owns. This crate knows nothing about SQL or HTTP: storage backends
//! implement the traits in [`store`], and [`service::ContactService`] keeps the
//! three collections consistent on top of them.

pub mod address;
pub mod contact;
pub mod error;
pub mod person;
pub mod phone;
pub mod service;
pub mod store;

pub use error::{Error, Result};
