//! Error types for `mycontacts-core`.

use thiserror::Error;

/// Every failure the contact service can report.
///
/// The three `*NotFound` kinds are caller-input errors: the requested entity
/// does not exist and retrying will not change that. Anything the storage
/// layer raises (I/O, constraint violations, aborted transactions) surfaces as
/// [`Error::Storage`].
#[derive(Debug, Error)]
pub enum Error {
  /// No person for the given id or full name.
  #[error("user not found: {0}")]
  UserNotFound(String),

  /// No phone-number row for the given number.
  #[error("phone number not found: {0}")]
  PhoneNumberNotFound(String),

  /// Reserved for address-specific lookups; no operation raises it yet.
  #[error("address not found: {0}")]
  AddressNotFound(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// `true` for the kinds that mean "the requested entity does not exist".
  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      Self::UserNotFound(_) | Self::PhoneNumberNotFound(_) | Self::AddressNotFound(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn not_found_kinds_are_classified() {
    assert!(Error::UserNotFound("Ann Lee".into()).is_not_found());
    assert!(Error::PhoneNumberNotFound("555-1111".into()).is_not_found());
    assert!(Error::AddressNotFound("x".into()).is_not_found());

    let io = std::io::Error::other("disk on fire");
    assert!(!Error::Storage(Box::new(io)).is_not_found());
  }

  #[test]
  fn messages_name_the_missing_key() {
    let err = Error::PhoneNumberNotFound("555-1111".into());
    assert_eq!(err.to_string(), "phone number not found: 555-1111");
  }
}
