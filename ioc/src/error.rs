//! Error types returned by container operations.

use thiserror::Error;

/// The error type for `keyed_ioc` operations.
#[derive(Debug, Error)]
pub enum Error {
  /// No binding is registered under the requested key.
  #[error("No entry was found for key '{0}'")]
  NotFound(String),

  /// `get_instance` was called before any container was set.
  #[error("No global container instance has been set")]
  NotBound,

  /// A binding exists for the key but it holds a value of another type.
  #[error("Entry '{key}' does not hold a value of type {expected}")]
  TypeMismatch { key: String, expected: &'static str },

  /// A fallible producer failed. Display and source are the producer's own.
  #[error(transparent)]
  Producer(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Returns `true` for the "entry not found" category of the lookup contract.
  pub fn is_not_found(&self) -> bool {
    matches!(self, Error::NotFound(_))
  }

  /// Downcasts a producer failure back to the concrete error the producer returned.
  pub fn producer_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
    match self {
      Error::Producer(inner) => inner.downcast_ref::<E>(),
      _ => None,
    }
  }

  // A producer that fails with one of our own errors (typically a nested
  // `NotFound`) hands it back unchanged instead of nesting it.
  pub(crate) fn from_producer<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
    match boxed.downcast::<Error>() {
      Ok(own) => *own,
      Err(other) => Error::Producer(other),
    }
  }
}

/// A specialized `Result` type for `keyed_ioc` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use std::fmt;

  #[derive(Debug)]
  struct Disconnected;

  impl fmt::Display for Disconnected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str("database disconnected")
    }
  }

  impl std::error::Error for Disconnected {}

  #[test]
  fn foreign_errors_keep_their_message() {
    let err = Error::from_producer(Disconnected);
    assert_eq!(err.to_string(), "database disconnected");
    assert!(err.producer_error::<Disconnected>().is_some());
    assert!(!err.is_not_found());
  }

  #[test]
  fn own_errors_are_not_nested() {
    let err = Error::from_producer(Error::NotFound("db".to_string()));
    assert!(matches!(err, Error::NotFound(ref key) if key == "db"));
    assert!(err.is_not_found());
  }
}
