//! The container-lookup contract.

use crate::container::Container;
use crate::error::Result;
use std::any::Any;
use std::sync::Arc;

/// The read side of a container: check for an entry, resolve an entry.
///
/// Code that only consumes services should depend on `Lookup` rather than on
/// [`Container`], so any conforming container can be substituted.
///
/// ```
/// use keyed_ioc::{Container, Lookup};
///
/// fn database_url(services: &impl Lookup) -> String {
///   services
///     .get::<String>("db.url")
///     .map(|url| url.to_string())
///     .unwrap_or_else(|_| "sqlite::memory:".to_string())
/// }
///
/// let container = Container::new().with_value("db.url", String::from("postgres://localhost"));
/// assert_eq!(database_url(&container), "postgres://localhost");
/// assert_eq!(database_url(&Container::new()), "sqlite::memory:");
/// ```
pub trait Lookup {
  /// Returns whether an entry exists for `id`.
  fn has(&self, id: &str) -> bool;

  /// Resolves the entry for `id`, failing with [`crate::Error::NotFound`] if absent.
  fn get<T: ?Sized + Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>>;
}

impl Lookup for Container {
  fn has(&self, id: &str) -> bool {
    Container::has(self, id)
  }

  fn get<T: ?Sized + Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
    Container::get(self, id)
  }
}

impl<L: Lookup> Lookup for Arc<L> {
  fn has(&self, id: &str) -> bool {
    (**self).has(id)
  }

  fn get<T: ?Sized + Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
    (**self).get(id)
  }
}
