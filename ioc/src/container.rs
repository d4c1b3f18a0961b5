//! The main `Container` struct and its associated methods.

use crate::core::{self, Binding};
use crate::entry::Entry;
use crate::error::{Error, Result};
use dashmap::DashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The Inversion of Control (IoC) container.
///
/// Holds one binding per string key. A binding is either a factory (run on
/// every resolution), a shared factory (run at most once, then memoized) or a
/// literal value. Registering under an existing key replaces the old binding
/// together with any value it had memoized.
///
/// The container is thread-safe: registration and resolution may happen
/// concurrently from any number of threads.
#[derive(Default)]
pub struct Container {
  bindings: DashMap<String, Arc<Binding>>,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a container seeded with literal values.
  pub fn with_values<K, V, I>(values: I) -> Self
  where
    K: Into<String>,
    V: Any + Send + Sync,
    I: IntoIterator<Item = (K, V)>,
  {
    let container = Self::new();
    for (key, value) in values {
      container.set_value(key, value);
    }
    container
  }

  /// Builder-style variant of [`Container::set_value`].
  pub fn with_value<T: Any + Send + Sync>(self, key: impl Into<String>, value: T) -> Self {
    self.set_value(key, value);
    self
  }

  // --- PRIVATE HELPERS ---

  fn bind(&self, key: impl Into<String>, binding: Binding) {
    let key = key.into();
    let kind = binding.kind();
    let replaced = self.bindings.insert(key.clone(), Arc::new(binding)).is_some();
    tracing::debug!(key = %key, %kind, replaced, "Registered binding");
  }

  // --- PUBLIC API ---

  // --- Factory Registration ---

  /// Registers a producer that runs on every `get`.
  pub fn factory<T: Any + Send + Sync>(
    &self,
    key: impl Into<String>,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) {
    self.bind(key, Binding::factory(core::supplier(factory)));
  }

  /// Registers a producer that receives this container, so it can resolve
  /// other keys.
  pub fn factory_with<T: Any + Send + Sync>(
    &self,
    key: impl Into<String>,
    factory: impl Fn(&Container) -> T + Send + Sync + 'static,
  ) {
    self.bind(key, Binding::factory(core::container_aware(factory)));
  }

  /// Registers a fallible producer. Its error is returned from `get` as is.
  pub fn try_factory<T, E>(
    &self,
    key: impl Into<String>,
    factory: impl Fn(&Container) -> std::result::Result<T, E> + Send + Sync + 'static,
  ) where
    T: Any + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
  {
    self.bind(key, Binding::factory(core::fallible(factory)));
  }

  pub fn factory_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    key: impl Into<String>,
    factory: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) {
    self.bind(key, Binding::factory(core::trait_supplier(factory)));
  }

  // --- Shared Registration ---

  /// Registers a producer that runs once; its result is returned by every
  /// later `get` until the key is registered again.
  pub fn share<T: Any + Send + Sync>(
    &self,
    key: impl Into<String>,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) {
    self.bind(key, Binding::shared(core::supplier(factory)));
  }

  pub fn share_with<T: Any + Send + Sync>(
    &self,
    key: impl Into<String>,
    factory: impl Fn(&Container) -> T + Send + Sync + 'static,
  ) {
    self.bind(key, Binding::shared(core::container_aware(factory)));
  }

  /// Registers a fallible shared producer. A failed run memoizes nothing, so
  /// the next `get` runs the producer again.
  pub fn try_share<T, E>(
    &self,
    key: impl Into<String>,
    factory: impl Fn(&Container) -> std::result::Result<T, E> + Send + Sync + 'static,
  ) where
    T: Any + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
  {
    self.bind(key, Binding::shared(core::fallible(factory)));
  }

  pub fn share_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    key: impl Into<String>,
    factory: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) {
    self.bind(key, Binding::shared(core::trait_supplier(factory)));
  }

  // --- Value Registration ---

  /// Stores a literal. Every `get` returns the same `Arc`.
  pub fn set_value<T: Any + Send + Sync>(&self, key: impl Into<String>, value: T) {
    self.set_arc(key, Arc::new(value));
  }

  /// Stores an existing `Arc` (possibly a trait object) as a literal.
  pub fn set_arc<T: ?Sized + Any + Send + Sync>(&self, key: impl Into<String>, value: Arc<T>) {
    self.bind(key, Binding::value(value));
  }

  /// Stores either a literal or a factory, as tagged by `entry`.
  pub fn set<T: Any + Send + Sync>(&self, key: impl Into<String>, entry: Entry<T>) {
    match entry {
      Entry::Value(value) => self.set_value(key, value),
      Entry::Factory(factory) => self.factory_with(key, factory),
    }
  }

  // --- Resolution ---

  /// Resolves the value bound to `key`.
  ///
  /// # Errors
  ///
  /// - [`Error::NotFound`] if nothing is bound to `key`.
  /// - [`Error::TypeMismatch`] if the binding produces something other than `T`.
  /// - Whatever a fallible producer returned.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
    tracing::trace!(key, "Resolving");

    // Clone the binding out so no shard lock is held while a producer runs.
    let binding = self
      .bindings
      .get(key)
      .map(|entry| Arc::clone(entry.value()))
      .ok_or_else(|| Error::NotFound(key.to_owned()))?;

    binding.resolve(key, self)
  }

  /// Returns whether a binding is registered under `key`. Never resolves.
  pub fn has(&self, key: &str) -> bool {
    self.bindings.contains_key(key)
  }

  // --- Inspection ---

  /// Removes the binding for `key`, returning whether one existed.
  pub fn remove(&self, key: &str) -> bool {
    let removed = self.bindings.remove(key).is_some();
    if removed {
      tracing::debug!(key, "Removed binding");
    }
    removed
  }

  pub fn keys(&self) -> Vec<String> {
    self.bindings.iter().map(|entry| entry.key().clone()).collect()
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }
}

impl<K, V> FromIterator<(K, V)> for Container
where
  K: Into<String>,
  V: Any + Send + Sync,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self::with_values(iter)
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map()
      .entries(
        self
          .bindings
          .iter()
          .map(|entry| (entry.key().clone(), Arc::clone(entry.value()))),
      )
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};

  #[test]
  fn factory_can_register_while_resolving() {
    // A producer holding a shard lock here would deadlock on the insert.
    let container = Container::new();
    container.factory_with("registrar", |c: &Container| {
      c.set_value("registered_late", 7_u8);
      1_u8
    });

    assert_eq!(*container.get::<u8>("registrar").unwrap(), 1);
    assert_eq!(*container.get::<u8>("registered_late").unwrap(), 7);
  }

  #[test]
  fn replaced_binding_keeps_in_flight_resolution() {
    static RUNS: AtomicUsize = AtomicUsize::new(0);
    let container = Container::new();
    container.share_with("entry", |c: &Container| {
      RUNS.fetch_add(1, Ordering::SeqCst);
      c.share("entry", || String::from("world"));
      String::from("hello")
    });

    assert_eq!(*container.get::<String>("entry").unwrap(), "hello");
    assert_eq!(*container.get::<String>("entry").unwrap(), "world");
    assert_eq!(RUNS.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn debug_lists_bindings() {
    let container = Container::new().with_value("answer", 42_u32);
    container.share("lazy", || 1_u32);
    let rendered = format!("{:?}", container);
    assert!(rendered.contains("\"answer\": Value"));
    assert!(rendered.contains("resolved: false"));
  }

  #[test]
  fn remove_forgets_the_binding() {
    let container = Container::new().with_value("db", "my-db");
    assert!(container.remove("db"));
    assert!(!container.remove("db"));
    assert!(container.get::<&str>("db").unwrap_err().is_not_found());
    assert!(container.is_empty());
  }
}
