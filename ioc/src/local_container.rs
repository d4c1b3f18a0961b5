// ioc/src/local_container.rs

//! A single-threaded, non-thread-safe Inversion of Control container.

use crate::core::BindingKind;
use crate::error::{Error, Result};
use once_cell::unsync::OnceCell;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

type LocalInstance = Box<dyn Any>;
type LocalProduce = Box<dyn Fn(&LocalContainer) -> Result<LocalInstance>>;

// A local, non-thread-safe version of the binding enum.
// It uses `Rc` and `unsync::OnceCell`.
enum LocalBinding {
  Factory {
    produce: LocalProduce,
  },
  Shared {
    cell: OnceCell<LocalInstance>,
    produce: LocalProduce,
  },
  Value {
    instance: LocalInstance,
  },
}

impl LocalBinding {
  fn kind(&self) -> BindingKind {
    match self {
      LocalBinding::Factory { .. } => BindingKind::Factory,
      LocalBinding::Shared { .. } => BindingKind::Shared,
      LocalBinding::Value { .. } => BindingKind::Value,
    }
  }
}

/// A single-threaded, non-thread-safe Inversion of Control (IoC) container.
///
/// Same binding model as [`crate::Container`], keyed by string, but backed by
/// a `HashMap` and `Rc`. A key advantage is that it can store types that are
/// not `Send` or `Sync`.
///
/// # Note on API
///
/// Registration methods take `&mut self`, while resolution only needs
/// `&self`. Container-aware producers therefore can resolve other keys but
/// cannot register new ones.
#[derive(Default)]
pub struct LocalContainer {
  bindings: HashMap<String, Rc<LocalBinding>>,
}

impl LocalContainer {
  /// Creates a new, empty `LocalContainer`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_value<T: Any>(mut self, key: impl Into<String>, value: T) -> Self {
    self.set_value(key, value);
    self
  }

  // --- PRIVATE HELPERS ---

  fn bind(&mut self, key: impl Into<String>, binding: LocalBinding) {
    let key = key.into();
    let kind = binding.kind();
    let replaced = self.bindings.insert(key.clone(), Rc::new(binding)).is_some();
    tracing::debug!(key = %key, %kind, replaced, "Registered local binding");
  }

  fn bind_factory(&mut self, key: impl Into<String>, produce: LocalProduce) {
    self.bind(key, LocalBinding::Factory { produce });
  }

  fn bind_shared(&mut self, key: impl Into<String>, produce: LocalProduce) {
    self.bind(
      key,
      LocalBinding::Shared {
        cell: OnceCell::new(),
        produce,
      },
    );
  }

  // --- PUBLIC API ---

  // --- Factory Registration ---
  pub fn factory<T: Any>(&mut self, key: impl Into<String>, factory: impl Fn() -> T + 'static) {
    self.bind_factory(key, Box::new(move |_: &LocalContainer| -> Result<LocalInstance> {
      Ok(Box::new(Rc::new(factory())))
    }));
  }

  pub fn factory_with<T: Any>(
    &mut self,
    key: impl Into<String>,
    factory: impl Fn(&LocalContainer) -> T + 'static,
  ) {
    self.bind_factory(key, Box::new(move |c: &LocalContainer| -> Result<LocalInstance> {
      Ok(Box::new(Rc::new(factory(c))))
    }));
  }

  pub fn try_factory<T, E>(
    &mut self,
    key: impl Into<String>,
    factory: impl Fn(&LocalContainer) -> std::result::Result<T, E> + 'static,
  ) where
    T: Any,
    E: std::error::Error + Send + Sync + 'static,
  {
    self.bind_factory(
      key,
      Box::new(move |c: &LocalContainer| -> Result<LocalInstance> {
        match factory(c) {
          Ok(value) => Ok(Box::new(Rc::new(value))),
          Err(err) => Err(Error::from_producer(err)),
        }
      }),
    );
  }

  pub fn factory_trait<I: ?Sized + Any>(
    &mut self,
    key: impl Into<String>,
    factory: impl Fn() -> Rc<I> + 'static,
  ) {
    self.bind_factory(key, Box::new(move |_: &LocalContainer| -> Result<LocalInstance> {
      Ok(Box::new(factory()))
    }));
  }

  // --- Shared Registration ---
  pub fn share<T: Any>(&mut self, key: impl Into<String>, factory: impl Fn() -> T + 'static) {
    self.bind_shared(key, Box::new(move |_: &LocalContainer| -> Result<LocalInstance> {
      Ok(Box::new(Rc::new(factory())))
    }));
  }

  pub fn share_with<T: Any>(
    &mut self,
    key: impl Into<String>,
    factory: impl Fn(&LocalContainer) -> T + 'static,
  ) {
    self.bind_shared(key, Box::new(move |c: &LocalContainer| -> Result<LocalInstance> {
      Ok(Box::new(Rc::new(factory(c))))
    }));
  }

  pub fn try_share<T, E>(
    &mut self,
    key: impl Into<String>,
    factory: impl Fn(&LocalContainer) -> std::result::Result<T, E> + 'static,
  ) where
    T: Any,
    E: std::error::Error + Send + Sync + 'static,
  {
    self.bind_shared(
      key,
      Box::new(move |c: &LocalContainer| -> Result<LocalInstance> {
        match factory(c) {
          Ok(value) => Ok(Box::new(Rc::new(value))),
          Err(err) => Err(Error::from_producer(err)),
        }
      }),
    );
  }

  pub fn share_trait<I: ?Sized + Any>(
    &mut self,
    key: impl Into<String>,
    factory: impl Fn() -> Rc<I> + 'static,
  ) {
    self.bind_shared(key, Box::new(move |_: &LocalContainer| -> Result<LocalInstance> {
      Ok(Box::new(factory()))
    }));
  }

  // --- Value Registration ---
  pub fn set_value<T: Any>(&mut self, key: impl Into<String>, value: T) {
    self.set_rc(key, Rc::new(value));
  }

  pub fn set_rc<T: ?Sized + Any>(&mut self, key: impl Into<String>, value: Rc<T>) {
    let instance: LocalInstance = Box::new(value);
    self.bind(key, LocalBinding::Value { instance });
  }

  // --- Resolution ---

  /// Resolves the value bound to `key`.
  ///
  /// Fails with [`Error::NotFound`] for unknown keys and
  /// [`Error::TypeMismatch`] when the binding holds another type.
  pub fn get<T: ?Sized + Any>(&self, key: &str) -> Result<Rc<T>> {
    tracing::trace!(key, "Resolving local");

    let binding = self
      .bindings
      .get(key)
      .cloned()
      .ok_or_else(|| Error::NotFound(key.to_owned()))?;

    let resolved = match &*binding {
      LocalBinding::Value { instance } => instance.downcast_ref::<Rc<T>>().cloned(),
      LocalBinding::Factory { produce } => produce(self)?
        .downcast::<Rc<T>>()
        .ok()
        .map(|rc_in_a_box| *rc_in_a_box),
      LocalBinding::Shared { cell, produce } => cell
        .get_or_try_init(|| produce(self))?
        .downcast_ref::<Rc<T>>()
        .cloned(),
    };

    resolved.ok_or_else(|| Error::TypeMismatch {
      key: key.to_owned(),
      expected: type_name::<T>(),
    })
  }

  pub fn has(&self, key: &str) -> bool {
    self.bindings.contains_key(key)
  }

  pub fn remove(&mut self, key: &str) -> bool {
    self.bindings.remove(key).is_some()
  }

  pub fn keys(&self) -> Vec<String> {
    self.bindings.keys().cloned().collect()
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }
}

impl fmt::Debug for LocalContainer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map()
      .entries(self.bindings.iter().map(|(key, binding)| (key, binding.kind())))
      .finish()
  }
}
