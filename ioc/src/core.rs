//! Core, non-public data structures for the IoC container.

use crate::container::Container;
use crate::error::{Error, Result};
use once_cell::sync::OnceCell;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A resolved value, type-erased. Always holds an `Arc<T>` for some `T`.
pub(crate) type Instance = Box<dyn Any + Send + Sync>;

/// A normalized producer. Zero-argument, container-aware and fallible
/// producers are all adapted to this one shape at registration time.
pub(crate) type Produce = Box<dyn Fn(&Container) -> Result<Instance> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BindingKind {
  Factory,
  Shared,
  Value,
}

impl fmt::Display for BindingKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      BindingKind::Factory => "factory",
      BindingKind::Shared => "shared",
      BindingKind::Value => "value",
    })
  }
}

pub(crate) enum Binding {
  Factory {
    produce: Produce,
  },
  Shared {
    cell: OnceCell<Instance>,
    produce: Produce,
  },
  Value {
    instance: Instance,
  },
}

impl Binding {
  pub(crate) fn factory(produce: Produce) -> Self {
    Binding::Factory { produce }
  }

  pub(crate) fn shared(produce: Produce) -> Self {
    Binding::Shared {
      cell: OnceCell::new(),
      produce,
    }
  }

  pub(crate) fn value<T: ?Sized + Any + Send + Sync>(value: Arc<T>) -> Self {
    Binding::Value {
      instance: Box::new(value),
    }
  }

  pub(crate) fn kind(&self) -> BindingKind {
    match self {
      Binding::Factory { .. } => BindingKind::Factory,
      Binding::Shared { .. } => BindingKind::Shared,
      Binding::Value { .. } => BindingKind::Value,
    }
  }

  /// Turns this binding into a value of type `T`.
  ///
  /// The caller must not hold any lock on the container's map: producers are
  /// free to call back into `container`.
  pub(crate) fn resolve<T: ?Sized + Any + Send + Sync>(
    &self,
    key: &str,
    container: &Container,
  ) -> Result<Arc<T>> {
    let resolved = match self {
      Binding::Value { instance } => instance.downcast_ref::<Arc<T>>().cloned(),
      Binding::Factory { produce } => produce(container)?
        .downcast::<Arc<T>>()
        .ok()
        .map(|arc_in_a_box| *arc_in_a_box),
      Binding::Shared { cell, produce } => {
        let instance = cell.get_or_try_init(|| {
          tracing::debug!(key, "Initializing shared binding");
          produce(container)
        })?;
        instance.downcast_ref::<Arc<T>>().cloned()
      }
    };

    resolved.ok_or_else(|| Error::TypeMismatch {
      key: key.to_owned(),
      expected: type_name::<T>(),
    })
  }
}

impl fmt::Debug for Binding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Binding::Shared { cell, .. } => f
        .debug_struct("Shared")
        .field("resolved", &cell.get().is_some())
        .finish(),
      Binding::Factory { .. } => f.write_str("Factory"),
      Binding::Value { .. } => f.write_str("Value"),
    }
  }
}

// --- Producer adapters ---

pub(crate) fn supplier<T, F>(factory: F) -> Produce
where
  T: Any + Send + Sync,
  F: Fn() -> T + Send + Sync + 'static,
{
  Box::new(move |_: &Container| -> Result<Instance> {
    Ok(Box::new(Arc::new(factory())))
  })
}

pub(crate) fn container_aware<T, F>(factory: F) -> Produce
where
  T: Any + Send + Sync,
  F: Fn(&Container) -> T + Send + Sync + 'static,
{
  Box::new(move |container: &Container| -> Result<Instance> {
    Ok(Box::new(Arc::new(factory(container))))
  })
}

pub(crate) fn fallible<T, E, F>(factory: F) -> Produce
where
  T: Any + Send + Sync,
  E: std::error::Error + Send + Sync + 'static,
  F: Fn(&Container) -> std::result::Result<T, E> + Send + Sync + 'static,
{
  Box::new(move |container: &Container| -> Result<Instance> {
    match factory(container) {
      Ok(value) => Ok(Box::new(Arc::new(value))),
      Err(err) => Err(Error::from_producer(err)),
    }
  })
}

pub(crate) fn trait_supplier<I, F>(factory: F) -> Produce
where
  I: ?Sized + Any + Send + Sync,
  F: Fn() -> Arc<I> + Send + Sync + 'static,
{
  Box::new(move |_: &Container| -> Result<Instance> { Ok(Box::new(factory())) })
}
