//! The call-site tag accepted by [`Container::set`].

use crate::container::Container;
use std::fmt;

/// Either a literal value or a producer, tagged by the caller.
///
/// `Container::set` accepts both forms under one entry point. A value is
/// stored verbatim and every `get` returns that same instance; a producer is
/// registered as a factory binding and runs on every `get`.
///
/// ```
/// use keyed_ioc::{Container, Entry};
///
/// let container = Container::new();
/// container.set("greeting", Entry::value(String::from("world")));
/// container.set("counter", Entry::factory(|| vec![0u8; 4]));
///
/// assert_eq!(*container.get::<String>("greeting").unwrap(), "world");
/// assert_eq!(container.get::<Vec<u8>>("counter").unwrap().len(), 4);
/// ```
pub enum Entry<T> {
  Value(T),
  Factory(Box<dyn Fn(&Container) -> T + Send + Sync>),
}

impl<T> Entry<T> {
  pub fn value(value: T) -> Self {
    Entry::Value(value)
  }

  pub fn factory(factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
    Entry::Factory(Box::new(move |_: &Container| factory()))
  }

  pub fn factory_with(factory: impl Fn(&Container) -> T + Send + Sync + 'static) -> Self {
    Entry::Factory(Box::new(factory))
  }

  pub fn is_factory(&self) -> bool {
    matches!(self, Entry::Factory(_))
  }
}

impl<T: fmt::Debug> fmt::Debug for Entry<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Entry::Value(value) => f.debug_tuple("Value").field(value).finish(),
      Entry::Factory(_) => f.write_str("Factory(..)"),
    }
  }
}
