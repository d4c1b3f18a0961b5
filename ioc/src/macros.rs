//! Public macros for ergonomic service resolution.
//!
//! Every macro takes the key as anything that is `AsRef<str>`: a literal, a
//! `String`, or a borrowed `format!` result.

/// Resolves an entry from the global container instance.
///
/// # Panics
///
/// Panics if no global instance was set, if the key is unbound, if the entry
/// holds another type, or if its producer fails. For a non-panicking version,
/// use [`maybe_resolve!`] or `get_instance()?.get(...)`.
///
/// # Examples
///
/// ```
/// use keyed_ioc::{resolve, set_instance, Container};
/// use std::sync::Arc;
///
/// let container = Container::new();
/// container.share("greeting", || String::from("hello"));
/// set_instance(Arc::new(container));
///
/// let message = resolve!(String, "greeting");
/// assert_eq!(*message, "hello");
/// ```
///
/// ```
/// use keyed_ioc::{resolve, set_instance, Container};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// let container = Container::new();
/// container.share_trait::<dyn Greeter>("greeter", || Arc::new(EnglishGreeter));
/// set_instance(Arc::new(container));
///
/// let greeter = resolve!(trait Greeter, "greeter");
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  // Arm for resolving a trait object: resolve!(trait MyTrait, "key")
  // `:ident` captures the trait's name so `dyn Trait` can be built here.
  (trait $trait_ident:ident, $key:expr) => {
    match $key {
      key => {
        let key: &str = ::std::convert::AsRef::<str>::as_ref(&key);
        $crate::get_instance()
          .and_then(|container| container.get::<dyn $trait_ident>(key))
          .unwrap_or_else(|err| {
            panic!(
              "Failed to resolve required trait entry '{}' as {}: {}",
              key,
              ::std::any::type_name::<dyn $trait_ident>(),
              err
            )
          })
      }
    }
  };

  // Arm for resolving a concrete type: resolve!(MyService, "key")
  ($type:ty, $key:expr) => {
    match $key {
      key => {
        let key: &str = ::std::convert::AsRef::<str>::as_ref(&key);
        $crate::get_instance()
          .and_then(|container| container.get::<$type>(key))
          .unwrap_or_else(|err| {
            panic!(
              "Failed to resolve required entry '{}' as {}: {}",
              key,
              ::std::any::type_name::<$type>(),
              err
            )
          })
      }
    }
  };
}

/// Resolves an entry from the global container instance, returning `None` on
/// any failure.
#[macro_export]
macro_rules! maybe_resolve {
  (trait $trait_ident:ident, $key:expr) => {
    match $key {
      key => $crate::get_instance().ok().and_then(|container| {
        container
          .get::<dyn $trait_ident>(::std::convert::AsRef::<str>::as_ref(&key))
          .ok()
      }),
    }
  };

  ($type:ty, $key:expr) => {
    match $key {
      key => $crate::get_instance().ok().and_then(|container| {
        container
          .get::<$type>(::std::convert::AsRef::<str>::as_ref(&key))
          .ok()
      }),
    }
  };
}

/// Resolves an entry from an explicit container, panicking on failure.
///
/// Works with anything exposing a `get::<T>(&str) -> Result<_>` method, so
/// both `Container` and `LocalContainer`.
///
/// ```
/// use keyed_ioc::{resolve_from, Container};
///
/// let container = Container::new().with_value("port", 8080_u16);
/// assert_eq!(*resolve_from!(container, u16, "port"), 8080);
/// ```
#[macro_export]
macro_rules! resolve_from {
  ($container:expr, trait $trait_ident:ident, $key:expr) => {
    match $key {
      key => {
        let key: &str = ::std::convert::AsRef::<str>::as_ref(&key);
        $container
          .get::<dyn $trait_ident>(key)
          .unwrap_or_else(|err| {
            panic!(
              "Failed to resolve required trait entry '{}' as {}: {}",
              key,
              ::std::any::type_name::<dyn $trait_ident>(),
              err
            )
          })
      }
    }
  };

  ($container:expr, $type:ty, $key:expr) => {
    match $key {
      key => {
        let key: &str = ::std::convert::AsRef::<str>::as_ref(&key);
        $container.get::<$type>(key).unwrap_or_else(|err| {
          panic!(
            "Failed to resolve required entry '{}' as {}: {}",
            key,
            ::std::any::type_name::<$type>(),
            err
          )
        })
      }
    }
  };
}

/// Resolves an entry from an explicit container, returning `None` on failure.
#[macro_export]
macro_rules! maybe_resolve_from {
  ($container:expr, trait $trait_ident:ident, $key:expr) => {
    match $key {
      key => $container
        .get::<dyn $trait_ident>(::std::convert::AsRef::<str>::as_ref(&key))
        .ok(),
    }
  };

  ($container:expr, $type:ty, $key:expr) => {
    match $key {
      key => $container
        .get::<$type>(::std::convert::AsRef::<str>::as_ref(&key))
        .ok(),
    }
  };
}
