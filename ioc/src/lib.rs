//! # Keyed IoC
//!
//! A string-keyed, thread-safe Inversion of Control (IoC) container for Rust.
//!
//! Entries are registered under string keys and resolved on demand. Registration
//! can happen at any point during the application's lifecycle, and registering
//! under an existing key simply replaces what was there.
//!
//! ## Core Concepts
//!
//! - **Container**: The registry mapping keys to bindings.
//! - **Bindings**: A *factory* runs on every resolution, a *shared* factory runs
//!   once and is memoized, a *value* is returned as-is.
//! - **Lookup**: The `has`/`get` contract consumers should depend on.
//! - **Global instance**: An optional process-wide container, set with
//!   `set_instance` and read with `get_instance` or the `resolve!` macro.
//!
//! ## Quick Start
//!
//! ```
//! use keyed_ioc::{Container, Entry, Error};
//! use std::sync::Arc;
//!
//! let container = Container::new().with_value("db.url", String::from("postgres://localhost"));
//!
//! // A shared binding is built once, on first use.
//! container.share_with("db", |c: &Container| {
//!   let url = c.get::<String>("db.url").expect("db.url is seeded above");
//!   format!("connection to {}", url)
//! });
//!
//! // A factory binding runs on every resolution.
//! container.set("request_id", Entry::factory(|| rand_id()));
//!
//! let first = container.get::<String>("db").unwrap();
//! let second = container.get::<String>("db").unwrap();
//! assert!(Arc::ptr_eq(&first, &second));
//! assert_eq!(*first, "connection to postgres://localhost");
//!
//! assert!(matches!(container.get::<u8>("missing"), Err(Error::NotFound(_))));
//! # fn rand_id() -> u64 { 7 }
//! ```

mod container;
mod core;
mod entry;
mod error;
mod global;
#[cfg(feature = "local")]
mod local_container;
mod lookup;
mod macros;

pub use container::Container;
pub use entry::Entry;
pub use error::{Error, Result};
pub use global::{clear_instance, get_instance, set_instance};
#[cfg(feature = "local")]
pub use local_container::LocalContainer;
pub use lookup::Lookup;
