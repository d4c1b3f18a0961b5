//! The process-wide container slot and its access functions.
//!
//! The slot starts empty. [`set_instance`] fills or replaces it,
//! [`get_instance`] reads it and [`clear_instance`] empties it again, which is
//! mainly useful to reset state between tests. The slot is independent of the
//! bindings held by any container.

use crate::container::Container;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

// The one and only global slot.
static INSTANCE: Lazy<RwLock<Option<Arc<Container>>>> = Lazy::new(|| RwLock::new(None));

/// Stores `container` as the process-wide instance, returning the previous one.
///
/// # Examples
///
/// ```
/// use keyed_ioc::{get_instance, set_instance, Container};
/// use std::sync::Arc;
///
/// let container = Arc::new(Container::new());
/// set_instance(Arc::clone(&container));
///
/// assert!(Arc::ptr_eq(&container, &get_instance().unwrap()));
/// ```
pub fn set_instance(container: Arc<Container>) -> Option<Arc<Container>> {
  let previous = INSTANCE.write().replace(container);
  tracing::debug!(replaced = previous.is_some(), "Set global container instance");
  previous
}

/// Returns the process-wide instance.
///
/// # Errors
///
/// [`Error::NotBound`] if [`set_instance`] was never called, or the slot was
/// cleared since.
pub fn get_instance() -> Result<Arc<Container>> {
  INSTANCE.read().clone().ok_or(Error::NotBound)
}

/// Empties the slot, returning the instance it held.
pub fn clear_instance() -> Option<Arc<Container>> {
  let previous = INSTANCE.write().take();
  if previous.is_some() {
    tracing::debug!("Cleared global container instance");
  }
  previous
}
