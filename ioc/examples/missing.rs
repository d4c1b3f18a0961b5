use keyed_ioc::{resolve, set_instance, Container, Error};
use std::panic;
use std::sync::Arc;

struct UnregisteredService;

fn main() {
  let container = Arc::new(Container::new());
  set_instance(Arc::clone(&container));

  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve an entry that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!(UnregisteredService, "unregistered");
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `get()` method ---
  println!("\nNow, attempting to resolve using the fallible `get()` method...");

  match container.get::<UnregisteredService>("unregistered") {
    Ok(_) => panic!("Should not have found the entry!"),
    Err(Error::NotFound(key)) => println!("Correctly received `NotFound` for '{}'.", key),
    Err(other) => panic!("Unexpected error: {}", other),
  }
}
