use keyed_ioc::{get_instance, resolve, set_instance, Container, Lookup};
use std::sync::Arc;

// A function that only needs to look things up.
// By accepting any `Lookup`, it can be tested with a controlled container.
fn process_data(services: &impl Lookup) -> String {
  let data = services
    .get::<String>("data")
    .expect("Data not found in container");
  format!("Processed: {}", data.to_uppercase())
}

fn main() {
  // --- With an explicit container ---
  println!("--- Running with an explicit container ---");
  let test_container = Container::new().with_value("data", "test data".to_string());
  let result = process_data(&test_container);

  println!("Result: {}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // --- With the process-wide instance ---
  println!("\n--- Running with the global instance ---");
  assert!(get_instance().is_err(), "No instance has been set yet");

  let app_container = Arc::new(Container::new().with_value("data", "app data".to_string()));
  set_instance(Arc::clone(&app_container));

  let result = process_data(&get_instance().unwrap());
  println!("Result: {}", result);
  assert_eq!(result, "Processed: APP DATA");
  assert_eq!(*resolve!(String, "data"), "app data");

  // The explicit container was never touched by the global one.
  assert!(!test_container.has("app"));
  assert!(Arc::ptr_eq(&app_container, &get_instance().unwrap()));
}
