use keyed_ioc::Container;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing_subscriber::EnvFilter;

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  // RUST_LOG=keyed_ioc=debug shows registrations and shared initialisation.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let container = Container::new();

  // --- Shared Registration ---
  // This producer will only be called ONCE.
  container.share("shared_tracker", || {
    println!("Creating SHARED RequestTracker...");
    RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    }
  });

  // --- Factory Registration ---
  // This producer will be called EVERY time the entry is resolved.
  container.factory("factory_tracker", || {
    println!("Creating FACTORY RequestTracker...");
    RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    }
  });

  println!("--- Resolving shared entries ---");
  let s1 = container.get::<RequestTracker>("shared_tracker").unwrap();
  let s2 = container.get::<RequestTracker>("shared_tracker").unwrap();
  println!("Shared 1 ID: {}, Shared 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert_eq!(s2.id, 0);
  assert!(Arc::ptr_eq(&s1, &s2), "Shared instances should be identical");
  println!("Shared instances are the same pointer, as expected.\n");

  println!("--- Resolving factory entries ---");
  let t1 = container.get::<RequestTracker>("factory_tracker").unwrap();
  let t2 = container.get::<RequestTracker>("factory_tracker").unwrap();
  println!("Factory 1 ID: {}, Factory 2 ID: {}", t1.id, t2.id);
  assert_eq!(t1.id, 1);
  assert_eq!(t2.id, 2);
  assert!(!Arc::ptr_eq(&t1, &t2), "Factory instances should be different");
  println!("Factory instances are different pointers, as expected.\n");

  println!("--- Replacing the shared entry ---");
  container.share("shared_tracker", || RequestTracker { id: 99 });
  let s3 = container.get::<RequestTracker>("shared_tracker").unwrap();
  println!("Old handle still sees ID {}, new resolution sees ID {}", s1.id, s3.id);
  assert_eq!(s1.id, 0);
  assert_eq!(s3.id, 99);
}
