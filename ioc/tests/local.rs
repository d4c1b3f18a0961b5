use keyed_ioc::{Error, LocalContainer};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

#[test]
fn test_local_shared() {
  let mut container = LocalContainer::new();
  container.share("greeting", || "hello".to_string());

  let r1 = container.get::<String>("greeting").unwrap();
  let r2 = container.get::<String>("greeting").unwrap();

  assert_eq!(*r1, "hello");
  // Shared bindings hand out the same instance.
  assert!(Rc::ptr_eq(&r1, &r2));
}

#[test]
fn test_local_factory() {
  let mut container = LocalContainer::new();
  // Use a Cell to show that we get new instances
  container.factory("cell", || Cell::new(10));

  let r1 = container.get::<Cell<i32>>("cell").unwrap();
  let r2 = container.get::<Cell<i32>>("cell").unwrap();

  r1.set(20);

  assert_eq!(r1.get(), 20);
  assert_eq!(r2.get(), 10); // r2 is a different instance
  assert!(!Rc::ptr_eq(&r1, &r2));
}

#[test]
fn test_local_value_and_has() {
  let container = LocalContainer::new().with_value("db", "my-db");

  assert!(container.has("db"));
  assert!(!container.has("cache"));
  let r1 = container.get::<&str>("db").unwrap();
  let r2 = container.get::<&str>("db").unwrap();
  assert!(Rc::ptr_eq(&r1, &r2));
}

#[test]
fn test_local_override_after_resolution() {
  let mut container = LocalContainer::new();
  container.share("entry", || "hello");
  let first = container.get::<&str>("entry").unwrap();

  container.share("entry", || "world");

  assert_eq!(*first, "hello");
  assert_eq!(*container.get::<&str>("entry").unwrap(), "world");
  assert_eq!(*container.get::<&str>("entry").unwrap(), "world");
  assert_eq!(container.len(), 1);
}

#[test]
fn test_local_trait_resolution() {
  trait Greeter {
    fn greet(&self) -> String;
  }
  struct English;
  impl Greeter for English {
    fn greet(&self) -> String {
      "Hello".to_string()
    }
  }

  let mut container = LocalContainer::new();
  container.share_trait::<dyn Greeter>("greeter", || Rc::new(English));
  container.factory_trait::<dyn Greeter>("fresh_greeter", || Rc::new(English));

  let greeter = container.get::<dyn Greeter>("greeter").unwrap();
  assert_eq!(greeter.greet(), "Hello");
  assert_eq!(container.get::<dyn Greeter>("fresh_greeter").unwrap().greet(), "Hello");

  let literal: Rc<dyn Greeter> = Rc::new(English);
  container.set_rc("literal_greeter", Rc::clone(&literal));
  assert!(Rc::ptr_eq(&literal, &container.get::<dyn Greeter>("literal_greeter").unwrap()));
}

#[test]
fn test_local_container_aware_factory() {
  let mut container = LocalContainer::new().with_value("base", 40_u32);
  container.factory_with("answer", |c: &LocalContainer| *c.get::<u32>("base").unwrap() + 2);
  container.share_with("label", |c: &LocalContainer| {
    format!("answer={}", c.get::<u32>("answer").unwrap())
  });

  assert_eq!(*container.get::<u32>("answer").unwrap(), 42);
  assert_eq!(*container.get::<String>("label").unwrap(), "answer=42");
}

#[test]
fn test_local_errors() {
  #[derive(Debug)]
  struct Offline;
  impl fmt::Display for Offline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str("offline")
    }
  }
  impl std::error::Error for Offline {}

  let mut container = LocalContainer::new();
  container.try_factory("remote", |_: &LocalContainer| -> Result<u8, Offline> { Err(Offline) });
  container.try_share("nested", |c: &LocalContainer| -> Result<u8, Error> {
    Ok(*c.get::<u8>("missing")?)
  });
  container.set_value("number", 1_u8);

  assert!(container.get::<u8>("unknown").unwrap_err().is_not_found());
  assert!(container.get::<u8>("remote").unwrap_err().producer_error::<Offline>().is_some());
  assert!(matches!(
    container.get::<u8>("nested"),
    Err(Error::NotFound(ref key)) if key == "missing"
  ));
  assert!(matches!(
    container.get::<String>("number"),
    Err(Error::TypeMismatch { .. })
  ));

  assert!(container.remove("number"));
  assert!(!container.has("number"));
}

#[test]
fn test_local_container_handles_not_send_sync_types() {
  // `Rc<i32>` is neither `Send` nor `Sync`.
  // This is impossible with the thread-safe `Container`.
  struct NotSendSyncService {
    data: Rc<i32>,
  }

  let mut container = LocalContainer::new();
  let shared_data = Rc::new(42);

  // The producer must be `Fn`, so we clone the Rc inside it.
  container.share("service", move || NotSendSyncService {
    data: Rc::clone(&shared_data),
  });

  let service = container.get::<NotSendSyncService>("service").unwrap();
  assert_eq!(*service.data, 42);

  let service2 = container.get::<NotSendSyncService>("service").unwrap();
  assert!(Rc::ptr_eq(&service.data, &service2.data));
}

#[test]
fn test_local_producer_side_effects_run_per_call() {
  let calls = Rc::new(RefCell::new(Vec::new()));
  let mut container = LocalContainer::new();

  let log = Rc::clone(&calls);
  container.factory("tick", move || {
    let mut log = log.borrow_mut();
    let next = log.len();
    log.push(next);
    log.len()
  });

  container.get::<usize>("tick").unwrap();
  container.get::<usize>("tick").unwrap();

  assert_eq!(*calls.borrow(), vec![0, 1]);
}
