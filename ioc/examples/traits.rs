use keyed_ioc::Container;
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define concrete implementations
struct ConsoleLogger {
  prefix: String,
}
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[{}]: {}", self.prefix, message);
  }
}

struct SilentLogger;
impl Logger for SilentLogger {
  fn log(&self, _message: &str) {}
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    // ... logic to generate report ...
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  let container = Container::new().with_value("log.prefix", String::from("CONSOLE LOG"));

  // --- Registration ---

  // Register both implementations of `dyn Logger` under their own keys.
  // The console logger takes its prefix from a value already in the container.
  let prefix = container.get::<String>("log.prefix").unwrap();
  container.share_trait::<dyn Logger>("logger.console", move || {
    Arc::new(ConsoleLogger {
      prefix: prefix.to_string(),
    })
  });
  container.share_trait::<dyn Logger>("logger.silent", || Arc::new(SilentLogger));

  // The ReportService resolves its own dependency when it is first built.
  container.share_with("reports", |c: &Container| ReportService {
    logger: c.get::<dyn Logger>("logger.console").unwrap(),
  });

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = container.get::<ReportService>("reports").unwrap();

  println!("Using the service...");
  report_service.generate_report();

  // The silent implementation is still available by key.
  container.get::<dyn Logger>("logger.silent").unwrap().log("nobody hears this");
}
