use fibre_locator::{ConsumerMode, InterfaceKey, Lifetime, Locator, LocatorError};
use std::sync::Arc;

// --- Test Fixtures ---

// The trait must be Send + Sync for the locator to accept it.
trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

struct NamedGreeter {
  name: String,
}

impl Greeter for NamedGreeter {
  fn greet(&self) -> String {
    format!("Hello from {}", self.name)
  }
}

struct OtherGreeter;

impl Greeter for OtherGreeter {
  fn greet(&self) -> String {
    "Hi!".to_string()
  }
}

// --- Basic Tests ---

#[test]
fn test_per_call_yields_distinct_instances_with_same_argument() {
  // Arrange
  let locator = Locator::new();
  let arg = String::from("a");
  locator
    .bind::<dyn Greeter>(Lifetime::PerCall, ConsumerMode::Single, move || {
      Arc::new(NamedGreeter { name: arg.clone() })
    })
    .unwrap();

  // Act
  let r1 = locator.resolve::<dyn Greeter>().unwrap();
  let r2 = locator.resolve::<dyn Greeter>().unwrap();

  // Assert
  assert!(!Arc::ptr_eq(&r1, &r2));
  assert_eq!(r1.greet(), "Hello from a");
  assert_eq!(r2.greet(), "Hello from a");
}

#[test]
fn test_process_shared_resolves_identical_instance() {
  // Arrange
  let locator = Locator::new();
  locator
    .bind::<dyn Greeter>(Lifetime::ProcessShared, ConsumerMode::Single, || {
      Arc::new(NamedGreeter { name: "shared".into() })
    })
    .unwrap();

  // Act: two independent call sites.
  fn call_site_one(locator: &Locator) -> Arc<dyn Greeter> {
    locator.resolve::<dyn Greeter>().unwrap()
  }
  fn call_site_two(locator: &Locator) -> Arc<dyn Greeter> {
    locator.resolve::<dyn Greeter>().unwrap()
  }
  let r1 = call_site_one(&locator);
  let r2 = call_site_two(&locator);

  // Assert
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_second_single_binding_is_rejected() {
  // Arrange
  let locator = Locator::new();
  locator
    .bind_factory::<dyn Greeter>(ConsumerMode::Single, || Arc::new(OtherGreeter))
    .unwrap();

  // Act
  let err = locator
    .bind::<dyn Greeter>(Lifetime::ProcessShared, ConsumerMode::Single, || Arc::new(OtherGreeter))
    .unwrap_err();

  // Assert
  assert_eq!(
    err,
    LocatorError::DuplicateBinding {
      interface: InterfaceKey::of::<dyn Greeter>()
    }
  );
  assert!(err.to_string().contains("Greeter"));
}

#[test]
fn test_resolving_unbound_interface_fails() {
  let locator = Locator::new();

  let err = locator.resolve::<dyn Greeter>().err().unwrap();

  assert!(matches!(err, LocatorError::UnboundInterface { .. }));
  assert_eq!(err.interface(), InterfaceKey::of::<dyn Greeter>());
  assert!(!locator.is_bound::<dyn Greeter>());
}

#[test]
fn test_reset_then_rebind_resolves_new_provider() {
  // Arrange
  let locator = Locator::new();
  locator
    .bind::<dyn Greeter>(Lifetime::ProcessShared, ConsumerMode::Single, || {
      Arc::new(NamedGreeter { name: "old".into() })
    })
    .unwrap();
  let old = locator.resolve::<dyn Greeter>().unwrap();

  // Act
  locator.reset_single_binding::<dyn Greeter>();
  assert!(!locator.is_bound::<dyn Greeter>());
  locator
    .bind::<dyn Greeter>(Lifetime::ProcessShared, ConsumerMode::Single, || {
      Arc::new(NamedGreeter { name: "new".into() })
    })
    .unwrap();
  let new = locator.resolve::<dyn Greeter>().unwrap();

  // Assert
  assert_eq!(new.greet(), "Hello from new");
  assert!(!Arc::ptr_eq(&old, &new));
  // The previously handed out instance is still alive and usable.
  assert_eq!(old.greet(), "Hello from old");
}

#[test]
fn test_concrete_type_as_interface() {
  let locator = Locator::new();
  locator
    .bind(Lifetime::ProcessShared, ConsumerMode::Single, || Arc::new(42_u64))
    .unwrap();

  assert_eq!(*locator.resolve::<u64>().unwrap(), 42);
  assert!(locator.is_bound::<u64>());
  assert!(!locator.is_bound::<u32>());
}

#[test]
fn test_factory_chaining_through_the_locator() {
  // A provider's factory may itself resolve other interfaces.
  struct AppConfig {
    database_url: String,
  }
  trait Repository: Send + Sync {
    fn describe(&self) -> String;
  }
  struct SqlRepository {
    config: Arc<AppConfig>,
  }
  impl Repository for SqlRepository {
    fn describe(&self) -> String {
      format!("repository at {}", self.config.database_url)
    }
  }

  // Arrange
  let locator = Arc::new(Locator::new());
  locator
    .bind(Lifetime::ProcessShared, ConsumerMode::Single, || {
      Arc::new(AppConfig {
        database_url: "postgres://host/db".to_string(),
      })
    })
    .unwrap();
  let inner = Arc::clone(&locator);
  locator
    .bind::<dyn Repository>(Lifetime::PerCall, ConsumerMode::Single, move || {
      Arc::new(SqlRepository {
        config: inner.resolve::<AppConfig>().unwrap(),
      })
    })
    .unwrap();

  // Act
  let repository = locator.resolve::<dyn Repository>().unwrap();

  // Assert
  assert_eq!(repository.describe(), "repository at postgres://host/db");
}

#[test]
fn test_one_owner_behind_two_interface_adapters() {
  // One shared owner object, one thin adapter per interface.
  use std::sync::atomic::{AtomicUsize, Ordering};

  trait Reader: Send + Sync {
    fn read(&self) -> usize;
  }
  trait Writer: Send + Sync {
    fn write(&self, value: usize);
  }
  #[derive(Default)]
  struct Storage {
    value: AtomicUsize,
  }
  struct StorageReader(Arc<Storage>);
  struct StorageWriter(Arc<Storage>);
  impl Reader for StorageReader {
    fn read(&self) -> usize {
      self.0.value.load(Ordering::SeqCst)
    }
  }
  impl Writer for StorageWriter {
    fn write(&self, value: usize) {
      self.0.value.store(value, Ordering::SeqCst);
    }
  }

  // Arrange
  let locator = Locator::new();
  let storage = Arc::new(Storage::default());
  let for_reader = Arc::clone(&storage);
  let for_writer = Arc::clone(&storage);
  locator
    .bind::<dyn Reader>(Lifetime::ProcessShared, ConsumerMode::Single, move || {
      Arc::new(StorageReader(Arc::clone(&for_reader)))
    })
    .unwrap();
  locator
    .bind::<dyn Writer>(Lifetime::ProcessShared, ConsumerMode::Single, move || {
      Arc::new(StorageWriter(Arc::clone(&for_writer)))
    })
    .unwrap();

  // Act
  locator.resolve::<dyn Writer>().unwrap().write(7);

  // Assert
  assert_eq!(locator.resolve::<dyn Reader>().unwrap().read(), 7);
}
