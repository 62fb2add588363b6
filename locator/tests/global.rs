//! Tests for the global locator and the resolution macros.
//! They share process-wide state, so each one runs serially and starts by
//! clearing what it touches.

use fibre_locator::{
  global, global_singletons, maybe_resolve, resolve, resolve_all, ConsumerMode, Lifetime,
};
use serial_test::serial;
use std::sync::Arc;

// --- Test Fixtures ---

trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

struct EnglishGreeter;
impl Greeter for EnglishGreeter {
  fn greet(&self) -> String {
    "Hello!".to_string()
  }
}

struct GermanGreeter;
impl Greeter for GermanGreeter {
  fn greet(&self) -> String {
    "Hallo!".to_string()
  }
}

#[derive(Debug, PartialEq, Eq)]
struct SimpleService {
  id: u32,
}

fn reset_globals() {
  global().clear_for_testing::<dyn Greeter>();
  global().clear_for_testing::<SimpleService>();
  global_singletons().reset::<SimpleService>();
}

// --- Global Tests ---

#[test]
#[serial]
fn test_resolve_macro_for_concrete_type() {
  reset_globals();
  global()
    .bind(Lifetime::ProcessShared, ConsumerMode::Single, || Arc::new(SimpleService { id: 101 }))
    .unwrap();

  let r1 = resolve!(SimpleService);
  let r2 = resolve!(SimpleService);

  assert_eq!(r1.id, 101);
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
#[serial]
fn test_resolve_macro_for_trait() {
  reset_globals();
  global()
    .bind::<dyn Greeter>(Lifetime::PerCall, ConsumerMode::Single, || Arc::new(EnglishGreeter))
    .unwrap();

  let greeter = resolve!(trait Greeter);

  assert_eq!(greeter.greet(), "Hello!");
}

#[test]
#[serial]
#[should_panic(expected = "Failed to resolve required trait service")]
fn test_resolve_panics_on_missing_trait_service() {
  reset_globals();
  resolve!(trait Greeter);
}

#[test]
#[serial]
fn test_maybe_resolve_and_resolve_all() {
  reset_globals();
  assert!(maybe_resolve!(trait Greeter).is_none());
  assert!(maybe_resolve!(SimpleService).is_none());
  assert!(resolve_all!(trait Greeter).is_empty());

  global()
    .bind::<dyn Greeter>(Lifetime::ProcessShared, ConsumerMode::Both, || Arc::new(EnglishGreeter))
    .unwrap();
  global()
    .bind::<dyn Greeter>(Lifetime::ProcessShared, ConsumerMode::Multiple, || Arc::new(GermanGreeter))
    .unwrap();

  let greetings: Vec<String> = resolve_all!(trait Greeter).iter().map(|g| g.greet()).collect();
  assert_eq!(greetings, vec!["Hello!".to_string(), "Hallo!".to_string()]);
  assert_eq!(maybe_resolve!(trait Greeter).map(|g| g.greet()), Some("Hello!".to_string()));
}

#[test]
#[serial]
fn test_global_singletons() {
  reset_globals();
  global_singletons().inject(Arc::new(SimpleService { id: 9 })).unwrap();

  let service = global_singletons().get::<SimpleService>().unwrap();

  assert_eq!(*service, SimpleService { id: 9 });
}
