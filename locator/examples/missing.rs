use fibre_locator::{global, resolve, LocatorError};
use std::panic;

struct UnregisteredService;

fn main() {
  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never bound...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!(UnregisteredService);
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `resolve()` method ---
  println!("\nNow, attempting to resolve using the fallible `resolve()` method...");

  match global().resolve::<UnregisteredService>() {
    Ok(_) => panic!("Should not have found the service!"),
    Err(err @ LocatorError::UnboundInterface { .. }) => println!("Correctly received: {}", err),
    Err(err) => panic!("Unexpected error: {}", err),
  }
}
