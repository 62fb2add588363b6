//! The global locator instances and access functions.

use crate::locator::Locator;
use crate::singleton::SingletonLocator;
use once_cell::sync::Lazy;

// Created on first access in a thread-safe manner.
static GLOBAL_LOCATOR: Lazy<Locator> = Lazy::new(Locator::default);
static GLOBAL_SINGLETONS: Lazy<SingletonLocator> = Lazy::new(SingletonLocator::default);

/// Provides a reference to the global locator instance.
///
/// # Examples
///
/// ```
/// use fibre_locator::{global, ConsumerMode, Lifetime};
/// use std::sync::Arc;
///
/// fn register_services() {
///   global()
///     .bind(Lifetime::ProcessShared, ConsumerMode::Single, || Arc::new(String::from("Hello from global!")))
///     .unwrap();
/// }
/// ```
pub fn global() -> &'static Locator {
  &GLOBAL_LOCATOR
}

/// Provides a reference to the global singleton-only locator.
pub fn global_singletons() -> &'static SingletonLocator {
  &GLOBAL_SINGLETONS
}
