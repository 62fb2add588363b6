//! Public macros for ergonomic resolution from the global locator.

/// Resolves the single binding of a service from the global locator.
///
/// # Panics
///
/// Panics with the interface name if nothing is bound. For a non-panicking
/// version, use [`maybe_resolve!`] or `global().resolve()` directly.
///
/// # Examples
///
/// ```
/// use fibre_locator::{global, resolve, ConsumerMode, Lifetime};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// global()
///   .bind::<dyn Greeter>(Lifetime::ProcessShared, ConsumerMode::Single, || Arc::new(EnglishGreeter))
///   .unwrap();
///
/// let greeter = resolve!(trait Greeter);
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  (trait $trait_ident:ident) => {
    $crate::global()
      .resolve::<dyn $trait_ident>()
      .unwrap_or_else(|err| panic!("Failed to resolve required trait service: {}", err))
  };

  ($type:ty) => {
    $crate::global()
      .resolve::<$type>()
      .unwrap_or_else(|err| panic!("Failed to resolve required service: {}", err))
  };
}

/// Like [`resolve!`], but returns `None` instead of panicking.
#[macro_export]
macro_rules! maybe_resolve {
  (trait $trait_ident:ident) => {
    $crate::global().resolve::<dyn $trait_ident>().ok()
  };

  ($type:ty) => {
    $crate::global().resolve::<$type>().ok()
  };
}

/// Resolves every multi-binding of a service from the global locator, in
/// binding order. An unbound service yields an empty vector.
#[macro_export]
macro_rules! resolve_all {
  (trait $trait_ident:ident) => {
    $crate::global()
      .resolve_all::<dyn $trait_ident>(true)
      .unwrap_or_default()
  };

  ($type:ty) => {
    $crate::global().resolve_all::<$type>(true).unwrap_or_default()
  };
}
