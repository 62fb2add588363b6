//! Custom injectors: user-controlled acquisition and release of instances.

use crate::lifetime::Lifetime;
use crate::recipe::Recipe;
use std::fmt;
use std::sync::Arc;

pub(crate) type AcquireFn<I> = dyn Fn() -> Option<Arc<I>> + Send + Sync;
pub(crate) type ReleaseFn<I> = dyn Fn(&Arc<I>) + Send + Sync;

/// An `acquire`/`release` pair that bypasses the lifetime machinery.
///
/// `acquire` must always produce an instance. Returning `None` is a contract
/// breach reported as [`InjectorFault::NoInstance`](crate::InjectorFault::NoInstance)
/// when a scoped consumer is built. `release` is optional; without it the
/// framework never tears the instance down.
pub struct Injector<I: ?Sized> {
  acquire: Arc<AcquireFn<I>>,
  release: Option<Arc<ReleaseFn<I>>>,
}

impl<I: ?Sized> Clone for Injector<I> {
  fn clone(&self) -> Self {
    Self {
      acquire: Arc::clone(&self.acquire),
      release: self.release.clone(),
    }
  }
}

impl<I: ?Sized> fmt::Debug for Injector<I> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Injector")
      .field("release", &self.release.is_some())
      .finish_non_exhaustive()
  }
}

impl<I: ?Sized + Send + Sync + 'static> Injector<I> {
  /// Creates an injector from an acquire function, without release.
  pub fn new(acquire: impl Fn() -> Option<Arc<I>> + Send + Sync + 'static) -> Self {
    Self {
      acquire: Arc::new(acquire),
      release: None,
    }
  }

  /// Attaches a release function, called once per acquired instance when
  /// the consumer holding it goes out of scope.
  pub fn with_release(mut self, release: impl Fn(&Arc<I>) + Send + Sync + 'static) -> Self {
    self.release = Some(Arc::new(release));
    self
  }

  /// Always hands out the given, externally-owned instance.
  pub fn from_instance(instance: Arc<I>) -> Self {
    Self::new(move || Some(Arc::clone(&instance)))
  }

  /// Builds the acquire function from one of the built-in lifetimes.
  pub fn with_lifetime(lifetime: Lifetime, ctor: impl Fn() -> Arc<I> + Send + Sync + 'static) -> Self {
    let recipe = Recipe::new(lifetime, ctor);
    Self::new(move || Some(recipe.invoke()))
  }

  /// Whether acquired instances are handed back on scope exit.
  pub fn has_release(&self) -> bool {
    self.release.is_some()
  }

  pub(crate) fn acquire(&self) -> Option<Arc<I>> {
    (self.acquire)()
  }

  pub(crate) fn release_fn(&self) -> Option<Arc<ReleaseFn<I>>> {
    self.release.clone()
  }
}
