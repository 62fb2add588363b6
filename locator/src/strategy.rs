//! Ready-made acquisition strategies for custom injectors.

use crate::injector::Injector;
use parking_lot::Mutex;
use std::sync::Arc;

/// Hands out a fixed set of pre-built providers in cyclic order.
///
/// ```
/// use fibre_locator::{Locator, RoundRobin};
/// use std::sync::Arc;
///
/// let locator = Locator::new();
/// let pool = RoundRobin::new(vec![Arc::new(1_u32), Arc::new(2_u32)]);
/// locator.inject::<u32>(pool.into_injector()).unwrap();
///
/// assert_eq!(*locator.instance::<u32>().unwrap(), 1);
/// assert_eq!(*locator.instance::<u32>().unwrap(), 2);
/// assert_eq!(*locator.instance::<u32>().unwrap(), 1);
/// ```
pub struct RoundRobin<I: ?Sized> {
  providers: Vec<Arc<I>>,
  cursor: Mutex<usize>,
}

impl<I: ?Sized + Send + Sync + 'static> RoundRobin<I> {
  /// Starts the cursor at the first provider.
  pub fn new(providers: Vec<Arc<I>>) -> Self {
    Self {
      providers,
      cursor: Mutex::new(0),
    }
  }

  /// Number of providers in the rotation.
  pub fn len(&self) -> usize {
    self.providers.len()
  }

  /// Whether the rotation has no providers.
  pub fn is_empty(&self) -> bool {
    self.providers.is_empty()
  }

  /// Returns the provider under the cursor and advances it. `None` if the
  /// set is empty.
  pub fn next_provider(&self) -> Option<Arc<I>> {
    if self.providers.is_empty() {
      return None;
    }
    let mut cursor = self.cursor.lock();
    let provider = Arc::clone(&self.providers[*cursor]);
    *cursor = (*cursor + 1) % self.providers.len();
    Some(provider)
  }

  /// An injector dispatching over this set. It has no release function.
  pub fn into_injector(self) -> Injector<I> {
    let round_robin = Arc::new(self);
    Injector::new(move || round_robin.next_provider())
  }
}

/// A bounded pool of pre-built providers.
///
/// Acquisition takes an idle provider out of the pool; release puts it back.
/// An exhausted pool makes acquisition fail with `InjectorFault::NoInstance`.
pub struct Pool<I: ?Sized> {
  idle: Mutex<Vec<Arc<I>>>,
  capacity: usize,
}

impl<I: ?Sized + Send + Sync + 'static> Pool<I> {
  /// Creates a pool where every given provider starts idle.
  pub fn new(providers: Vec<Arc<I>>) -> Self {
    let capacity = providers.len();
    Self {
      idle: Mutex::new(providers),
      capacity,
    }
  }

  /// Number of providers the pool was created with.
  pub fn capacity(&self) -> usize {
    self.capacity
  }

  /// Number of providers currently available.
  pub fn idle(&self) -> usize {
    self.idle.lock().len()
  }

  /// Takes an idle provider, or `None` if all are checked out.
  pub fn checkout(&self) -> Option<Arc<I>> {
    self.idle.lock().pop()
  }

  /// Returns a provider to the idle set.
  pub fn checkin(&self, provider: &Arc<I>) {
    self.idle.lock().push(Arc::clone(provider));
  }

  /// An injector over a shared pool, returning instances on release.
  pub fn injector(pool: &Arc<Self>) -> Injector<I> {
    let acquire_from = Arc::clone(pool);
    let release_to = Arc::clone(pool);
    Injector::new(move || acquire_from.checkout()).with_release(move |provider| release_to.checkin(provider))
  }
}
