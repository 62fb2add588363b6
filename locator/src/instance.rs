//! Scoped consumers: acquire on construction, release on drop.

use crate::injector::{Injector, ReleaseFn};
use crate::key::InterfaceKey;
use crate::{InjectorFault, LocatorError, Result};
use std::fmt;
use std::ops::{Deref, Index};
use std::slice;
use std::sync::Arc;

/// A provider acquired through a custom injector, held for one scope.
///
/// When dropped, the injector's release function (if any) receives the
/// instance. Access is read-only through `Deref`.
pub struct Instance<I: ?Sized> {
  handle: Arc<I>,
  release: Option<Arc<ReleaseFn<I>>>,
}

impl<I: ?Sized + Send + Sync + 'static> Instance<I> {
  pub(crate) fn acquire(key: InterfaceKey, injector: &Injector<I>) -> Result<Self> {
    let handle = injector.acquire().ok_or_else(|| {
      tracing::warn!(interface = %key, "injector acquired no instance");
      LocatorError::InvalidInjector {
        interface: key,
        fault: InjectorFault::NoInstance,
      }
    })?;
    Ok(Self {
      handle,
      release: injector.release_fn(),
    })
  }
}

impl<I: ?Sized> Instance<I> {
  /// The underlying handle. Ownership stays with the scope.
  pub fn handle(&self) -> &Arc<I> {
    &self.handle
  }
}

impl<I: ?Sized> Deref for Instance<I> {
  type Target = I;

  fn deref(&self) -> &I {
    &self.handle
  }
}

impl<I: ?Sized> Drop for Instance<I> {
  fn drop(&mut self) {
    if let Some(release) = &self.release {
      release(&self.handle);
    }
  }
}

impl<I: ?Sized> fmt::Debug for Instance<I> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Instance")
      .field("ptr", &Arc::as_ptr(&self.handle))
      .field("release", &self.release.is_some())
      .finish()
  }
}

/// Every provider added for an interface, acquired together in binding order.
///
/// Dropping the set releases each instance through its own injector, in the
/// same order (a `Vec` drops its elements front to back).
pub struct InstanceSet<I: ?Sized> {
  instances: Vec<Instance<I>>,
}

impl<I: ?Sized + Send + Sync + 'static> InstanceSet<I> {
  // On failure the instances acquired so far are dropped, hence released.
  pub(crate) fn acquire(key: InterfaceKey, injectors: &[Injector<I>]) -> Result<Self> {
    let instances = injectors
      .iter()
      .map(|injector| Instance::acquire(key, injector))
      .collect::<Result<Vec<_>>>()?;
    Ok(Self { instances })
  }
}

impl<I: ?Sized> InstanceSet<I> {
  /// Number of acquired instances, one per added injector.
  pub fn len(&self) -> usize {
    self.instances.len()
  }

  pub fn is_empty(&self) -> bool {
    self.instances.is_empty()
  }

  /// The provider at `index`, in binding order.
  pub fn get(&self, index: usize) -> Option<&I> {
    self.instances.get(index).map(|instance| &**instance)
  }

  /// The handle of the provider at `index`.
  pub fn handle(&self, index: usize) -> Option<&Arc<I>> {
    self.instances.get(index).map(Instance::handle)
  }

  /// Iterates in binding order; use `.rev()` for reverse traversal.
  pub fn iter(&self) -> Iter<'_, I> {
    Iter {
      inner: self.instances.iter(),
    }
  }
}

impl<I: ?Sized> Index<usize> for InstanceSet<I> {
  type Output = I;

  fn index(&self, index: usize) -> &I {
    &*self.instances[index]
  }
}

impl<I: ?Sized> fmt::Debug for InstanceSet<I> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(&self.instances).finish()
  }
}

impl<'a, I: ?Sized> IntoIterator for &'a InstanceSet<I> {
  type Item = &'a I;
  type IntoIter = Iter<'a, I>;

  fn into_iter(self) -> Iter<'a, I> {
    self.iter()
  }
}

/// Iterator over the providers of an [`InstanceSet`].
pub struct Iter<'a, I: ?Sized> {
  inner: slice::Iter<'a, Instance<I>>,
}

impl<'a, I: ?Sized> Iterator for Iter<'a, I> {
  type Item = &'a I;

  fn next(&mut self) -> Option<&'a I> {
    self.inner.next().map(|instance| &**instance)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<'a, I: ?Sized> DoubleEndedIterator for Iter<'a, I> {
  fn next_back(&mut self) -> Option<&'a I> {
    self.inner.next_back().map(|instance| &**instance)
  }
}

impl<'a, I: ?Sized> ExactSizeIterator for Iter<'a, I> {}
