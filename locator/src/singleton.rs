//! A lean locator for the case where every provider is a singleton and every
//! consumer needs exactly one provider.

use crate::key::InterfaceKey;
use crate::{LocatorError, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;

/// Stores one ready-made instance per interface.
///
/// There are no lifetimes, consumer modes or injectors here: instances are
/// built at injection time and every resolution clones the same handle.
#[derive(Default)]
pub struct SingletonLocator {
  instances: DashMap<InterfaceKey, Box<dyn Any + Send + Sync>>,
}

impl SingletonLocator {
  /// Creates a new, empty `SingletonLocator`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Injects an already built instance.
  pub fn inject<I: ?Sized + Send + Sync + 'static>(&self, instance: Arc<I>) -> Result<()> {
    let key = InterfaceKey::of::<I>();
    match self.instances.entry(key) {
      Entry::Occupied(_) => {
        tracing::warn!(interface = %key, "rejected second singleton injection");
        Err(LocatorError::DuplicateBinding { interface: key })
      }
      Entry::Vacant(vacant) => {
        vacant.insert(Box::new(instance));
        tracing::debug!(interface = %key, "singleton injected");
        Ok(())
      }
    }
  }

  /// Constructs the instance right away and injects it.
  ///
  /// The constructor does not run when the interface is already injected.
  /// It runs while the interface's entry is locked, so it must not use this
  /// `SingletonLocator`.
  pub fn inject_with<I: ?Sized + Send + Sync + 'static>(
    &self,
    ctor: impl FnOnce() -> Arc<I>,
  ) -> Result<()> {
    let key = InterfaceKey::of::<I>();
    match self.instances.entry(key) {
      Entry::Occupied(_) => {
        tracing::warn!(interface = %key, "rejected second singleton injection");
        Err(LocatorError::DuplicateBinding { interface: key })
      }
      Entry::Vacant(vacant) => {
        vacant.insert(Box::new(ctor()));
        tracing::debug!(interface = %key, "singleton constructed and injected");
        Ok(())
      }
    }
  }

  /// The injected instance of `I`.
  pub fn get<I: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<I>> {
    let key = InterfaceKey::of::<I>();
    self
      .instances
      .get(&key)
      .and_then(|entry| entry.value().downcast_ref::<Arc<I>>().cloned())
      .ok_or(LocatorError::UnboundInterface { interface: key })
  }

  /// Whether an instance of `I` has been injected.
  pub fn is_injected<I: ?Sized + Send + Sync + 'static>(&self) -> bool {
    self.instances.contains_key(&InterfaceKey::of::<I>())
  }

  /// Forgets the instance of `I`. For tests only; holders keep their handles.
  pub fn reset<I: ?Sized + Send + Sync + 'static>(&self) {
    if self.instances.remove(&InterfaceKey::of::<I>()).is_some() {
      tracing::debug!(interface = %InterfaceKey::of::<I>(), "singleton reset");
    }
  }
}
