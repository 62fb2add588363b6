//! The per-interface record: slot, collection and custom injectors.

use crate::injector::Injector;
use crate::key::InterfaceKey;
use crate::lifetime::ConsumerMode;
use crate::recipe::Recipe;
use crate::{InjectorFault, LocatorError, Result};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

// Locks are only held to copy `Arc`s in or out, never while a recipe or an
// acquire function runs. When both stores are locked, slot comes first.
pub(crate) struct Registration<I: ?Sized> {
  key: InterfaceKey,
  slot: RwLock<Option<Arc<Recipe<I>>>>,
  collection: RwLock<Vec<Arc<Recipe<I>>>>,
  injector: RwLock<Option<Injector<I>>>,
  injectors: RwLock<Vec<Injector<I>>>,
  // Recipes removed by a reset. Kept so their memoized instances outlive the
  // binding, as they would with a process-wide static.
  retired: Mutex<Vec<Arc<Recipe<I>>>>,
}

impl<I: ?Sized + Send + Sync + 'static> Registration<I> {
  pub(crate) fn new() -> Self {
    Self {
      key: InterfaceKey::of::<I>(),
      slot: RwLock::new(None),
      collection: RwLock::new(Vec::new()),
      injector: RwLock::new(None),
      injectors: RwLock::new(Vec::new()),
      retired: Mutex::new(Vec::new()),
    }
  }

  /// Installs one recipe into the stores selected by `mode`.
  ///
  /// A conflict in the slot leaves both stores untouched.
  pub(crate) fn install(&self, recipe: Recipe<I>, mode: ConsumerMode) -> Result<()> {
    let recipe = Arc::new(recipe);
    let mut slot = self.slot.write();
    let mut collection = self.collection.write();

    if mode.includes_single() {
      if slot.is_some() {
        return Err(LocatorError::DuplicateBinding { interface: self.key });
      }
      *slot = Some(Arc::clone(&recipe));
    }
    if mode.includes_multiple() {
      collection.push(recipe);
    }
    Ok(())
  }

  pub(crate) fn resolve(&self) -> Result<Arc<I>> {
    let recipe = self
      .slot
      .read()
      .clone()
      .ok_or(LocatorError::UnboundInterface { interface: self.key })?;
    Ok(recipe.invoke())
  }

  pub(crate) fn resolve_all(&self, allow_empty: bool) -> Result<Vec<Arc<I>>> {
    let recipes = self.collection.read().clone();
    if recipes.is_empty() && !allow_empty {
      return Err(LocatorError::UnboundInterface { interface: self.key });
    }
    Ok(recipes.iter().map(|recipe| recipe.invoke()).collect())
  }

  pub(crate) fn is_bound(&self) -> bool {
    self.slot.read().is_some()
  }

  pub(crate) fn bound_count(&self) -> usize {
    self.collection.read().len()
  }

  /// Unbinds the slot's recipe. Instances it already produced are never
  /// destroyed by this, whether or not a consumer still holds them.
  pub(crate) fn reset_slot(&self) -> bool {
    let removed = self.slot.write().take();
    match removed {
      Some(recipe) => {
        self.retired.lock().push(recipe);
        true
      }
      None => false,
    }
  }

  pub(crate) fn reset_collection(&self) -> usize {
    let removed = std::mem::take(&mut *self.collection.write());
    let cleared = removed.len();
    self.retired.lock().extend(removed);
    cleared
  }

  pub(crate) fn inject(&self, injector: Injector<I>) -> Result<()> {
    let mut current = self.injector.write();
    if current.is_some() {
      return Err(LocatorError::InvalidInjector {
        interface: self.key,
        fault: InjectorFault::AlreadyInjected,
      });
    }
    *current = Some(injector);
    Ok(())
  }

  pub(crate) fn add_injector(&self, injector: Injector<I>) -> usize {
    let mut injectors = self.injectors.write();
    injectors.push(injector);
    injectors.len()
  }

  pub(crate) fn injector(&self) -> Result<Injector<I>> {
    self
      .injector
      .read()
      .clone()
      .ok_or(LocatorError::UnboundInterface { interface: self.key })
  }

  pub(crate) fn injectors(&self) -> Result<Vec<Injector<I>>> {
    let injectors = self.injectors.read().clone();
    if injectors.is_empty() {
      return Err(LocatorError::UnboundInterface { interface: self.key });
    }
    Ok(injectors)
  }

  pub(crate) fn reset_injectors(&self) {
    self.injector.write().take();
    self.injectors.write().clear();
  }
}
