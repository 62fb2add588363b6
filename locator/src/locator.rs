//! The main `Locator` struct and its associated methods.

use crate::injector::Injector;
use crate::instance::{Instance, InstanceSet};
use crate::key::InterfaceKey;
use crate::lifetime::{ConsumerMode, Lifetime};
use crate::recipe::Recipe;
use crate::registration::Registration;
use crate::{LocatorError, Result};
use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;

/// A service locator keyed by interface type.
///
/// Each interface owns one record holding a single-binding slot, an ordered
/// multi-binding collection and the custom injectors used by scoped
/// consumers. Binding and resolution are thread-safe; bindings may happen at
/// any time, including from inside a factory.
///
/// # Mutual recursion
///
/// The locator does not detect cycles. If the factory of `A` resolves `B`
/// and the factory of `B` resolves `A` again before `A` is memoized, the
/// result is unbounded recursion (or a deadlock on a process-shared cell).
/// Break such cycles by deferring the second resolution until after
/// construction.
#[derive(Default)]
pub struct Locator {
  registrations: DashMap<InterfaceKey, Arc<dyn Any + Send + Sync>>,
}

impl Locator {
  /// Creates a new, empty `Locator`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn registration<I: ?Sized + Send + Sync + 'static>(&self) -> Arc<Registration<I>> {
    let erased = Arc::clone(
      self
        .registrations
        .entry(InterfaceKey::of::<I>())
        .or_insert_with(|| Arc::new(Registration::<I>::new()) as Arc<dyn Any + Send + Sync>)
        .value(),
    );
    downcast(erased)
  }

  fn existing<I: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<Registration<I>>> {
    let erased = self
      .registrations
      .get(&InterfaceKey::of::<I>())
      .map(|entry| Arc::clone(entry.value()))?;
    Some(downcast(erased))
  }

  fn install<I: ?Sized + Send + Sync + 'static>(&self, recipe: Recipe<I>, mode: ConsumerMode) -> Result<()> {
    let key = InterfaceKey::of::<I>();
    let lifetime = recipe.lifetime();
    match self.registration::<I>().install(recipe, mode) {
      Ok(()) => {
        tracing::debug!(interface = %key, ?lifetime, ?mode, "service provider bound");
        Ok(())
      }
      Err(err) => {
        tracing::warn!(interface = %key, ?mode, "rejected second single binding");
        Err(err)
      }
    }
  }

  // --- PUBLIC API ---

  // --- Binding ---

  /// Binds a factory. The factory itself decides whether it hands out new or
  /// shared instances; the locator calls it on every resolution.
  pub fn bind_factory<I: ?Sized + Send + Sync + 'static>(
    &self,
    mode: ConsumerMode,
    factory: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) -> Result<()> {
    self.install(Recipe::new(Lifetime::PerCall, factory), mode)
  }

  /// Binds a constructor wrapped in `lifetime`.
  ///
  /// Under [`ConsumerMode::Both`] the slot and the collection share the same
  /// recipe, so shared lifetimes memoize a single instance for both paths.
  pub fn bind<I: ?Sized + Send + Sync + 'static>(
    &self,
    lifetime: Lifetime,
    mode: ConsumerMode,
    ctor: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) -> Result<()> {
    self.install(Recipe::new(lifetime, ctor), mode)
  }

  /// Installs the single custom injector consumed through [`Locator::instance`].
  pub fn inject<I: ?Sized + Send + Sync + 'static>(&self, injector: Injector<I>) -> Result<()> {
    let result = self.registration::<I>().inject(injector);
    match &result {
      Ok(()) => tracing::debug!(interface = %InterfaceKey::of::<I>(), "custom injector installed"),
      Err(err) => tracing::warn!(interface = %InterfaceKey::of::<I>(), error = %err, "custom injector rejected"),
    }
    result
  }

  /// Appends a custom injector consumed through [`Locator::instance_set`].
  pub fn add_injector<I: ?Sized + Send + Sync + 'static>(&self, injector: Injector<I>) {
    let count = self.registration::<I>().add_injector(injector);
    tracing::debug!(interface = %InterfaceKey::of::<I>(), count, "custom injector added");
  }

  // --- Resolution ---

  /// Resolves the single binding of `I`.
  pub fn resolve<I: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<I>> {
    tracing::trace!(interface = %InterfaceKey::of::<I>(), "resolving");
    self.existing::<I>().ok_or_else(unbound::<I>)?.resolve()
  }

  /// Resolves every multi-binding of `I`, in binding order.
  ///
  /// With no bindings this fails, unless `allow_empty` is set, in which case
  /// the result is empty.
  pub fn resolve_all<I: ?Sized + Send + Sync + 'static>(&self, allow_empty: bool) -> Result<Vec<Arc<I>>> {
    tracing::trace!(interface = %InterfaceKey::of::<I>(), allow_empty, "resolving all");
    match self.existing::<I>() {
      Some(registration) => registration.resolve_all(allow_empty),
      None if allow_empty => Ok(Vec::new()),
      None => Err(unbound::<I>()),
    }
  }

  /// Whether a single binding exists for `I`.
  pub fn is_bound<I: ?Sized + Send + Sync + 'static>(&self) -> bool {
    self.existing::<I>().is_some_and(|registration| registration.is_bound())
  }

  /// Number of multi-bindings for `I`.
  pub fn bound_count<I: ?Sized + Send + Sync + 'static>(&self) -> usize {
    self.existing::<I>().map_or(0, |registration| registration.bound_count())
  }

  // --- Scoped consumers ---

  /// Acquires the custom-injected provider of `I` for the lifetime of the
  /// returned guard.
  pub fn instance<I: ?Sized + Send + Sync + 'static>(&self) -> Result<Instance<I>> {
    let key = InterfaceKey::of::<I>();
    let injector = self.existing::<I>().ok_or_else(unbound::<I>)?.injector()?;
    Instance::acquire(key, &injector)
  }

  /// Acquires every added injector's provider of `I`, in binding order.
  pub fn instance_set<I: ?Sized + Send + Sync + 'static>(&self) -> Result<InstanceSet<I>> {
    let key = InterfaceKey::of::<I>();
    let injectors = self.existing::<I>().ok_or_else(unbound::<I>)?.injectors()?;
    InstanceSet::acquire(key, &injectors)
  }

  // --- Test support ---
  //
  // None of these destroy instances that were already handed out. Do not
  // call them in production code.

  /// Removes the single binding of `I` so another one can be installed.
  pub fn reset_single_binding<I: ?Sized + Send + Sync + 'static>(&self) {
    if let Some(registration) = self.existing::<I>() {
      let cleared = registration.reset_slot();
      tracing::debug!(interface = %InterfaceKey::of::<I>(), cleared, "single binding reset");
    }
  }

  /// Removes every multi-binding of `I`.
  pub fn reset_multi_bindings<I: ?Sized + Send + Sync + 'static>(&self) {
    if let Some(registration) = self.existing::<I>() {
      let count = registration.reset_collection();
      tracing::debug!(interface = %InterfaceKey::of::<I>(), count, "multi bindings reset");
    }
  }

  /// Removes the single custom injector and every added injector of `I`.
  pub fn reset_custom_injector<I: ?Sized + Send + Sync + 'static>(&self) {
    if let Some(registration) = self.existing::<I>() {
      registration.reset_injectors();
      tracing::debug!(interface = %InterfaceKey::of::<I>(), "custom injectors reset");
    }
  }

  /// Removes both the single binding and the multi-bindings of `I`.
  pub fn clear_for_testing<I: ?Sized + Send + Sync + 'static>(&self) {
    self.reset_single_binding::<I>();
    self.reset_multi_bindings::<I>();
  }
}

fn unbound<I: ?Sized + 'static>() -> LocatorError {
  LocatorError::UnboundInterface {
    interface: InterfaceKey::of::<I>(),
  }
}

fn downcast<I: ?Sized + Send + Sync + 'static>(erased: Arc<dyn Any + Send + Sync>) -> Arc<Registration<I>> {
  match erased.downcast::<Registration<I>>() {
    Ok(registration) => registration,
    Err(_) => unreachable!("registration stored under a foreign interface key"),
  }
}
