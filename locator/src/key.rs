//! Interface identity used to address per-interface registrations.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies a service interface inside a locator.
///
/// There is exactly one registration record per key, no matter how many
/// provider types are bound to it. Only the `TypeId` takes part in equality;
/// the type name is carried along for diagnostics.
#[derive(Clone, Copy)]
pub struct InterfaceKey {
  type_id: TypeId,
  type_name: &'static str,
}

impl InterfaceKey {
  /// The key of interface `I`, usually a `dyn Trait` object type.
  pub fn of<I: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<I>(),
      type_name: type_name::<I>(),
    }
  }

  /// The `TypeId` the key compares by.
  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  /// The interface's type name, as used in error messages.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }
}

impl PartialEq for InterfaceKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for InterfaceKey {}

impl Hash for InterfaceKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

impl fmt::Debug for InterfaceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key(TypeId({:?}), Name({}))", self.type_id, self.type_name)
  }
}

impl fmt::Display for InterfaceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.type_name)
  }
}
