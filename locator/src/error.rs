use crate::key::InterfaceKey;
use std::fmt;
use thiserror::Error;

/// Why a custom injector was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectorFault {
  /// The acquire function produced no instance.
  NoInstance,
  /// A single-consumer injector was already installed for the interface.
  AlreadyInjected,
}

impl fmt::Display for InjectorFault {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      InjectorFault::NoInstance => f.write_str("acquire returned no instance"),
      InjectorFault::AlreadyInjected => f.write_str("an injector is already installed"),
    }
  }
}

/// The error type for binding and resolution in `fibre_locator`.
///
/// Every variant carries the interface that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocatorError {
  #[error("Duplicate binding for {interface}")]
  DuplicateBinding { interface: InterfaceKey },

  #[error("Service provider not found for {interface}")]
  UnboundInterface { interface: InterfaceKey },

  #[error("Invalid injector for {interface}: {fault}")]
  InvalidInjector {
    interface: InterfaceKey,
    fault: InjectorFault,
  },
}

impl LocatorError {
  /// The interface the failed operation was addressing.
  pub fn interface(&self) -> InterfaceKey {
    match self {
      LocatorError::DuplicateBinding { interface }
      | LocatorError::UnboundInterface { interface }
      | LocatorError::InvalidInjector { interface, .. } => *interface,
    }
  }
}

/// A specialized `Result` type for `fibre_locator` operations.
pub type Result<T, E = LocatorError> = std::result::Result<T, E>;
