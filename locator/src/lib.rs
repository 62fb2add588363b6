//! # Fibre Locator
//!
//! A statically-typed, thread-safe service locator for Rust.
//!
//! A service interface (usually a `dyn Trait`) is bound once at startup to a
//! provider, together with a lifetime policy, and later resolved by consumers
//! that never learn the concrete implementation.
//!
//! ## Core Concepts
//!
//! - **Locator**: an explicit registry object. Each interface gets one record
//!   with a single-binding slot and an ordered multi-binding collection.
//! - **Lifetime**: `PerCall` builds a new instance per resolution,
//!   `ProcessShared` builds one for the whole process, `ThreadShared` one per
//!   thread.
//! - **Consumer mode**: `Single` bindings are read with `resolve`, `Multiple`
//!   bindings with `resolve_all`, `Both` installs into both stores.
//! - **Injectors**: custom `acquire`/`release` pairs (pools, round-robin,
//!   external objects) consumed through the scoped `Instance` and
//!   `InstanceSet` guards, which release on drop.
//! - **SingletonLocator**: a leaner variant holding one ready-made instance
//!   per interface.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_locator::{ConsumerMode, Lifetime, Locator};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter {
//!     message: String,
//! }
//!
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         self.message.clone()
//!     }
//! }
//!
//! fn main() -> fibre_locator::Result<()> {
//!     let locator = Locator::new();
//!
//!     locator.bind::<dyn Greeter>(Lifetime::ProcessShared, ConsumerMode::Both, || {
//!         Arc::new(EnglishGreeter { message: String::from("Hello, World!") })
//!     })?;
//!
//!     let greeter = locator.resolve::<dyn Greeter>()?;
//!     let everyone = locator.resolve_all::<dyn Greeter>(false)?;
//!
//!     assert_eq!(greeter.greet(), "Hello, World!");
//!     assert!(Arc::ptr_eq(&greeter, &everyone[0]));
//!     Ok(())
//! }
//! ```

mod error;
mod global;
mod injector;
mod instance;
mod key;
mod lifetime;
mod locator;
mod macros;
mod recipe;
mod registration;
mod singleton;
mod strategy;

pub use error::{InjectorFault, LocatorError, Result};
pub use global::{global, global_singletons};
pub use injector::Injector;
pub use instance::{Instance, InstanceSet, Iter};
pub use key::InterfaceKey;
pub use lifetime::{ConsumerMode, Lifetime};
pub use locator::Locator;
pub use singleton::SingletonLocator;
pub use strategy::{Pool, RoundRobin};
