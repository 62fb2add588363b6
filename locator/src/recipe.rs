//! Constructor recipes: a construction expression wrapped in a lifetime policy.

use crate::lifetime::Lifetime;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub(crate) type Factory<I> = Box<dyn Fn() -> Arc<I> + Send + Sync>;

static NEXT_THREAD_SHARED_ID: AtomicU64 = AtomicU64::new(0);

thread_local! {
  // Thread-shared instances of the current thread, keyed by recipe id. The
  // map is torn down with the thread, dropping every instance it holds.
  static THREAD_SHARED: RefCell<HashMap<u64, Box<dyn Any>>> = RefCell::new(HashMap::new());
}

/// A zero-argument recipe producing provider handles.
///
/// Memoization is keyed by the recipe (its cell, or its thread-shared id), so
/// every store holding the same `Arc<Recipe>` sees the same shared instance.
pub(crate) enum Recipe<I: ?Sized> {
  PerCall {
    factory: Factory<I>,
  },
  ProcessShared {
    cell: OnceCell<Arc<I>>,
    factory: Factory<I>,
  },
  // Instances live in the `THREAD_SHARED` map of each resolving thread.
  ThreadShared {
    id: u64,
    factory: Factory<I>,
  },
}

impl<I: ?Sized + Send + Sync + 'static> Recipe<I> {
  pub(crate) fn new(lifetime: Lifetime, factory: impl Fn() -> Arc<I> + Send + Sync + 'static) -> Self {
    let factory: Factory<I> = Box::new(factory);
    match lifetime {
      Lifetime::PerCall => Recipe::PerCall { factory },
      Lifetime::ProcessShared => Recipe::ProcessShared {
        cell: OnceCell::new(),
        factory,
      },
      Lifetime::ThreadShared => Recipe::ThreadShared {
        id: NEXT_THREAD_SHARED_ID.fetch_add(1, Ordering::Relaxed),
        factory,
      },
    }
  }

  pub(crate) fn lifetime(&self) -> Lifetime {
    match self {
      Recipe::PerCall { .. } => Lifetime::PerCall,
      Recipe::ProcessShared { .. } => Lifetime::ProcessShared,
      Recipe::ThreadShared { .. } => Lifetime::ThreadShared,
    }
  }

  /// Produces one handle according to the recipe's lifetime.
  pub(crate) fn invoke(&self) -> Arc<I> {
    match self {
      Recipe::PerCall { factory } => factory(),
      Recipe::ProcessShared { cell, factory } => Arc::clone(cell.get_or_init(|| {
        tracing::trace!(interface = std::any::type_name::<I>(), "constructing process-shared instance");
        factory()
      })),
      Recipe::ThreadShared { id, factory } => {
        let cached = THREAD_SHARED.with(|cells| {
          cells
            .borrow()
            .get(id)
            .and_then(|cell| cell.downcast_ref::<Arc<I>>())
            .cloned()
        });
        if let Some(handle) = cached {
          return handle;
        }
        tracing::trace!(interface = std::any::type_name::<I>(), recipe = id, "constructing thread-shared instance");
        // Built outside the borrow so the factory may resolve other services.
        let handle = factory();
        THREAD_SHARED.with(|cells| {
          let mut cells = cells.borrow_mut();
          let cell = cells.entry(*id).or_insert_with(|| Box::new(Arc::clone(&handle)) as Box<dyn Any>);
          cell.downcast_ref::<Arc<I>>().cloned().unwrap_or(handle)
        })
      }
    }
  }
}
