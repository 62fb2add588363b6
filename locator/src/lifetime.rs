//! Binding-time axes: how instances live, and how consumers reach them.

/// How a constructor recipe turns its construction expression into instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifetime {
  /// Every resolution constructs a fresh instance owned by the caller.
  #[default]
  PerCall,
  /// The first resolution, from any thread, constructs the instance; every
  /// later resolution returns that same instance.
  ProcessShared,
  /// Each thread constructs its own instance on its first resolution and
  /// reuses it afterwards. Threads never share.
  ThreadShared,
}

/// Which retrieval path a binding participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsumerMode {
  /// Resolved with `resolve`. At most one binding per interface.
  #[default]
  Single,
  /// Resolved with `resolve_all`, in binding order. Any number of bindings.
  Multiple,
  /// Installed in both stores, sharing one recipe (and its memoized instance).
  Both,
}

impl ConsumerMode {
  /// Whether the binding goes into the single-binding slot.
  pub fn includes_single(self) -> bool {
    matches!(self, ConsumerMode::Single | ConsumerMode::Both)
  }

  /// Whether the binding goes into the multi-binding collection.
  pub fn includes_multiple(self) -> bool {
    matches!(self, ConsumerMode::Multiple | ConsumerMode::Both)
  }
}
