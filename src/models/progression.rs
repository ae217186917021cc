//! Progression capability: where teams advance to from a bracket node once it is decided.
//!
//! Only the surface lives here. Which target belongs to which standing, and wiring the
//! bracket graph, is owned by the bracket topology outside this crate.

use serde::{Deserialize, Serialize};

/// Opaque reference to another bracket node (set, match, pool, ...).
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressionTarget(pub String);

impl ProgressionTarget {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self(node_id.into())
    }

    pub fn node_id(&self) -> &str {
        &self.0
    }
}

/// Anything that can tell which nodes its teams progress to, in standings order.
pub trait Progression {
    fn progressions(&self) -> &[ProgressionTarget];
}

/// Capability holder a node embeds to expose [`Progression`] by composition.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Progressions {
    targets: Vec<ProgressionTarget>,
}

impl Progressions {
    /// Replace the target list (called by the external bracket topology).
    pub fn set_targets(&mut self, targets: Vec<ProgressionTarget>) {
        self.targets = targets;
    }
}

impl Progression for Progressions {
    fn progressions(&self) -> &[ProgressionTarget] {
        &self.targets
    }
}
