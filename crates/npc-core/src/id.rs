use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a tree node.
///
/// Issued once when a node is constructed and never reused, so it can key
/// per-agent state in a [`Context`](crate::Context) without colliding with
/// nodes of any other tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(u64);

impl NodeId {
    pub const INVALID: NodeId = NodeId(u64::MAX);

    /// Issue the next identifier.
    pub fn next() -> Self {
        let id = NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed);
        debug_assert!(id != u64::MAX, "node identifier space exhausted");
        Self(id)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != u64::MAX
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<NodeId> for u64 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#invalid")
        }
    }
}
