#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of executing a node for one agent on one tick.
///
/// `Unknown` only ever appears before the first tick; every execution
/// produces one of the other four.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    #[default]
    Unknown,
    /// The node's condition blocked it; its own logic did not run.
    CanNotExecute,
    /// The node needs more ticks.
    Running,
    Finished,
    Failed,
}

impl Status {
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, Status::Finished)
    }

    #[inline]
    pub fn is_failed(self) -> bool {
        matches!(self, Status::Failed)
    }

    /// `Finished` or `Failed`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Finished | Status::Failed)
    }

    /// Inverter mapping.
    ///
    /// `Finished` and `Failed` swap, `Running` passes through, and a node that
    /// could not execute counts as a vacuous success. `Unknown` is never
    /// produced by a tick and maps to `Failed`.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Finished => Status::Failed,
            Status::Failed => Status::Finished,
            Status::Running => Status::Running,
            Status::CanNotExecute => Status::Finished,
            Status::Unknown => Status::Failed,
        }
    }
}
