#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{NodeId, Status};

/// One node execution observed during an agent tick.
///
/// Plain data so it can be recorded during simulation and rendered later by
/// tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub node: NodeId,
    pub status: Status,
}

impl TraceEvent {
    pub fn new(tick: u64, node: NodeId, status: Status) -> Self {
        Self { tick, node, status }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Events recorded on a given tick, in execution order.
    pub fn at_tick(&self, tick: u64) -> impl Iterator<Item = &TraceEvent> + '_ {
        self.events.iter().filter(move |e| e.tick == tick)
    }

    /// Most recent status recorded for `node`.
    pub fn last_status(&self, node: NodeId) -> Option<Status> {
        self.events
            .iter()
            .rev()
            .find(|e| e.node == node)
            .map(|e| e.status)
    }
}
