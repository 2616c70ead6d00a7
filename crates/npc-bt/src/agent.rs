use std::sync::{Arc, Weak};
use std::time::Duration;

use npc_core::{Context, EntityId, NodeId, Status, TraceEvent, TraceLog, ZoneId};
use tracing::{debug, trace, warn};

use crate::node::{self, Node, NodeRef};
use crate::Root;

/// Non-owning reference to the action that is currently running. The action
/// belongs to a (possibly swapped out) tree, never to the agent.
struct CurrentAction {
    id: NodeId,
    node: Weak<dyn Node>,
    must_complete: bool,
}

/// Result of a must-complete action that ended outside the tree, waiting to
/// be handed to its parent on the following root pass.
#[derive(Debug, Clone, Copy)]
struct Completed(Status);

/// One NPC driven by a behavior tree.
///
/// The tree is shared; everything mutable (continuation state, status,
/// working selection) is owned here.
pub struct Agent {
    entity: EntityId,
    behavior: Option<Arc<Root>>,
    context: Context,
    status: Status,
    selection: Vec<EntityId>,
    paused: bool,
    zone: Option<ZoneId>,
    ticks: u64,
    trace: Option<TraceLog>,
}

impl Agent {
    pub fn new(entity: EntityId) -> Self {
        Self {
            entity,
            behavior: None,
            context: Context::new(),
            status: Status::Unknown,
            selection: Vec::new(),
            paused: false,
            zone: None,
            ticks: 0,
            trace: None,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Top-level status produced by the last update.
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Zone this agent is registered with, if any.
    pub fn zone(&self) -> Option<ZoneId> {
        self.zone
    }

    pub(crate) fn set_zone(&mut self, zone: Option<ZoneId>) {
        self.zone = zone;
    }

    /// Number of updates that evaluated a tree.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn behavior(&self) -> Option<&Arc<Root>> {
        self.behavior.as_ref()
    }

    /// Attach a tree, returning the previous one.
    ///
    /// The context is kept as is. Entries left behind by the previous tree
    /// are keyed by its own node identifiers and never read by the new one.
    pub fn set_behavior(&mut self, root: Arc<Root>) -> Option<Arc<Root>> {
        if let Some(action) = self.current_action() {
            if action.must_complete() {
                warn!(
                    entity = self.entity,
                    action = %action.id(),
                    "behavior replaced while a must-complete action is running"
                );
            }
        }
        debug!(entity = self.entity, tree = root.name(), "behavior set");
        self.behavior.replace(root)
    }

    pub fn take_behavior(&mut self) -> Option<Arc<Root>> {
        self.behavior.take()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// Working set of candidate entities, in filter order.
    pub fn selection(&self) -> &[EntityId] {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Vec<EntityId> {
        &mut self.selection
    }

    pub fn set_selection(&mut self, selection: Vec<EntityId>) {
        self.selection = selection;
    }

    /// The in-flight action, if it is still alive.
    pub fn current_action(&self) -> Option<NodeRef> {
        self.context
            .try_get::<CurrentAction>(self.entity)
            .and_then(|current| current.node.upgrade())
    }

    /// Make `action` the current action. A live must-complete action is never
    /// displaced by a different one.
    pub(crate) fn hold_action(&mut self, action: &NodeRef) {
        let id = action.id();
        let pinned = self
            .context
            .try_get::<CurrentAction>(self.entity)
            .is_some_and(|current| {
                current.id != id && current.must_complete && current.node.strong_count() > 0
            });
        if pinned {
            return;
        }
        let current = CurrentAction {
            id,
            node: Arc::downgrade(action),
            must_complete: action.must_complete(),
        };
        self.context.set(self.entity, current);
    }

    /// Pending result of a must-complete action that stopped running on its
    /// own tick, consumed by the next execution of that action.
    pub(crate) fn take_completed(&mut self, id: NodeId) -> Option<Status> {
        self.context.remove::<Completed>(id).map(|completed| completed.0)
    }

    /// Drop the current-action reference if it points at `id`.
    pub(crate) fn release_action(&mut self, id: NodeId) {
        let holds = self
            .context
            .try_get::<CurrentAction>(self.entity)
            .is_some_and(|current| current.id == id);
        if holds {
            self.context.remove::<CurrentAction>(self.entity);
        }
    }

    /// Start recording a status trace of every node execution.
    pub fn enable_trace(&mut self) {
        self.trace.get_or_insert_with(TraceLog::default);
    }

    pub fn trace(&self) -> Option<&TraceLog> {
        self.trace.as_ref()
    }

    pub fn take_trace(&mut self) -> Option<TraceLog> {
        self.trace.take()
    }

    pub(crate) fn record(&mut self, node: NodeId, status: Status) {
        if let Some(trace) = self.trace.as_mut() {
            trace.push(TraceEvent::new(self.ticks, node, status));
        }
    }

    /// Tick the attached tree once.
    ///
    /// Paused agents and agents without a tree are left untouched. A running
    /// must-complete action is re-executed on its own, bypassing the tree.
    /// Once it stops running, the root is executed in the same update and the
    /// action reports that final result to its parent instead of running
    /// again. Otherwise the root is executed.
    pub fn update(&mut self, elapsed: Duration) -> Status {
        if self.paused {
            return self.status;
        }
        let Some(root) = self.behavior.clone() else {
            return self.status;
        };
        self.ticks += 1;

        if let Some(action) = self.current_action().filter(|a| a.must_complete()) {
            let status = node::execute(&action, self, elapsed);
            trace!(
                entity = self.entity,
                node = %action.id(),
                status = ?status,
                "must-complete action tick"
            );
            if status.is_running() {
                self.status = status;
                return status;
            }
            self.context.set(action.id(), Completed(status));
            self.status = node::execute(&(root as NodeRef), self, elapsed);
            // Unclaimed when the tree took another branch.
            self.context.remove::<Completed>(action.id());
        } else {
            self.status = node::execute(&(root as NodeRef), self, elapsed);
        }

        trace!(entity = self.entity, status = ?self.status, "agent tick");
        self.status
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("entity", &self.entity)
            .field("behavior", &self.behavior.as_ref().map(|r| r.name()))
            .field("status", &self.status)
            .field("paused", &self.paused)
            .field("zone", &self.zone)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
