//! Leaf behaviors.

use std::time::Duration;

use npc_core::{NodeId, Status};

use crate::node::{Node, NodeBase, NodeKind};
use crate::Agent;

/// Game-specific leaf logic plugged into an [`Action`] node.
///
/// Implementations must not keep per-agent state on `self`; use the agent's
/// context keyed by `node`.
pub trait ActionLogic: Send + Sync + 'static {
    fn do_action(&self, node: NodeId, agent: &mut Agent, elapsed: Duration) -> Status;

    /// Called on a fresh entry into the action (its last status was not
    /// `Running`).
    fn initialize(&self, _node: NodeId, _agent: &mut Agent) {}
}

impl<F> ActionLogic for F
where
    F: Fn(NodeId, &mut Agent, Duration) -> Status + Send + Sync + 'static,
{
    fn do_action(&self, node: NodeId, agent: &mut Agent, elapsed: Duration) -> Status {
        self(node, agent, elapsed)
    }
}

/// Leaf node running an [`ActionLogic`].
///
/// While it returns `Running` the agent tracks it as the current action. With
/// `must_complete` set, the agent then re-executes only this action on
/// subsequent ticks until it stops running.
pub struct Action<L> {
    base: NodeBase,
    name: &'static str,
    must_complete: bool,
    logic: L,
}

impl<L: ActionLogic> Action<L> {
    pub fn new(logic: L) -> Self {
        Self::named("Action", logic)
    }

    pub fn named(name: &'static str, logic: L) -> Self {
        Self {
            base: NodeBase::new(),
            name,
            must_complete: false,
            logic,
        }
    }

    pub fn with_must_complete(mut self, must_complete: bool) -> Self {
        self.must_complete = must_complete;
        self
    }

    pub fn logic(&self) -> &L {
        &self.logic
    }
}

impl<L: ActionLogic> Node for Action<L> {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Action
    }

    fn initialize(&self, agent: &mut Agent) {
        self.logic.initialize(self.id(), agent);
    }

    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status {
        self.logic.do_action(self.id(), agent, elapsed)
    }

    fn must_complete(&self) -> bool {
        self.must_complete
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimerPhase {
    #[default]
    Start,
    Running,
    Expired,
}

/// Per-agent countdown of a [`TimedNode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    pub phase: TimerPhase,
    pub remaining: Duration,
}

/// Leaf that keeps running for a fixed duration, then finishes.
///
/// The first tick after entry arms the countdown (`Start`); later ticks
/// subtract the elapsed time (`Running`) until nothing is left (`Expired`).
/// The elapsed time of the arming tick is not counted.
pub struct TimedNode {
    base: NodeBase,
    duration: Duration,
    must_complete: bool,
}

impl TimedNode {
    pub fn new(duration: Duration) -> Self {
        Self {
            base: NodeBase::new(),
            duration,
            must_complete: false,
        }
    }

    pub fn with_must_complete(mut self, must_complete: bool) -> Self {
        self.must_complete = must_complete;
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Node for TimedNode {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "Timed"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Action
    }

    fn initialize(&self, agent: &mut Agent) {
        agent.context_mut().set(self.id(), Timer::default());
    }

    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status {
        let id = self.id();
        let mut timer = agent.context().get::<Timer>(id);

        match timer.phase {
            TimerPhase::Start => {
                timer.remaining = self.duration;
                timer.phase = TimerPhase::Running;
            }
            TimerPhase::Running => {
                timer.remaining = timer.remaining.saturating_sub(elapsed);
            }
            TimerPhase::Expired => {}
        }
        if timer.phase == TimerPhase::Running && timer.remaining.is_zero() {
            timer.phase = TimerPhase::Expired;
        }

        agent.context_mut().set(id, timer);
        match timer.phase {
            TimerPhase::Expired => Status::Finished,
            _ => Status::Running,
        }
    }

    fn must_complete(&self) -> bool {
        self.must_complete
    }
}
