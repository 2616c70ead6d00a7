//! Composite nodes: ordered children, ticked left to right.

use std::time::Duration;

use npc_core::Status;

use crate::node::{execute, Node, NodeBase, NodeKind, NodeRef};
use crate::{Agent, TreeError};

/// Per-agent index of the child a [`Sequence`] or [`Priority`] resumes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResumeIndex(pub usize);

/// Tick children from the stored resume position while they return `advance_on`.
///
/// The first child returning anything else decides the result and its index
/// is kept for the next tick. Exhausting the children clears the position
/// and yields `exhausted`.
fn resume(
    node: &dyn Node,
    children: &[NodeRef],
    agent: &mut Agent,
    elapsed: Duration,
    advance_on: Status,
    exhausted: Status,
) -> Status {
    let id = node.id();
    let mut index = agent.context().get::<ResumeIndex>(id).0;

    while let Some(child) = children.get(index) {
        let status = execute(child, agent, elapsed);
        if status != advance_on {
            agent.context_mut().set(id, ResumeIndex(index));
            return status;
        }
        index += 1;
    }

    agent.context_mut().remove::<ResumeIndex>(id);
    exhausted
}

/// Ticks children in order until one does not finish.
///
/// Resumes from the child that stopped it on the previous tick; earlier
/// children are not re-evaluated while that child keeps running.
#[derive(Default)]
pub struct Sequence {
    base: NodeBase,
    children: Vec<NodeRef>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(children: Vec<NodeRef>) -> Self {
        Self {
            base: NodeBase::new(),
            children,
        }
    }
}

impl Node for Sequence {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "Sequence"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Composite
    }

    fn initialize(&self, agent: &mut Agent) {
        agent.context_mut().set(self.id(), ResumeIndex(0));
    }

    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status {
        resume(
            self,
            &self.children,
            agent,
            elapsed,
            Status::Finished,
            Status::Finished,
        )
    }

    fn children(&self) -> &[NodeRef] {
        &self.children
    }

    fn add_child(&mut self, child: NodeRef) -> Result<(), TreeError> {
        self.children.push(child);
        Ok(())
    }
}

/// Selector: ticks children in order until one does not fail.
///
/// The resume position lives in the agent's context, so one tree can back
/// any number of agents without them disturbing each other's traversal.
#[derive(Default)]
pub struct Priority {
    base: NodeBase,
    children: Vec<NodeRef>,
}

impl Priority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(children: Vec<NodeRef>) -> Self {
        Self {
            base: NodeBase::new(),
            children,
        }
    }
}

impl Node for Priority {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "Priority"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Composite
    }

    fn initialize(&self, agent: &mut Agent) {
        agent.context_mut().set(self.id(), ResumeIndex(0));
    }

    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status {
        resume(
            self,
            &self.children,
            agent,
            elapsed,
            Status::Failed,
            Status::Failed,
        )
    }

    fn children(&self) -> &[NodeRef] {
        &self.children
    }

    fn add_child(&mut self, child: NodeRef) -> Result<(), TreeError> {
        self.children.push(child);
        Ok(())
    }
}

/// Ticks every child every tick; `Running` if any child is, else `Finished`.
#[derive(Default)]
pub struct Parallel {
    base: NodeBase,
    children: Vec<NodeRef>,
}

impl Parallel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(children: Vec<NodeRef>) -> Self {
        Self {
            base: NodeBase::new(),
            children,
        }
    }
}

impl Node for Parallel {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "Parallel"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Composite
    }

    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status {
        let mut running = false;
        for child in &self.children {
            // No short-circuit: every child is ticked.
            running |= execute(child, agent, elapsed).is_running();
        }
        if running {
            Status::Running
        } else {
            Status::Finished
        }
    }

    fn children(&self) -> &[NodeRef] {
        &self.children
    }

    fn add_child(&mut self, child: NodeRef) -> Result<(), TreeError> {
        self.children.push(child);
        Ok(())
    }
}
