//! The node protocol.
//!
//! A tree is built once and then shared, read-only, by every agent that runs
//! it. Nodes therefore never keep per-invocation state on themselves: whatever
//! they need to remember between ticks lives in the calling agent's
//! [`Context`](npc_core::Context), keyed by the node's [`NodeId`].

use std::sync::Arc;
use std::time::Duration;

use npc_core::{NodeId, Status};

use crate::{Agent, Condition, TreeError};

/// Shared handle to a node. Composites and decorators own their children
/// through it.
pub type NodeRef = Arc<dyn Node>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Any number of children.
    Composite,
    /// Exactly one child.
    Decorator,
    /// Leaf behavior. Tracked as the agent's current action while running.
    Action,
}

/// Identity and optional gate shared by every node variant.
pub struct NodeBase {
    id: NodeId,
    condition: Option<Box<dyn Condition>>,
}

impl NodeBase {
    pub fn new() -> Self {
        Self {
            id: NodeId::next(),
            condition: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn condition(&self) -> Option<&dyn Condition> {
        self.condition.as_deref()
    }

    /// Attach a condition, replacing any previous one.
    pub fn set_condition(&mut self, condition: Box<dyn Condition>) {
        self.condition = Some(condition);
    }
}

impl Default for NodeBase {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Node: Send + Sync + 'static {
    fn base(&self) -> &NodeBase;

    fn base_mut(&mut self) -> &mut NodeBase;

    /// Registry-facing name of the variant, used in logs and tree outlines.
    fn type_name(&self) -> &'static str;

    fn kind(&self) -> NodeKind;

    /// The node's own logic. Only called through [`execute`], after the
    /// condition (if any) passed.
    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status;

    /// Reset node-local continuation state on a fresh entry into the subtree,
    /// i.e. whenever the node's last status for this agent was not `Running`.
    fn initialize(&self, _agent: &mut Agent) {}

    /// Whether a running instance of this action monopolizes the agent's tick.
    fn must_complete(&self) -> bool {
        false
    }

    fn children(&self) -> &[NodeRef] {
        &[]
    }

    fn add_child(&mut self, _child: NodeRef) -> Result<(), TreeError> {
        Err(TreeError::NoChildren {
            kind: self.type_name(),
        })
    }

    fn id(&self) -> NodeId {
        self.base().id()
    }

    fn condition(&self) -> Option<&dyn Condition> {
        self.base().condition()
    }

    fn set_condition(&mut self, condition: Box<dyn Condition>) {
        self.base_mut().set_condition(condition);
    }

    /// Builder form of [`Node::set_condition`].
    fn with_condition(mut self, condition: impl Condition) -> Self
    where
        Self: Sized,
    {
        self.set_condition(Box::new(condition));
        self
    }
}

/// Execute `node` for `agent`.
///
/// 1. Re-initialize the node if its last status for this agent was not
///    `Running`.
/// 2. Evaluate the attached condition; on `false` return `CanNotExecute`
///    without running the node (a blocked action also drops the agent's
///    current-action reference to it).
/// 3. Otherwise run the node. A running action becomes the agent's current
///    action; a finished or failed one stops being it.
///
/// The result is stored as the node's last status in the agent's context.
///
/// An action whose must-complete run already ended on this update returns
/// that result directly, so its parent sees it and moves on.
pub fn execute(node: &NodeRef, agent: &mut Agent, elapsed: Duration) -> Status {
    let id = node.id();
    let is_action = node.kind() == NodeKind::Action;
    if is_action {
        if let Some(status) = agent.take_completed(id) {
            agent.context_mut().set(id, status);
            agent.record(id, status);
            return status;
        }
    }
    if !agent.context().get::<Status>(id).is_running() {
        node.initialize(agent);
    }

    let status = match node.condition() {
        Some(condition) if !condition.evaluate(agent, node.as_ref()) => {
            if is_action {
                agent.release_action(id);
            }
            Status::CanNotExecute
        }
        _ => {
            let status = node.run(agent, elapsed);
            if is_action {
                match status {
                    Status::Running => agent.hold_action(node),
                    Status::Finished | Status::Failed => agent.release_action(id),
                    Status::Unknown | Status::CanNotExecute => {}
                }
            }
            status
        }
    };

    agent.context_mut().set(id, status);
    agent.record(id, status);
    status
}

/// Depth-first search for `id` below (and including) `node`.
pub fn find(node: &NodeRef, id: NodeId) -> Option<NodeRef> {
    if node.id() == id {
        return Some(node.clone());
    }
    node.children().iter().find_map(|child| find(child, id))
}

pub(crate) fn count(node: &dyn Node) -> usize {
    1 + node
        .children()
        .iter()
        .map(|child| count(child.as_ref()))
        .sum::<usize>()
}
