//! Shorthands for assembling trees in code.
//!
//! `sequence(vec![...])` instead of `Arc::new(Sequence::with_children(vec![...]))`.

use std::sync::Arc;
use std::time::Duration;

use npc_core::{NodeId, Status};

use crate::action::{Action, TimedNode};
use crate::composite::{Parallel, Priority, Sequence};
use crate::decorator::{Fail, Inverter, Limit, Repeater, Root, Succeed, UntilFail, UntilSuccess};
use crate::{Agent, NodeRef};

#[inline]
pub fn sequence(children: Vec<NodeRef>) -> NodeRef {
    Arc::new(Sequence::with_children(children))
}

#[inline]
pub fn priority(children: Vec<NodeRef>) -> NodeRef {
    Arc::new(Priority::with_children(children))
}

#[inline]
pub fn parallel(children: Vec<NodeRef>) -> NodeRef {
    Arc::new(Parallel::with_children(children))
}

#[inline]
pub fn inverter(child: NodeRef) -> NodeRef {
    Arc::new(Inverter::wrap(child))
}

#[inline]
pub fn succeed(child: NodeRef) -> NodeRef {
    Arc::new(Succeed::wrap(child))
}

#[inline]
pub fn fail(child: NodeRef) -> NodeRef {
    Arc::new(Fail::wrap(child))
}

#[inline]
pub fn repeater(child: NodeRef) -> NodeRef {
    Arc::new(Repeater::wrap(child))
}

#[inline]
pub fn until_success(child: NodeRef) -> NodeRef {
    Arc::new(UntilSuccess::wrap(child))
}

#[inline]
pub fn until_fail(child: NodeRef) -> NodeRef {
    Arc::new(UntilFail::wrap(child))
}

#[inline]
pub fn limit(bound: u32, child: NodeRef) -> NodeRef {
    Arc::new(Limit::wrap(bound, child))
}

#[inline]
pub fn timed(duration: Duration) -> NodeRef {
    Arc::new(TimedNode::new(duration))
}

/// Closure leaf. The closure receives the action's own id for context keys.
#[inline]
pub fn action<F>(name: &'static str, logic: F) -> NodeRef
where
    F: Fn(NodeId, &mut Agent, Duration) -> Status + Send + Sync + 'static,
{
    Arc::new(Action::named(name, logic))
}

/// Leaf that always reports `status`.
pub fn constant(status: Status) -> NodeRef {
    action("Constant", move |_: NodeId, _: &mut Agent, _: Duration| status)
}

#[inline]
pub fn root(name: impl Into<String>, child: NodeRef) -> Arc<Root> {
    Arc::new(Root::with_child(name, child))
}
