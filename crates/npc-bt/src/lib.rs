//! Behavior-tree execution engine for NPCs, built on `npc-core`.
//!
//! Trees are assembled once (in code, or by a [`Loader`] through the
//! [`Registry`]) and shared by any number of [`Agent`]s. All per-agent
//! continuation state lives in the agent's [`Context`](npc_core::Context).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod agent;
mod args;
pub mod builder;
mod cache;
pub mod composite;
pub mod condition;
pub mod decorator;
mod error;
pub mod filter;
pub mod loader;
pub mod node;
mod registry;
mod zone;

pub use action::{Action, ActionLogic, TimedNode, Timer, TimerPhase};
pub use agent::Agent;
pub use args::Args;
pub use cache::BehaviorCache;
pub use composite::{Parallel, Priority, ResumeIndex, Sequence};
pub use condition::{
    AlwaysFalse, AlwaysTrue, And, Condition, FilterCondition, Not, Or, Predicate,
};
pub use decorator::{
    ExecCount, Fail, Inverter, Limit, Repeater, Root, Succeed, UntilFail, UntilSuccess,
};
pub use error::{LoadError, TreeError};
pub use filter::{ClearSelection, ExcludeSelf, Filter, FirstN, UniqueSelection};
pub use loader::{Loader, YamlLoader};
pub use node::{execute, Node, NodeBase, NodeKind, NodeRef};
pub use registry::{ConditionFactory, FilterFactory, NodeFactory, Registry};
pub use zone::Zone;

pub use npc_core::{Context, EntityId, NodeId, Status, TraceEvent, TraceLog, ZoneId};
