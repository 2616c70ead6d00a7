//! Engine-agnostic primitives shared by the NPC behavior tree runtime.
//!
//! Nothing in here knows about nodes: this crate only provides identities,
//! the [`Status`] vocabulary, and the per-agent [`Context`] that keeps every
//! piece of mutable execution state out of the (shared, immutable) tree.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod context;
pub mod entity;
pub mod id;
pub mod status;
pub mod trace;

pub use context::Context;
pub use entity::{EntityId, ZoneId};
pub use id::NodeId;
pub use status::Status;
pub use trace::{TraceEvent, TraceLog};
