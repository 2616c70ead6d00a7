//! Decorator nodes: exactly one child whose result they reshape.
//!
//! A decorator that never received its child fails deterministically instead
//! of executing anything.

use std::fmt::Write as _;
use std::time::Duration;

use npc_core::{NodeId, Status};
use tracing::warn;

use crate::node::{self, execute, Node, NodeBase, NodeKind, NodeRef};
use crate::{Agent, TreeError};

#[derive(Default)]
struct Slot {
    base: NodeBase,
    child: Option<NodeRef>,
}

impl Slot {
    fn attach(&mut self, kind: &'static str, child: NodeRef) -> Result<(), TreeError> {
        if self.child.is_some() {
            return Err(TreeError::ChildAlreadySet { kind });
        }
        self.child = Some(child);
        Ok(())
    }

    fn children(&self) -> &[NodeRef] {
        self.child.as_slice()
    }

    /// Execute the child, or `None` (with a warning) if there is none.
    fn tick(&self, kind: &'static str, agent: &mut Agent, elapsed: Duration) -> Option<Status> {
        match &self.child {
            Some(child) => Some(execute(child, agent, elapsed)),
            None => {
                warn!(node = %self.base.id(), kind, "decorator executed without a child");
                None
            }
        }
    }
}

/// Swaps `Finished` and `Failed`; a blocked child counts as `Finished`.
#[derive(Default)]
pub struct Inverter {
    slot: Slot,
}

impl Inverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wrap(child: NodeRef) -> Self {
        let mut node = Self::new();
        node.slot.child = Some(child);
        node
    }
}

impl Node for Inverter {
    fn base(&self) -> &NodeBase {
        &self.slot.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.slot.base
    }

    fn type_name(&self) -> &'static str {
        "Inverter"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Decorator
    }

    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status {
        self.slot
            .tick(self.type_name(), agent, elapsed)
            .map_or(Status::Failed, Status::invert)
    }

    fn children(&self) -> &[NodeRef] {
        self.slot.children()
    }

    fn add_child(&mut self, child: NodeRef) -> Result<(), TreeError> {
        self.slot.attach(self.type_name(), child)
    }
}

/// Any non-running result becomes `Finished`.
#[derive(Default)]
pub struct Succeed {
    slot: Slot,
}

impl Succeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wrap(child: NodeRef) -> Self {
        let mut node = Self::new();
        node.slot.child = Some(child);
        node
    }
}

impl Node for Succeed {
    fn base(&self) -> &NodeBase {
        &self.slot.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.slot.base
    }

    fn type_name(&self) -> &'static str {
        "Succeed"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Decorator
    }

    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status {
        match self.slot.tick(self.type_name(), agent, elapsed) {
            None => Status::Failed,
            Some(Status::Running) => Status::Running,
            Some(_) => Status::Finished,
        }
    }

    fn children(&self) -> &[NodeRef] {
        self.slot.children()
    }

    fn add_child(&mut self, child: NodeRef) -> Result<(), TreeError> {
        self.slot.attach(self.type_name(), child)
    }
}

/// Any non-running result becomes `Failed`.
#[derive(Default)]
pub struct Fail {
    slot: Slot,
}

impl Fail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wrap(child: NodeRef) -> Self {
        let mut node = Self::new();
        node.slot.child = Some(child);
        node
    }
}

impl Node for Fail {
    fn base(&self) -> &NodeBase {
        &self.slot.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.slot.base
    }

    fn type_name(&self) -> &'static str {
        "Fail"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Decorator
    }

    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status {
        match self.slot.tick(self.type_name(), agent, elapsed) {
            Some(Status::Running) => Status::Running,
            _ => Status::Failed,
        }
    }

    fn children(&self) -> &[NodeRef] {
        self.slot.children()
    }

    fn add_child(&mut self, child: NodeRef) -> Result<(), TreeError> {
        self.slot.attach(self.type_name(), child)
    }
}

/// Ticks its child once per call and always reports `Running`, keeping the
/// subtree alive forever.
#[derive(Default)]
pub struct Repeater {
    slot: Slot,
}

impl Repeater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wrap(child: NodeRef) -> Self {
        let mut node = Self::new();
        node.slot.child = Some(child);
        node
    }
}

impl Node for Repeater {
    fn base(&self) -> &NodeBase {
        &self.slot.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.slot.base
    }

    fn type_name(&self) -> &'static str {
        "Repeater"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Decorator
    }

    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status {
        match self.slot.tick(self.type_name(), agent, elapsed) {
            Some(_) => Status::Running,
            None => Status::Failed,
        }
    }

    fn children(&self) -> &[NodeRef] {
        self.slot.children()
    }

    fn add_child(&mut self, child: NodeRef) -> Result<(), TreeError> {
        self.slot.attach(self.type_name(), child)
    }
}

/// Per-agent number of times a [`Limit`] has ticked its child.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecCount(pub u32);

/// Ticks its child at most `bound` times per agent, then reports `Finished`
/// without touching the child again.
///
/// The count survives re-entry into the subtree; it is never reset by
/// initialization.
pub struct Limit {
    slot: Slot,
    bound: u32,
}

impl Limit {
    pub fn new(bound: u32) -> Self {
        Self {
            slot: Slot::default(),
            bound,
        }
    }

    pub fn wrap(bound: u32, child: NodeRef) -> Self {
        let mut node = Self::new(bound);
        node.slot.child = Some(child);
        node
    }

    pub fn bound(&self) -> u32 {
        self.bound
    }
}

impl Node for Limit {
    fn base(&self) -> &NodeBase {
        &self.slot.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.slot.base
    }

    fn type_name(&self) -> &'static str {
        "Limit"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Decorator
    }

    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status {
        let id = self.id();
        if agent.context().get::<ExecCount>(id).0 >= self.bound {
            return Status::Finished;
        }
        let Some(status) = self.slot.tick(self.type_name(), agent, elapsed) else {
            return Status::Failed;
        };
        agent.context_mut().entry::<ExecCount>(id).0 += 1;
        match status {
            Status::Running => Status::Running,
            _ => Status::Failed,
        }
    }

    fn children(&self) -> &[NodeRef] {
        self.slot.children()
    }

    fn add_child(&mut self, child: NodeRef) -> Result<(), TreeError> {
        self.slot.attach(self.type_name(), child)
    }
}

/// `Finished` the first time the child fails, `Running` otherwise.
#[derive(Default)]
pub struct UntilFail {
    slot: Slot,
}

impl UntilFail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wrap(child: NodeRef) -> Self {
        let mut node = Self::new();
        node.slot.child = Some(child);
        node
    }
}

impl Node for UntilFail {
    fn base(&self) -> &NodeBase {
        &self.slot.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.slot.base
    }

    fn type_name(&self) -> &'static str {
        "UntilFail"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Decorator
    }

    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status {
        match self.slot.tick(self.type_name(), agent, elapsed) {
            None => Status::Failed,
            Some(Status::Failed) => Status::Finished,
            Some(_) => Status::Running,
        }
    }

    fn children(&self) -> &[NodeRef] {
        self.slot.children()
    }

    fn add_child(&mut self, child: NodeRef) -> Result<(), TreeError> {
        self.slot.attach(self.type_name(), child)
    }
}

/// `Finished` the first time the child finishes, `Running` otherwise.
#[derive(Default)]
pub struct UntilSuccess {
    slot: Slot,
}

impl UntilSuccess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wrap(child: NodeRef) -> Self {
        let mut node = Self::new();
        node.slot.child = Some(child);
        node
    }
}

impl Node for UntilSuccess {
    fn base(&self) -> &NodeBase {
        &self.slot.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.slot.base
    }

    fn type_name(&self) -> &'static str {
        "UntilSuccess"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Decorator
    }

    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status {
        match self.slot.tick(self.type_name(), agent, elapsed) {
            None => Status::Failed,
            Some(Status::Finished) => Status::Finished,
            Some(_) => Status::Running,
        }
    }

    fn children(&self) -> &[NodeRef] {
        self.slot.children()
    }

    fn add_child(&mut self, child: NodeRef) -> Result<(), TreeError> {
        self.slot.attach(self.type_name(), child)
    }
}

/// Named entry point of a tree. Passes its child's result through unchanged.
///
/// This is what a [`Loader`](crate::Loader) produces and what a
/// [`BehaviorCache`](crate::BehaviorCache) stores.
pub struct Root {
    slot: Slot,
    name: String,
}

impl Root {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            slot: Slot::default(),
            name: name.into(),
        }
    }

    pub fn with_child(name: impl Into<String>, child: NodeRef) -> Self {
        let mut root = Self::new(name);
        root.slot.child = Some(child);
        root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn child(&self) -> Option<&NodeRef> {
        self.slot.child.as_ref()
    }

    /// Nodes in the tree, the root included.
    pub fn node_count(&self) -> usize {
        node::count(self)
    }

    /// Look up a descendant by identifier.
    pub fn find(&self, id: NodeId) -> Option<NodeRef> {
        self.slot.child.as_ref().and_then(|child| node::find(child, id))
    }

    /// Indented outline of the tree, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} {} ({})", self.type_name(), self.id(), self.name);
        for child in self.children() {
            render_node(child.as_ref(), 1, &mut out);
        }
        out
    }
}

impl std::fmt::Debug for Root {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Root")
            .field("id", &self.id())
            .field("name", &self.name)
            .field("nodes", &self.node_count())
            .finish()
    }
}

fn render_node(node: &dyn Node, depth: usize, out: &mut String) {
    let _ = write!(out, "{:indent$}{} {}", "", node.type_name(), node.id(), indent = depth * 2);
    if node.must_complete() {
        out.push_str(" [must-complete]");
    }
    if let Some(condition) = node.condition() {
        let _ = write!(out, " if {}", crate::condition::describe(condition));
    }
    out.push('\n');
    for child in node.children() {
        render_node(child.as_ref(), depth + 1, out);
    }
}

impl Node for Root {
    fn base(&self) -> &NodeBase {
        &self.slot.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.slot.base
    }

    fn type_name(&self) -> &'static str {
        "Root"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Decorator
    }

    fn run(&self, agent: &mut Agent, elapsed: Duration) -> Status {
        self.slot
            .tick(self.type_name(), agent, elapsed)
            .unwrap_or(Status::Failed)
    }

    fn children(&self) -> &[NodeRef] {
        self.slot.children()
    }

    fn add_child(&mut self, child: NodeRef) -> Result<(), TreeError> {
        self.slot.attach(self.type_name(), child)
    }
}

