//! String-keyed factories for the three extension points.
//!
//! New behaviors are added by registering a factory under a name; the engine
//! itself never changes. A game registry starts from
//! [`Registry::with_builtins`] and registers its own names on top.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};

use crate::action::TimedNode;
use crate::composite::{Parallel, Priority, Sequence};
use crate::condition::{AlwaysFalse, AlwaysTrue, And, FilterCondition, Not, Or};
use crate::decorator::{Fail, Inverter, Limit, Repeater, Succeed, UntilFail, UntilSuccess};
use crate::filter::{ClearSelection, ExcludeSelf, FirstN, UniqueSelection};
use crate::{Args, Condition, Filter, Node};

pub type NodeFactory = Box<dyn Fn(&Args<'_>) -> Box<dyn Node> + Send + Sync>;
pub type ConditionFactory = Box<dyn Fn(&Args<'_>) -> Box<dyn Condition> + Send + Sync>;
pub type FilterFactory = Box<dyn Fn(&Args<'_>) -> Box<dyn Filter> + Send + Sync>;

#[derive(Default)]
pub struct Registry {
    nodes: HashMap<String, NodeFactory>,
    conditions: HashMap<String, ConditionFactory>,
    filters: HashMap<String, FilterFactory>,
}

fn insert<F>(table: &mut HashMap<String, F>, what: &'static str, name: String, factory: F) -> bool {
    match table.entry(name) {
        Entry::Occupied(entry) => {
            warn!(kind = what, name = %entry.key(), "factory already registered, keeping the existing one");
            false
        }
        Entry::Vacant(entry) => {
            debug!(kind = what, name = %entry.key(), "factory registered");
            entry.insert(factory);
            true
        }
    }
}

fn sorted_names<F>(table: &HashMap<String, F>) -> Vec<&str> {
    let mut names: Vec<&str> = table.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every engine-provided node, condition and filter.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Register the engine's base list. Names that are already taken keep
    /// their existing factory.
    pub fn register_builtins(&mut self) {
        self.register_node("Sequence", |_| Box::new(Sequence::new()));
        self.register_node("Priority", |_| Box::new(Priority::new()));
        self.register_node("Parallel", |_| Box::new(Parallel::new()));
        self.register_node("Inverter", |_| Box::new(Inverter::new()));
        self.register_node("Repeater", |_| Box::new(Repeater::new()));
        self.register_node("Limit", |args| Box::new(Limit::new(args.get(0))));
        self.register_node("Succeed", |_| Box::new(Succeed::new()));
        self.register_node("Fail", |_| Box::new(Fail::new()));
        self.register_node("UntilSuccess", |_| Box::new(UntilSuccess::new()));
        self.register_node("UntilFail", |_| Box::new(UntilFail::new()));
        self.register_node("Timed", |args| {
            let duration = Duration::from_millis(args.get(0));
            Box::new(TimedNode::new(duration).with_must_complete(args.flag(1)))
        });

        self.register_condition("And", |_| Box::new(And::new()));
        self.register_condition("Or", |_| Box::new(Or::new()));
        self.register_condition("Not", |_| Box::new(Not::new()));
        self.register_condition("True", |_| Box::new(AlwaysTrue));
        self.register_condition("False", |_| Box::new(AlwaysFalse));
        self.register_condition("Filter", |_| Box::new(FilterCondition::new()));

        self.register_filter("Clear", |_| Box::new(ClearSelection));
        self.register_filter("Unique", |_| Box::new(UniqueSelection));
        self.register_filter("First", |args| Box::new(FirstN(args.get(0))));
        self.register_filter("Exclude", |_| Box::new(ExcludeSelf));
    }

    /// Returns `false` (and keeps the existing factory) if `name` is taken.
    pub fn register_node<F>(&mut self, name: impl Into<String>, factory: F) -> bool
    where
        F: Fn(&Args<'_>) -> Box<dyn Node> + Send + Sync + 'static,
    {
        insert(&mut self.nodes, "node", name.into(), Box::new(factory))
    }

    pub fn register_condition<F>(&mut self, name: impl Into<String>, factory: F) -> bool
    where
        F: Fn(&Args<'_>) -> Box<dyn Condition> + Send + Sync + 'static,
    {
        insert(&mut self.conditions, "condition", name.into(), Box::new(factory))
    }

    pub fn register_filter<F>(&mut self, name: impl Into<String>, factory: F) -> bool
    where
        F: Fn(&Args<'_>) -> Box<dyn Filter> + Send + Sync + 'static,
    {
        insert(&mut self.filters, "filter", name.into(), Box::new(factory))
    }

    /// Instantiate a node by exact type name; `None` if unregistered.
    pub fn create_node(&self, name: &str, args: &[String]) -> Option<Box<dyn Node>> {
        self.nodes.get(name).map(|factory| factory(&Args::new(args)))
    }

    pub fn create_condition(&self, name: &str, args: &[String]) -> Option<Box<dyn Condition>> {
        self.conditions
            .get(name)
            .map(|factory| factory(&Args::new(args)))
    }

    pub fn create_filter(&self, name: &str, args: &[String]) -> Option<Box<dyn Filter>> {
        self.filters.get(name).map(|factory| factory(&Args::new(args)))
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn has_condition(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn node_types(&self) -> Vec<&str> {
        sorted_names(&self.nodes)
    }

    pub fn condition_types(&self) -> Vec<&str> {
        sorted_names(&self.conditions)
    }

    pub fn filter_types(&self) -> Vec<&str> {
        sorted_names(&self.filters)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("nodes", &self.node_types())
            .field("conditions", &self.condition_types())
            .field("filters", &self.filter_types())
            .finish()
    }
}
