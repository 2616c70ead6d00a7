//! Conditions gate whether a node may execute at all.

use tracing::warn;

use crate::node::Node;
use crate::{Agent, Filter, TreeError};

pub trait Condition: Send + Sync + 'static {
    fn type_name(&self) -> &'static str;

    /// `node` is the node this condition is attached to.
    fn evaluate(&self, agent: &mut Agent, node: &dyn Node) -> bool;

    fn add_condition(&mut self, _condition: Box<dyn Condition>) -> Result<(), TreeError> {
        Err(TreeError::NoNestedConditions {
            kind: self.type_name(),
        })
    }

    fn set_filter(&mut self, _filter: Box<dyn Filter>) -> Result<(), TreeError> {
        Err(TreeError::NoFilter {
            kind: self.type_name(),
        })
    }

    fn conditions(&self) -> &[Box<dyn Condition>] {
        &[]
    }
}

/// `And(True, Filter)`-style rendering used by tree outlines.
pub fn describe(condition: &dyn Condition) -> String {
    let nested = condition.conditions();
    if nested.is_empty() {
        return condition.type_name().to_string();
    }
    let inner: Vec<String> = nested.iter().map(|c| describe(c.as_ref())).collect();
    format!("{}({})", condition.type_name(), inner.join(", "))
}

/// True when every nested condition is, evaluated left to right; stops at
/// the first false one.
#[derive(Default)]
pub struct And {
    conditions: Vec<Box<dyn Condition>>,
}

impl And {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(conditions: Vec<Box<dyn Condition>>) -> Self {
        Self { conditions }
    }
}

impl Condition for And {
    fn type_name(&self) -> &'static str {
        "And"
    }

    fn evaluate(&self, agent: &mut Agent, node: &dyn Node) -> bool {
        self.conditions.iter().all(|c| c.evaluate(agent, node))
    }

    fn add_condition(&mut self, condition: Box<dyn Condition>) -> Result<(), TreeError> {
        self.conditions.push(condition);
        Ok(())
    }

    fn conditions(&self) -> &[Box<dyn Condition>] {
        &self.conditions
    }
}

/// True as soon as one nested condition is; stops at the first true one.
#[derive(Default)]
pub struct Or {
    conditions: Vec<Box<dyn Condition>>,
}

impl Or {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(conditions: Vec<Box<dyn Condition>>) -> Self {
        Self { conditions }
    }
}

impl Condition for Or {
    fn type_name(&self) -> &'static str {
        "Or"
    }

    fn evaluate(&self, agent: &mut Agent, node: &dyn Node) -> bool {
        self.conditions.iter().any(|c| c.evaluate(agent, node))
    }

    fn add_condition(&mut self, condition: Box<dyn Condition>) -> Result<(), TreeError> {
        self.conditions.push(condition);
        Ok(())
    }

    fn conditions(&self) -> &[Box<dyn Condition>] {
        &self.conditions
    }
}

/// Negates its single inner condition. Without one it evaluates false.
#[derive(Default)]
pub struct Not {
    inner: Option<Box<dyn Condition>>,
}

impl Not {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(inner: impl Condition) -> Self {
        Self {
            inner: Some(Box::new(inner)),
        }
    }
}

impl Condition for Not {
    fn type_name(&self) -> &'static str {
        "Not"
    }

    fn evaluate(&self, agent: &mut Agent, node: &dyn Node) -> bool {
        match &self.inner {
            Some(inner) => !inner.evaluate(agent, node),
            None => {
                warn!(node = %node.id(), "Not condition evaluated without an inner condition");
                false
            }
        }
    }

    fn add_condition(&mut self, condition: Box<dyn Condition>) -> Result<(), TreeError> {
        if self.inner.is_some() {
            return Err(TreeError::ConditionAlreadySet {
                kind: self.type_name(),
            });
        }
        self.inner = Some(condition);
        Ok(())
    }

    fn conditions(&self) -> &[Box<dyn Condition>] {
        self.inner.as_slice()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysTrue;

impl Condition for AlwaysTrue {
    fn type_name(&self) -> &'static str {
        "True"
    }

    fn evaluate(&self, _agent: &mut Agent, _node: &dyn Node) -> bool {
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysFalse;

impl Condition for AlwaysFalse {
    fn type_name(&self) -> &'static str {
        "False"
    }

    fn evaluate(&self, _agent: &mut Agent, _node: &dyn Node) -> bool {
        false
    }
}

/// Runs its filter (if any) against the agent's selection, then holds iff
/// the selection is non-empty.
#[derive(Default)]
pub struct FilterCondition {
    filter: Option<Box<dyn Filter>>,
}

impl FilterCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(filter: impl Filter) -> Self {
        Self {
            filter: Some(Box::new(filter)),
        }
    }

    pub fn filter(&self) -> Option<&dyn Filter> {
        self.filter.as_deref()
    }
}

impl Condition for FilterCondition {
    fn type_name(&self) -> &'static str {
        "Filter"
    }

    fn evaluate(&self, agent: &mut Agent, _node: &dyn Node) -> bool {
        if let Some(filter) = &self.filter {
            filter.execute(agent);
        }
        !agent.selection().is_empty()
    }

    fn set_filter(&mut self, filter: Box<dyn Filter>) -> Result<(), TreeError> {
        self.filter = Some(filter);
        Ok(())
    }
}

/// Closure-backed condition for game code that does not need a named type.
pub struct Predicate<F> {
    name: &'static str,
    test: F,
}

impl<F> Predicate<F>
where
    F: Fn(&Agent, &dyn Node) -> bool + Send + Sync + 'static,
{
    pub fn new(name: &'static str, test: F) -> Self {
        Self { name, test }
    }
}

impl<F> Condition for Predicate<F>
where
    F: Fn(&Agent, &dyn Node) -> bool + Send + Sync + 'static,
{
    fn type_name(&self) -> &'static str {
        self.name
    }

    fn evaluate(&self, agent: &mut Agent, node: &dyn Node) -> bool {
        (self.test)(agent, node)
    }
}
