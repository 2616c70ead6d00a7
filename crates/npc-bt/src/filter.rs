//! Filters narrow or replace an agent's working selection.
//!
//! A filter always operates on the whole current selection and never assumes
//! it started empty: earlier filters in the same tick may already have
//! populated or sorted it.

use std::collections::HashSet;

use crate::Agent;

pub trait Filter: Send + Sync + 'static {
    fn type_name(&self) -> &'static str;

    fn execute(&self, agent: &mut Agent);
}

/// Empties the selection.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClearSelection;

impl Filter for ClearSelection {
    fn type_name(&self) -> &'static str {
        "Clear"
    }

    fn execute(&self, agent: &mut Agent) {
        agent.selection_mut().clear();
    }
}

/// Drops repeated entries, keeping the first occurrence of each.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniqueSelection;

impl Filter for UniqueSelection {
    fn type_name(&self) -> &'static str {
        "Unique"
    }

    fn execute(&self, agent: &mut Agent) {
        let mut seen = HashSet::new();
        agent.selection_mut().retain(|entity| seen.insert(*entity));
    }
}

/// Keeps the first `n` entries.
#[derive(Debug, Clone, Copy)]
pub struct FirstN(pub usize);

impl Filter for FirstN {
    fn type_name(&self) -> &'static str {
        "First"
    }

    fn execute(&self, agent: &mut Agent) {
        agent.selection_mut().truncate(self.0);
    }
}

/// Removes the agent's own entity.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExcludeSelf;

impl Filter for ExcludeSelf {
    fn type_name(&self) -> &'static str {
        "Exclude"
    }

    fn execute(&self, agent: &mut Agent) {
        let me = agent.entity();
        agent.selection_mut().retain(|entity| *entity != me);
    }
}
