//! Leaves and filters the driver registers on top of the engine builtins.

use std::time::Duration;

use npc_bt::{Action, ActionLogic, Agent, Args, Filter, Registry};
use npc_core::{EntityId, NodeId, Status};
use tracing::info;

/// Logs its message and finishes.
#[derive(Debug, Clone)]
pub struct LogMessage {
    message: String,
}

impl ActionLogic for LogMessage {
    fn do_action(&self, node: NodeId, agent: &mut Agent, _elapsed: Duration) -> Status {
        info!(
            entity = agent.entity(),
            node = %node,
            selection = ?agent.selection(),
            "{}",
            self.message
        );
        Status::Finished
    }
}

/// Replaces the selection with a fixed set of entities.
#[derive(Debug, Clone)]
pub struct SelectEntities(pub Vec<EntityId>);

impl Filter for SelectEntities {
    fn type_name(&self) -> &'static str {
        "Select"
    }

    fn execute(&self, agent: &mut Agent) {
        agent.set_selection(self.0.clone());
    }
}

fn log_message(args: &Args<'_>) -> LogMessage {
    LogMessage {
        message: args.iter().collect::<Vec<_>>().join(" "),
    }
}

/// `Log` (message words), `Idle` (must-complete flag) and `Select` (entity ids).
pub fn register(registry: &mut Registry) {
    registry.register_node("Log", |args| {
        Box::new(Action::named("Log", log_message(args)))
    });
    registry.register_node("Idle", |args| {
        let idle = |_: NodeId, _: &mut Agent, _: Duration| Status::Running;
        Box::new(Action::named("Idle", idle).with_must_complete(args.flag(0)))
    });
    registry.register_filter("Select", |args| {
        Box::new(SelectEntities(args.parse_all()))
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use npc_bt::{execute, Node, NodeRef};

    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn demo_types_are_registered_once() {
        let mut registry = Registry::with_builtins();
        register(&mut registry);
        assert!(registry.has_node("Log"));
        assert!(registry.has_node("Idle"));
        assert!(registry.has_filter("Select"));
        assert!(!registry.register_node("Log", |_| Box::new(npc_bt::Sequence::new())));
    }

    #[test]
    fn log_finishes_and_idle_runs() {
        let mut registry = Registry::new();
        register(&mut registry);
        let mut agent = Agent::new(1);

        let log: NodeRef = Arc::from(registry.create_node("Log", &strings(&["hello", "there"])).unwrap());
        assert_eq!(execute(&log, &mut agent, Duration::ZERO), Status::Finished);

        let idle: NodeRef = Arc::from(registry.create_node("Idle", &strings(&["true"])).unwrap());
        assert!(idle.must_complete());
        assert_eq!(execute(&idle, &mut agent, Duration::ZERO), Status::Running);
    }

    #[test]
    fn select_replaces_the_selection() {
        let mut registry = Registry::new();
        register(&mut registry);
        let mut agent = Agent::new(1);
        agent.set_selection(vec![99]);

        let filter = registry
            .create_filter("Select", &strings(&["4", "x", "5"]))
            .unwrap();
        filter.execute(&mut agent);
        assert_eq!(agent.selection(), &[4, 5]);
    }
}
