use std::time::Duration;

use npc_bt::{Action, Agent, Filter, Limit, Node, NodeId, NodeKind, Registry, Status};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn builtins_cover_the_engine_types() {
    let registry = Registry::with_builtins();
    assert_eq!(
        registry.node_types(),
        vec![
            "Fail",
            "Inverter",
            "Limit",
            "Parallel",
            "Priority",
            "Repeater",
            "Sequence",
            "Succeed",
            "Timed",
            "UntilFail",
            "UntilSuccess",
        ]
    );
    assert_eq!(
        registry.condition_types(),
        vec!["And", "False", "Filter", "Not", "Or", "True"]
    );
    assert_eq!(
        registry.filter_types(),
        vec!["Clear", "Exclude", "First", "Unique"]
    );
}

#[test]
fn empty_registry_knows_nothing() {
    let registry = Registry::new();
    assert!(!registry.has_node("Sequence"));
    assert!(registry.create_node("Sequence", &[]).is_none());
    assert!(registry.create_condition("True", &[]).is_none());
    assert!(registry.create_filter("Clear", &[]).is_none());
}

#[test]
fn lookup_is_by_exact_name() {
    let registry = Registry::with_builtins();
    assert!(registry.create_node("sequence", &[]).is_none());
    assert!(registry.create_node("Sequence ", &[]).is_none());
    let node = registry.create_node("Sequence", &[]).expect("builtin");
    assert_eq!(node.type_name(), "Sequence");
    assert_eq!(node.kind(), NodeKind::Composite);
}

#[test]
fn duplicate_registration_keeps_the_original() {
    let mut registry = Registry::with_builtins();
    let replaced = registry.register_node("Sequence", |_| {
        Box::new(Action::named(
            "Impostor",
            |_: NodeId, _: &mut Agent, _: Duration| Status::Failed,
        ))
    });
    assert!(!replaced);
    let node = registry.create_node("Sequence", &[]).expect("builtin");
    assert_eq!(node.type_name(), "Sequence");

    // Registering the base list twice is harmless.
    registry.register_builtins();
    assert_eq!(registry.node_types().len(), 11);
}

#[test]
fn game_registry_extends_the_base_list() {
    let mut registry = Registry::with_builtins();
    assert!(registry.register_node("Wait", |args| {
        let status = if args.flag(0) {
            Status::Finished
        } else {
            Status::Running
        };
        Box::new(Action::named(
            "Wait",
            move |_: NodeId, _: &mut Agent, _: Duration| status,
        ))
    }));
    assert!(registry.has_node("Wait"));

    let node = registry
        .create_node("Wait", &strings(&["yes"]))
        .expect("registered");
    assert_eq!(node.type_name(), "Wait");
    assert_eq!(node.kind(), NodeKind::Action);
}

#[test]
fn arguments_are_parsed_by_the_factory() {
    let registry = Registry::with_builtins();

    let mut agent = Agent::new(1);
    let node = registry
        .create_node("Limit", &strings(&["2"]))
        .expect("builtin");
    assert!(node.children().is_empty());

    // Missing or garbage arguments fall back to the type default.
    let zero = Limit::new(0);
    assert_eq!(zero.bound(), 0);
    let garbage = registry
        .create_node("Limit", &strings(&["many"]))
        .expect("builtin");
    let garbage: npc_bt::NodeRef = std::sync::Arc::from(garbage);
    assert_eq!(
        npc_bt::execute(&garbage, &mut agent, Duration::ZERO),
        Status::Finished
    );

    let filter = registry
        .create_filter("First", &strings(&["1"]))
        .expect("builtin");
    agent.set_selection(vec![5, 6, 7]);
    filter.execute(&mut agent);
    assert_eq!(agent.selection(), &[5]);
}
