use std::sync::Arc;
use std::time::Duration;

use npc_bt::builder::{
    action, constant, fail, inverter, limit, repeater, succeed, until_fail, until_success,
};
use npc_bt::{
    execute, Agent, AlwaysFalse, ExecCount, Inverter, Limit, Node, NodeId, NodeRef, Root,
    Sequence, Status, TimedNode, TreeError,
};

const DT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, Default)]
struct Calls(u32);

fn counting(status: Status) -> NodeRef {
    action("Counting", move |id: NodeId, agent: &mut Agent, _: Duration| {
        agent.context_mut().entry::<Calls>(id).0 += 1;
        status
    })
}

fn calls(agent: &Agent, node: &NodeRef) -> u32 {
    agent.context().get::<Calls>(node.id()).0
}

fn run_once(node: &NodeRef) -> Status {
    execute(node, &mut Agent::new(1), DT)
}

#[test]
fn limit_stops_ticking_at_its_bound() {
    let child = counting(Status::Finished);
    let node = limit(2, child.clone());
    let mut agent = Agent::new(1);

    assert_eq!(execute(&node, &mut agent, DT), Status::Failed);
    assert_eq!(execute(&node, &mut agent, DT), Status::Failed);
    for _ in 0..3 {
        assert_eq!(execute(&node, &mut agent, DT), Status::Finished);
    }
    assert_eq!(calls(&agent, &child), 2);
    assert_eq!(agent.context().get::<ExecCount>(node.id()), ExecCount(2));
}

#[test]
fn limit_passes_running_through() {
    let node = limit(1, constant(Status::Running));
    let mut agent = Agent::new(1);
    assert_eq!(execute(&node, &mut agent, DT), Status::Running);
    assert_eq!(execute(&node, &mut agent, DT), Status::Finished);
}

#[test]
fn limit_count_is_per_agent() {
    let child = counting(Status::Finished);
    let node = limit(1, child.clone());
    let mut first = Agent::new(1);
    let mut second = Agent::new(2);

    execute(&node, &mut first, DT);
    assert_eq!(execute(&node, &mut first, DT), Status::Finished);
    assert_eq!(execute(&node, &mut second, DT), Status::Failed);
    assert_eq!(calls(&second, &child), 1);
}

#[test]
fn double_inversion_is_identity_on_terminal_statuses() {
    for status in [Status::Finished, Status::Failed] {
        let node = inverter(inverter(constant(status)));
        assert_eq!(run_once(&node), status);
    }
}

#[test]
fn inverter_maps_each_status() {
    assert_eq!(run_once(&inverter(constant(Status::Finished))), Status::Failed);
    assert_eq!(run_once(&inverter(constant(Status::Failed))), Status::Finished);
    assert_eq!(run_once(&inverter(constant(Status::Running))), Status::Running);

    let blocked: NodeRef = Arc::new(Sequence::new().with_condition(AlwaysFalse));
    assert_eq!(run_once(&inverter(blocked)), Status::Finished);
}

#[test]
fn succeed_and_fail_force_terminal_results() {
    assert_eq!(run_once(&succeed(constant(Status::Failed))), Status::Finished);
    assert_eq!(run_once(&succeed(constant(Status::Running))), Status::Running);
    assert_eq!(run_once(&fail(constant(Status::Finished))), Status::Failed);
    assert_eq!(run_once(&fail(constant(Status::Running))), Status::Running);
}

#[test]
fn repeater_ticks_its_child_once_per_call() {
    let child = counting(Status::Failed);
    let node = repeater(child.clone());
    let mut agent = Agent::new(1);
    for _ in 0..4 {
        assert_eq!(execute(&node, &mut agent, DT), Status::Running);
    }
    assert_eq!(calls(&agent, &child), 4);
}

#[test]
fn until_decorators_wait_for_their_outcome() {
    assert_eq!(run_once(&until_fail(constant(Status::Finished))), Status::Running);
    assert_eq!(run_once(&until_fail(constant(Status::Failed))), Status::Finished);
    assert_eq!(run_once(&until_success(constant(Status::Failed))), Status::Running);
    assert_eq!(run_once(&until_success(constant(Status::Finished))), Status::Finished);
}

#[test]
fn decorators_without_a_child_fail() {
    let nodes: Vec<NodeRef> = vec![
        Arc::new(Inverter::new()),
        Arc::new(Limit::new(3)),
        Arc::new(Root::new("empty")),
    ];
    for node in &nodes {
        assert_eq!(run_once(node), Status::Failed, "{}", node.type_name());
    }
}

#[test]
fn decorator_takes_exactly_one_child() {
    let mut node = Inverter::new();
    assert!(node.add_child(constant(Status::Finished)).is_ok());
    assert_eq!(
        node.add_child(constant(Status::Finished)),
        Err(TreeError::ChildAlreadySet { kind: "Inverter" })
    );
    assert_eq!(node.children().len(), 1);
}

#[test]
fn leaves_take_no_children() {
    let mut timed = TimedNode::new(DT);
    assert_eq!(
        timed.add_child(constant(Status::Finished)),
        Err(TreeError::NoChildren { kind: "Timed" })
    );
}

#[test]
fn root_outline_lists_every_node() {
    let tree = Root::with_child(
        "guard",
        inverter(Arc::new(Sequence::with_children(vec![
            constant(Status::Finished),
            constant(Status::Failed),
        ]))),
    );
    assert_eq!(tree.node_count(), 5);

    let outline = tree.render();
    let lines: Vec<&str> = outline.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Root") && lines[0].ends_with("(guard)"));
    assert!(lines[1].starts_with("  Inverter"));
    assert!(lines[2].starts_with("    Sequence"));
    assert!(lines[3].starts_with("      Constant"));

    let sequence = tree.children()[0].children()[0].clone();
    let found = tree.find(sequence.id()).map(|n| n.id());
    assert_eq!(found, Some(sequence.id()));
    assert!(tree.find(NodeId::next()).is_none());
}
