use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use npc_bt::{
    Action, Agent, BehaviorCache, LoadError, Loader, Node, NodeId, Registry, Root, Status,
    TreeError, YamlLoader,
};

const GUARD: &str = r#"
name: guard
tree:
  type: Priority
  children:
    - type: Sequence
      condition:
        type: And
        conditions:
          - type: "True"
          - type: Filter
            filter: { type: First, args: [1] }
      children:
        - type: Strike
    - type: Limit
      args: [2]
      children:
        - type: Timed
          args: [300, true]
"#;

fn registry() -> Registry {
    let mut registry = Registry::with_builtins();
    registry.register_node("Strike", |_| {
        Box::new(Action::named(
            "Strike",
            |_: NodeId, agent: &mut Agent, _: Duration| {
                agent.selection_mut().clear();
                Status::Finished
            },
        ))
    });
    registry
}

#[test]
fn loads_a_tree_document() {
    let registry = registry();
    let root = YamlLoader::new(&registry).load_str(GUARD).expect("valid document");

    assert_eq!(root.name(), "guard");
    assert_eq!(root.node_count(), 6);

    let priority = &root.children()[0];
    assert_eq!(priority.type_name(), "Priority");
    let gated = &priority.children()[0];
    let condition = gated.condition().expect("condition attached");
    assert_eq!(
        npc_bt::condition::describe(condition),
        "And(True, Filter)"
    );
    let timed = &priority.children()[1].children()[0];
    assert!(timed.must_complete());
}

#[test]
fn loaded_tree_runs() {
    let registry = registry();
    let root = Arc::new(YamlLoader::new(&registry).load_str(GUARD).expect("valid document"));

    let mut agent = Agent::new(1);
    agent.set_selection(vec![8, 9]);
    agent.set_behavior(root);

    // A target is selected, so the strike branch wins and empties the selection.
    assert_eq!(agent.update(Duration::from_millis(100)), Status::Finished);
    assert!(agent.selection().is_empty());

    // Without targets the sequence is blocked, which stops the priority.
    assert_eq!(agent.update(Duration::from_millis(100)), Status::CanNotExecute);
}

#[test]
fn unknown_types_abort_the_load() {
    let registry = registry();
    let loader = YamlLoader::new(&registry);

    let err = loader
        .load_str("name: t\ntree: { type: Dance }")
        .unwrap_err();
    assert!(matches!(err, LoadError::UnknownNode(ref name) if name == "Dance"));

    let err = loader
        .load_str("name: t\ntree: { type: Sequence, condition: { type: Maybe } }")
        .unwrap_err();
    assert!(matches!(err, LoadError::UnknownCondition(ref name) if name == "Maybe"));

    let err = loader
        .load_str(
            "name: t\ntree: { type: Sequence, condition: { type: Filter, filter: { type: Nearest } } }",
        )
        .unwrap_err();
    assert!(matches!(err, LoadError::UnknownFilter(ref name) if name == "Nearest"));
}

#[test]
fn malformed_trees_are_rejected() {
    let registry = registry();
    let loader = YamlLoader::new(&registry);

    let err = loader
        .load_str("name: t\ntree: { type: Inverter, children: [{ type: Strike }, { type: Strike }] }")
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::Tree(TreeError::ChildAlreadySet { kind: "Inverter" })
    ));

    let err = loader
        .load_str("name: t\ntree: { type: Strike, children: [{ type: Strike }] }")
        .unwrap_err();
    assert!(matches!(err, LoadError::Tree(TreeError::NoChildren { .. })));

    let err = loader
        .load_str("name: t\ntree: { type: Strike, condition: { type: \"True\", filter: { type: Clear } } }")
        .unwrap_err();
    assert!(matches!(err, LoadError::Tree(TreeError::NoFilter { kind: "True" })));

    let err = loader.load_str("tree: [").unwrap_err();
    assert!(matches!(err, LoadError::Yaml(_)));
}

#[test]
fn load_file_reads_from_disk() {
    let registry = registry();
    let loader = YamlLoader::new(&registry);

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(GUARD.as_bytes()).expect("write tree");
    let root = loader.load_file(file.path()).expect("valid document");
    assert_eq!(root.name(), "guard");

    let dir = tempfile::tempdir().expect("temp dir");
    let err = loader.load_file(&dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn cache_shares_trees_by_name() {
    let mut cache = BehaviorCache::new();
    assert!(cache.is_empty());

    let first = Arc::new(Root::new("patrol"));
    assert!(cache.add(first.clone()));
    assert!(!cache.add(Arc::new(Root::new("patrol"))));
    assert!(cache.add(Arc::new(Root::new("alert"))));
    assert_eq!(cache.names(), vec!["alert", "patrol"]);

    let cached = cache.get("patrol").expect("cached");
    assert!(Arc::ptr_eq(&cached, &first));
    assert!(cache.get("flee").is_none());

    // Only the cached instance itself is removed.
    let impostor = Root::new("patrol");
    assert!(cache.remove(&impostor).is_none());
    assert!(cache.remove(&first).is_some());
    assert!(!cache.contains("patrol"));

    assert!(cache.remove_by_name("alert").is_some());
    assert!(cache.remove_by_name("alert").is_none());
    assert_eq!(cache.len(), 0);
}

#[test]
fn cache_loads_each_document_once() {
    let registry = registry();
    let loader = YamlLoader::new(&registry);
    let mut cache = BehaviorCache::new();

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("guard.yaml");
    std::fs::write(&path, GUARD).expect("write tree");

    let root = cache.load_file(&loader, &path).expect("valid document");
    assert_eq!(root.name(), "guard");
    assert_eq!(cache.len(), 1);

    let err = cache.load_file(&loader, &path).unwrap_err();
    assert!(matches!(err, LoadError::DuplicateTree(ref name) if name == "guard"));
    assert!(Arc::ptr_eq(&cache.get("guard").expect("cached"), &root));
}
