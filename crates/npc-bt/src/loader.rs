//! Turning tree descriptions into [`Root`]s.
//!
//! A loader only ever assembles trees through the [`Registry`] and the public
//! assembly operations (`add_child`, `set_condition`, `add_condition`,
//! `set_filter`); it has no private access to node internals.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{Condition, Filter, LoadError, Node, Registry, Root};

pub trait Loader {
    fn registry(&self) -> &Registry;

    fn load_str(&self, text: &str) -> Result<Root, LoadError>;

    fn load_file(&self, path: &Path) -> Result<Root, LoadError> {
        let text = std::fs::read_to_string(path)?;
        self.load_str(&text)
    }
}

/// Loads YAML tree documents:
///
/// ```yaml
/// name: guard
/// tree:
///   type: Priority
///   children:
///     - type: Sequence
///       condition: { type: Filter, filter: { type: First, args: [1] } }
///       children:
///         - type: Timed
///           args: [500, true]
///     - type: Repeater
///       children: [{ type: Timed, args: [1000] }]
/// ```
#[derive(Debug, Clone, Copy)]
pub struct YamlLoader<'r> {
    registry: &'r Registry,
}

#[derive(Debug, Deserialize)]
struct RawTree {
    name: String,
    tree: RawNode,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    args: Vec<serde_yaml::Value>,
    #[serde(default)]
    condition: Option<RawCondition>,
    #[serde(default)]
    children: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    args: Vec<serde_yaml::Value>,
    #[serde(default)]
    conditions: Vec<RawCondition>,
    #[serde(default)]
    filter: Option<RawFilter>,
}

#[derive(Debug, Deserialize)]
struct RawFilter {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    args: Vec<serde_yaml::Value>,
}

/// Scalars are passed on as their plain text; `~` becomes an empty argument.
fn stringify(args: &[serde_yaml::Value]) -> Vec<String> {
    args.iter()
        .map(|value| match value {
            serde_yaml::Value::String(s) => s.clone(),
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Null => String::new(),
            other => serde_yaml::to_string(other)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default(),
        })
        .collect()
}

impl<'r> YamlLoader<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    fn build_node(&self, raw: &RawNode) -> Result<Box<dyn Node>, LoadError> {
        let Some(mut node) = self.registry.create_node(&raw.kind, &stringify(&raw.args)) else {
            warn!(kind = %raw.kind, "unknown node type");
            return Err(LoadError::UnknownNode(raw.kind.clone()));
        };
        if let Some(condition) = &raw.condition {
            node.set_condition(self.build_condition(condition)?);
        }
        for child in &raw.children {
            node.add_child(Arc::from(self.build_node(child)?))?;
        }
        Ok(node)
    }

    fn build_condition(&self, raw: &RawCondition) -> Result<Box<dyn Condition>, LoadError> {
        let Some(mut condition) = self
            .registry
            .create_condition(&raw.kind, &stringify(&raw.args))
        else {
            warn!(kind = %raw.kind, "unknown condition type");
            return Err(LoadError::UnknownCondition(raw.kind.clone()));
        };
        if let Some(filter) = &raw.filter {
            condition.set_filter(self.build_filter(filter)?)?;
        }
        for nested in &raw.conditions {
            condition.add_condition(self.build_condition(nested)?)?;
        }
        Ok(condition)
    }

    fn build_filter(&self, raw: &RawFilter) -> Result<Box<dyn Filter>, LoadError> {
        self.registry
            .create_filter(&raw.kind, &stringify(&raw.args))
            .ok_or_else(|| {
                warn!(kind = %raw.kind, "unknown filter type");
                LoadError::UnknownFilter(raw.kind.clone())
            })
    }
}

impl Loader for YamlLoader<'_> {
    fn registry(&self) -> &Registry {
        self.registry
    }

    fn load_str(&self, text: &str) -> Result<Root, LoadError> {
        let doc: RawTree = serde_yaml::from_str(text)?;
        let mut root = Root::new(doc.name);
        root.add_child(Arc::from(self.build_node(&doc.tree)?))?;
        debug!(tree = root.name(), nodes = root.node_count(), "behavior loaded");
        Ok(root)
    }
}
