use thiserror::Error;

/// Tree assembly failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("{kind} does not take children")]
    NoChildren { kind: &'static str },

    #[error("{kind} already has a child")]
    ChildAlreadySet { kind: &'static str },

    #[error("{kind} does not take nested conditions")]
    NoNestedConditions { kind: &'static str },

    #[error("{kind} already holds its inner condition")]
    ConditionAlreadySet { kind: &'static str },

    #[error("{kind} does not take a filter")]
    NoFilter { kind: &'static str },
}

/// Failures while turning a tree description into a [`Root`](crate::Root).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unregistered node type: {0}")]
    UnknownNode(String),

    #[error("unregistered condition type: {0}")]
    UnknownCondition(String),

    #[error("unregistered filter type: {0}")]
    UnknownFilter(String),

    #[error("malformed tree: {0}")]
    Tree(#[from] TreeError),

    #[error("a behavior named {0:?} is already cached")]
    DuplicateTree(String),
}
