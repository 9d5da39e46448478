use thiserror::Error;

/// Failure to obtain a graph description.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read graph description: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid graph description: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Structural problems in a graph description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph description has no `{name}` node")]
    MissingSentinel { name: String },
    #[error("edge {edge} references unknown node `{name}`")]
    UnresolvedEndpoint { edge: usize, name: String },
    #[error("node `{name}` is declared more than once")]
    DuplicateNode { name: String },
    #[error("highlight path needs at least two nodes, got {len}")]
    PathTooShort { len: usize },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Graph(#[from] GraphError),
}
