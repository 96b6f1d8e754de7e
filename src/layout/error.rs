use pagecraft_api::NodeId;

/// Reasons a structural mutation was rejected.
///
/// A rejected mutation leaves the tree and the history exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid destination: {0}")]
    InvalidDestination(String),
    #[error("no component with uuid {0}")]
    NodeNotFound(NodeId),
    #[error("uuid {0} is already used in the layout")]
    DuplicateNode(NodeId),
    #[error("region {0:?} appears more than once")]
    DuplicateRegion(String),
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}
