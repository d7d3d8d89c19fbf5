use thiserror::Error;

/// The graph service refused to create a connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailedConnection {
    #[error("node {node} is not known to the graph")]
    UnknownNode { node: u64 },

    #[error("nodes {a} and {b} are already connected")]
    AlreadyConnected { a: u64, b: u64 },

    #[error("the graph rejected the connection: {reason}")]
    Rejected { reason: &'static str },
}
