mod error;

pub use error::FailedConnection;

/// Opaque handle to a node in the external connectivity graph.
///
/// The graph service owns node lifecycle; containers and parts only store
/// and pass these handles around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridNodeId(u64);

impl GridNodeId {
    pub fn from_u64(value: u64) -> Self {
        GridNodeId(value)
    }

    pub fn to_u64(self) -> u64 {
        self.0
    }
}

/// The external connectivity-graph service.
///
/// Destroying a node severs every connection it carried; the container
/// relies on this when it rolls a placement back or removes a part.
pub trait GridGraph {
    fn create_node(&mut self) -> GridNodeId;

    fn destroy_node(&mut self, node: GridNodeId);

    fn create_connection(
        &mut self,
        a: GridNodeId,
        b: GridNodeId,
    ) -> Result<(), FailedConnection>;

    fn destroy_connection(&mut self, a: GridNodeId, b: GridNodeId);

    fn is_active(&self, node: GridNodeId) -> bool;

    /// A node's externally visible connection state (for example its set of
    /// valid sides) changed.
    fn update_node_state(&mut self, _node: GridNodeId) {}
}
