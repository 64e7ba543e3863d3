//=========================================================================
// Logic Nodes
//=========================================================================
//
// Dataflow logic: typed sockets, nodes, per-object trees and the
// per-scene node manager.
//
//=========================================================================

pub mod node;
pub mod node_manager;
pub mod nodes;
pub mod socket;
pub mod tree;

pub use node::{LogicNode, NodeContext};
pub use node_manager::NodeManager;
pub use socket::{Socket, SocketDirection};
pub use tree::{LogicTree, NodeId, SocketRef};
