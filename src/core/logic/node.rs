//=========================================================================
// Logic Nodes
//=========================================================================
//
// A node owns a fixed set of sockets and runs in two phases per tick:
//
//   1. `evaluate(ctx, tick) -> bool`  pure gate read by consumers
//   2. `update(ctx, tick)`            mutates sockets and owner state
//
// `update` runs whatever `evaluate` returned; each node kind decides
// what its gate means.
//
// Nodes are open for extension: games add their own kinds (a vehicle
// controller, a camera rig) by implementing `LogicNode` on a `Clone`
// type.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::socket::Socket;
use crate::core::input::StateTracker;
use crate::core::object::{GameObject, GameObjects, ObjectId};

//=== NodeContext =========================================================

/// What a node can see while its tree runs.
pub struct NodeContext<'a> {
    /// Object that owns the running tree.
    pub owner: ObjectId,
    pub objects: &'a mut GameObjects,
    pub input: &'a StateTracker,
}

impl NodeContext<'_> {
    pub fn owner(&self) -> Option<&GameObject> {
        self.objects.get(self.owner)
    }

    pub fn owner_mut(&mut self) -> Option<&mut GameObject> {
        self.objects.get_mut(self.owner)
    }
}

//=== LogicNode ===========================================================

pub trait LogicNode: NodeClone {
    /// Short kind name, used in logs.
    fn kind(&self) -> &'static str;

    fn sockets(&self) -> &[Socket];

    fn sockets_mut(&mut self) -> &mut [Socket];

    fn evaluate(&self, ctx: &NodeContext<'_>, tick: f32) -> bool;

    fn update(&mut self, ctx: &mut NodeContext<'_>, tick: f32);

    fn socket(&self, index: usize) -> Option<&Socket> {
        self.sockets().get(index)
    }
}

//--- Boxed Cloning -------------------------------------------------------

/// Lets trees holding `Box<dyn LogicNode>` be cloned for object copies.
pub trait NodeClone {
    fn clone_box(&self) -> Box<dyn LogicNode>;
}

impl<T> NodeClone for T
where
    T: LogicNode + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn LogicNode> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn LogicNode> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}

impl std::fmt::Debug for dyn LogicNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogicNode")
            .field("kind", &self.kind())
            .field("sockets", &self.sockets())
            .finish()
    }
}
