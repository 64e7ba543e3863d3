//=========================================================================
// Motion Node
//=========================================================================
//
// Sockets:
//   in update: bool = false
//   in x, y, z: real = 0   units per second
//
// While `update` is set, translates the owning object by
// `(x, y, z) * tick`, in local space unless built with `world()`.
//
//=========================================================================

use crate::core::logic::node::{LogicNode, NodeContext};
use crate::core::logic::socket::Socket;
use crate::core::math::Vec3;

#[derive(Debug, Clone)]
pub struct MotionNode {
    local: bool,
    sockets: [Socket; 4],
}

impl MotionNode {
    pub const UPDATE: usize = 0;
    pub const X: usize = 1;
    pub const Y: usize = 2;
    pub const Z: usize = 3;

    pub fn new() -> Self {
        Self {
            local: true,
            sockets: [
                Socket::input("update", false),
                Socket::input("x", 0.0f32),
                Socket::input("y", 0.0f32),
                Socket::input("z", 0.0f32),
            ],
        }
    }

    /// Moves along world axes instead of local ones.
    pub fn world(mut self) -> Self {
        self.local = false;
        self
    }

    fn velocity(&self) -> Vec3 {
        Vec3::new(
            self.sockets[Self::X].real(),
            self.sockets[Self::Y].real(),
            self.sockets[Self::Z].real(),
        )
    }
}

impl Default for MotionNode {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicNode for MotionNode {
    fn kind(&self) -> &'static str {
        "motion"
    }

    fn sockets(&self) -> &[Socket] {
        &self.sockets
    }

    fn sockets_mut(&mut self) -> &mut [Socket] {
        &mut self.sockets
    }

    fn evaluate(&self, _ctx: &NodeContext<'_>, _tick: f32) -> bool {
        self.sockets[Self::UPDATE].bool()
    }

    fn update(&mut self, ctx: &mut NodeContext<'_>, tick: f32) {
        if !self.sockets[Self::UPDATE].bool() {
            return;
        }
        let delta = self.velocity() * tick;
        let local = self.local;
        if let Some(owner) = ctx.owner_mut() {
            owner.translate(delta, local);
        }
    }
}
