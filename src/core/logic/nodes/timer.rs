//=========================================================================
// Timer Node
//=========================================================================
//
// Sockets:
//   in  enable:  bool = true
//   in  seed:    real = 0
//   out elapsed: real = 0
//
// The gate is `enable`. Accumulation is not gated: every update adds the
// tick to `seed`, writes it back and publishes it on `elapsed`, so the
// timer keeps running while consumers ignore it.
//
//=========================================================================

use crate::core::logic::node::{LogicNode, NodeContext};
use crate::core::logic::socket::Socket;

#[derive(Debug, Clone)]
pub struct TimerNode {
    sockets: [Socket; 3],
}

impl TimerNode {
    pub const ENABLE: usize = 0;
    pub const SEED: usize = 1;
    pub const ELAPSED: usize = 2;

    pub fn new() -> Self {
        Self {
            sockets: [
                Socket::input("enable", true),
                Socket::input("seed", 0.0f32),
                Socket::output("elapsed", 0.0f32),
            ],
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.sockets[Self::ELAPSED].real()
    }
}

impl Default for TimerNode {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicNode for TimerNode {
    fn kind(&self) -> &'static str {
        "timer"
    }

    fn sockets(&self) -> &[Socket] {
        &self.sockets
    }

    fn sockets_mut(&mut self) -> &mut [Socket] {
        &mut self.sockets
    }

    fn evaluate(&self, _ctx: &NodeContext<'_>, _tick: f32) -> bool {
        self.sockets[Self::ENABLE].bool()
    }

    fn update(&mut self, _ctx: &mut NodeContext<'_>, tick: f32) {
        let elapsed = self.sockets[Self::SEED].real() + tick;
        self.sockets[Self::SEED].set_real(elapsed);
        self.sockets[Self::ELAPSED].set_real(elapsed);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
