//=========================================================================
// Key Node
//=========================================================================
//
// Publishes the state of one key:
//   out pressed:  bool  went down this tick
//   out released: bool  went up this tick
//   out is_down:  bool  held
//
//=========================================================================

use crate::core::input::KeyCode;
use crate::core::logic::node::{LogicNode, NodeContext};
use crate::core::logic::socket::Socket;

#[derive(Debug, Clone)]
pub struct KeyNode {
    key: KeyCode,
    sockets: [Socket; 3],
}

impl KeyNode {
    pub const PRESSED: usize = 0;
    pub const RELEASED: usize = 1;
    pub const IS_DOWN: usize = 2;

    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            sockets: [
                Socket::output("pressed", false),
                Socket::output("released", false),
                Socket::output("is_down", false),
            ],
        }
    }

    pub fn key(&self) -> KeyCode {
        self.key
    }
}

impl LogicNode for KeyNode {
    fn kind(&self) -> &'static str {
        "key"
    }

    fn sockets(&self) -> &[Socket] {
        &self.sockets
    }

    fn sockets_mut(&mut self) -> &mut [Socket] {
        &mut self.sockets
    }

    fn evaluate(&self, _ctx: &NodeContext<'_>, _tick: f32) -> bool {
        true
    }

    fn update(&mut self, ctx: &mut NodeContext<'_>, _tick: f32) {
        let input = ctx.input;
        self.sockets[Self::PRESSED].set_bool(input.is_key_pressed(self.key));
        self.sockets[Self::RELEASED].set_bool(input.is_key_released(self.key));
        self.sockets[Self::IS_DOWN].set_bool(input.is_key_down(self.key));
    }
}
