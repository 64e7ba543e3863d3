//=========================================================================
// Logic Op Node
//=========================================================================

use crate::core::logic::node::{LogicNode, NodeContext};
use crate::core::logic::socket::Socket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOpKind {
    And,
    Or,
    Xor,
    Nand,
    Nor,
}

impl LogicOpKind {
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Self::And => a && b,
            Self::Or => a || b,
            Self::Xor => a != b,
            Self::Nand => !(a && b),
            Self::Nor => !(a || b),
        }
    }
}

/// `{a, b} → result`; the gate is the result.
#[derive(Debug, Clone)]
pub struct LogicOpNode {
    op: LogicOpKind,
    sockets: [Socket; 3],
}

impl LogicOpNode {
    pub const A: usize = 0;
    pub const B: usize = 1;
    pub const RESULT: usize = 2;

    pub fn new(op: LogicOpKind) -> Self {
        Self {
            op,
            sockets: [
                Socket::input("a", false),
                Socket::input("b", false),
                Socket::output("result", false),
            ],
        }
    }

    fn compute(&self) -> bool {
        self.op.apply(self.sockets[Self::A].bool(), self.sockets[Self::B].bool())
    }
}

impl LogicNode for LogicOpNode {
    fn kind(&self) -> &'static str {
        "logic_op"
    }

    fn sockets(&self) -> &[Socket] {
        &self.sockets
    }

    fn sockets_mut(&mut self) -> &mut [Socket] {
        &mut self.sockets
    }

    fn evaluate(&self, _ctx: &NodeContext<'_>, _tick: f32) -> bool {
        self.compute()
    }

    fn update(&mut self, _ctx: &mut NodeContext<'_>, _tick: f32) {
        let result = self.compute();
        self.sockets[Self::RESULT].set_bool(result);
    }
}
