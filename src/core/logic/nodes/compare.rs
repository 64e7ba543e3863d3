//=========================================================================
// Compare Node
//=========================================================================

use crate::core::logic::node::{LogicNode, NodeContext};
use crate::core::logic::socket::Socket;

const EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareKind {
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl CompareKind {
    pub fn apply(self, a: f32, b: f32) -> bool {
        let equal = (a - b).abs() <= EPSILON;
        match self {
            Self::Equal => equal,
            Self::NotEqual => !equal,
            Self::Less => a < b && !equal,
            Self::Greater => a > b && !equal,
            Self::LessEqual => a < b || equal,
            Self::GreaterEqual => a > b || equal,
        }
    }
}

/// `{a: real, b: real} → result: bool`; the gate is the result.
#[derive(Debug, Clone)]
pub struct CompareNode {
    op: CompareKind,
    sockets: [Socket; 3],
}

impl CompareNode {
    pub const A: usize = 0;
    pub const B: usize = 1;
    pub const RESULT: usize = 2;

    pub fn new(op: CompareKind) -> Self {
        Self {
            op,
            sockets: [
                Socket::input("a", 0.0f32),
                Socket::input("b", 0.0f32),
                Socket::output("result", false),
            ],
        }
    }

    fn compute(&self) -> bool {
        self.op.apply(self.sockets[Self::A].real(), self.sockets[Self::B].real())
    }
}

impl LogicNode for CompareNode {
    fn kind(&self) -> &'static str {
        "compare"
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_uses_epsilon() {
        assert!(CompareKind::Equal.apply(0.1 + 0.2, 0.3));
        assert!(!CompareKind::Less.apply(0.3, 0.1 + 0.2));
        assert!(CompareKind::GreaterEqual.apply(0.3, 0.1 + 0.2));
    }

    #[test]
    fn ordering() {
        assert!(CompareKind::Less.apply(1.0, 2.0));
        assert!(CompareKind::Greater.apply(2.0, 1.0));
        assert!(CompareKind::NotEqual.apply(2.0, 1.0));
        assert!(!CompareKind::LessEqual.apply(2.0, 1.0));
    }
}
