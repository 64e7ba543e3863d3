//=========================================================================
// Built-in Nodes
//=========================================================================

mod compare;
mod key;
mod logic_op;
mod motion;
mod timer;

pub use compare::{CompareKind, CompareNode};
pub use key::KeyNode;
pub use logic_op::{LogicOpKind, LogicOpNode};
pub use motion::MotionNode;
pub use timer::TimerNode;
