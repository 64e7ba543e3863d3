//=========================================================================
// Logic Tree
//=========================================================================
//
// Ordered node container owned by one game object.
//
// Links connect an output socket to an input socket and are validated
// when they are made, so a malformed graph never reaches the tick loop.
//
// Per tick, for each node in insertion order:
//   1. copy linked producer outputs into the node's inputs
//   2. evaluate() → stored gate
//   3. update()
//
// A producer added after its consumer is read one tick late.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::node::{LogicNode, NodeContext};
use super::socket::Socket;
use crate::core::input::StateTracker;
use crate::core::object::{GameObjects, ObjectId};
use crate::core::value::Value;
use crate::error::LogicError;

//=== Identifiers =========================================================

/// Index of a node within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// A socket on a node of the same tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketRef {
    pub node: NodeId,
    pub socket: usize,
}

impl SocketRef {
    pub fn new(node: NodeId, socket: usize) -> Self {
        Self { node, socket }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Link {
    from: SocketRef,
    to: SocketRef,
}

//=== LogicTree ===========================================================

#[derive(Debug, Clone)]
pub struct LogicTree {
    name: String,
    owner: ObjectId,
    nodes: Vec<Box<dyn LogicNode>>,
    links: Vec<Link>,
    gates: Vec<bool>,
}

impl LogicTree {
    pub fn new(name: impl Into<String>, owner: ObjectId) -> Self {
        Self {
            name: name.into(),
            owner,
            nodes: Vec::new(),
            links: Vec::new(),
            gates: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: ObjectId) {
        self.owner = owner;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    //--- Building ---------------------------------------------------------

    pub fn add_node<N: LogicNode + 'static>(&mut self, node: N) -> NodeId {
        self.add_boxed(Box::new(node))
    }

    pub fn add_boxed(&mut self, node: Box<dyn LogicNode>) -> NodeId {
        let id = NodeId(self.nodes.len());
        debug!("Tree '{}': node {} ({})", self.name, id.0, node.kind());
        self.nodes.push(node);
        self.gates.push(false);
        id
    }

    /// Links an output socket to an input socket.
    pub fn connect(&mut self, from: SocketRef, to: SocketRef) -> Result<(), LogicError> {
        let producer = self.socket_at(from)?;
        if !producer.is_output() {
            return Err(LogicError::SocketDirection {
                node: from.node.0,
                socket: from.socket,
                expected: "output",
            });
        }
        let found = producer.value_type();

        let consumer = self.socket_at(to)?;
        if !consumer.is_input() {
            return Err(LogicError::SocketDirection {
                node: to.node.0,
                socket: to.socket,
                expected: "input",
            });
        }
        if consumer.value_type() != found {
            return Err(LogicError::SocketType {
                expected: consumer.value_type(),
                found,
            });
        }

        if self.links.iter().any(|l| l.to == to) {
            return Err(LogicError::InputAlreadyLinked {
                node: to.node.0,
                socket: to.socket,
            });
        }

        self.links.push(Link { from, to });
        Ok(())
    }

    /// Sets an unlinked input's value (type checked).
    pub fn set_input(&mut self, at: SocketRef, value: impl Into<Value>) -> Result<(), LogicError> {
        let node = self
            .nodes
            .get_mut(at.node.0)
            .ok_or(LogicError::UnknownNode(at.node.0))?;
        let socket = node
            .sockets_mut()
            .get_mut(at.socket)
            .ok_or(LogicError::UnknownSocket { node: at.node.0, socket: at.socket })?;
        if !socket.is_input() {
            return Err(LogicError::SocketDirection {
                node: at.node.0,
                socket: at.socket,
                expected: "input",
            });
        }
        socket.set(value.into())
    }

    //--- Queries ----------------------------------------------------------

    pub fn node(&self, id: NodeId) -> Option<&dyn LogicNode> {
        self.nodes.get(id.0).map(|n| n.as_ref())
    }

    pub fn socket(&self, at: SocketRef) -> Option<&Socket> {
        self.socket_at(at).ok()
    }

    /// Gate returned by the node's last `evaluate`.
    pub fn is_active(&self, id: NodeId) -> bool {
        self.gates.get(id.0).copied().unwrap_or(false)
    }

    //--- Execution --------------------------------------------------------

    /// Runs one tick over every node.
    pub fn execute(&mut self, objects: &mut GameObjects, input: &StateTracker, tick: f32) {
        let mut ctx = NodeContext {
            owner: self.owner,
            objects,
            input,
        };

        for index in 0..self.nodes.len() {
            self.pull_inputs(index);

            let node = &mut self.nodes[index];
            self.gates[index] = node.evaluate(&ctx, tick);
            node.update(&mut ctx, tick);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn pull_inputs(&mut self, index: usize) {
        for link in self.links.iter().filter(|l| l.to.node.0 == index) {
            let value = match self.nodes[link.from.node.0].socket(link.from.socket) {
                Some(socket) => socket.value().clone(),
                None => continue,
            };
            if let Some(socket) = self.nodes[index].sockets_mut().get_mut(link.to.socket) {
                // `connect` only links sockets of the same type.
                let pulled = socket.set(value);
                debug_assert!(pulled.is_ok(), "linked socket type changed: {pulled:?}");
            }
        }
    }

    fn socket_at(&self, at: SocketRef) -> Result<&Socket, LogicError> {
        self.nodes
            .get(at.node.0)
            .ok_or(LogicError::UnknownNode(at.node.0))?
            .socket(at.socket)
            .ok_or(LogicError::UnknownSocket { node: at.node.0, socket: at.socket })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
