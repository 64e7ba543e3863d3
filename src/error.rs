//=========================================================================
// Error Types
//=========================================================================
//
// Error taxonomy for the engine.
//
// - EngineError: configuration/setup failures surfaced to the user
// - ConfigError: loading and validating `EngineConfig`
// - LogicError: logic tree and logic brick construction failures
//
// Per-tick absence (no body, no contacts, no links) is never an error.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::value::ValueType;

//=== EngineError =========================================================

/// Engine setup and lifecycle errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown render system")]
    UnknownRenderSystem,

    #[error("no render backend present")]
    NoRenderBackend,

    #[error("can't run without a registered scene")]
    NoRegisteredScene,

    #[error("can't run without a window system")]
    NoWindowSystem,

    #[error("engine is not initialized")]
    NotInitialized,

    #[error("engine has been finalized")]
    Finalized,

    #[error("window error: {0}")]
    Window(String),

    #[error("render backend error: {0}")]
    Render(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

//=== ConfigError =========================================================

/// Errors raised while loading an [`EngineConfig`](crate::engine::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

//=== LogicError ==========================================================

/// Logic tree and logic brick construction errors.
///
/// All of these are raised while a tree or link is being built, never
/// while it is being ticked.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LogicError {
    #[error("socket type mismatch: expected {expected:?}, found {found:?}")]
    SocketType { expected: ValueType, found: ValueType },

    #[error("socket {socket} of node {node} is not an {expected}")]
    SocketDirection {
        node: usize,
        socket: usize,
        expected: &'static str,
    },

    #[error("unknown node {0}")]
    UnknownNode(usize),

    #[error("node {node} has no socket {socket}")]
    UnknownSocket { node: usize, socket: usize },

    #[error("input socket {socket} of node {node} is already linked")]
    InputAlreadyLinked { node: usize, socket: usize },

    #[error("unknown sensor {0}")]
    UnknownSensor(usize),

    #[error("unknown controller {0}")]
    UnknownController(usize),

    #[error("unknown actuator {0}")]
    UnknownActuator(usize),
}
