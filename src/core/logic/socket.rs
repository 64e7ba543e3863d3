//=========================================================================
// Sockets
//=========================================================================
//
// Typed, named value slots on logic nodes.
//
// The value type is fixed at construction. Two access paths:
//   - checked (`try_*`, `set`): return `LogicError::SocketType`
//   - fast (`bool`, `real`, `set_real`, ...): a mismatch is a bug,
//     asserted in debug builds; release builds return the type's default
//     and ignore writes
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::Vec3;
use crate::core::value::{Value, ValueType};
use crate::error::LogicError;

//=== SocketDirection =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketDirection {
    Input,
    Output,
}

//=== Socket ==============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Socket {
    name: &'static str,
    direction: SocketDirection,
    value: Value,
}

impl Socket {
    pub fn input(name: &'static str, default: impl Into<Value>) -> Self {
        Self {
            name,
            direction: SocketDirection::Input,
            value: default.into(),
        }
    }

    pub fn output(name: &'static str, default: impl Into<Value>) -> Self {
        Self {
            name,
            direction: SocketDirection::Output,
            value: default.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn direction(&self) -> SocketDirection {
        self.direction
    }

    pub fn is_input(&self) -> bool {
        self.direction == SocketDirection::Input
    }

    pub fn is_output(&self) -> bool {
        self.direction == SocketDirection::Output
    }

    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    //--- Checked Access ---------------------------------------------------

    /// Replaces the value if the type matches.
    pub fn set(&mut self, value: Value) -> Result<(), LogicError> {
        self.check(value.value_type())?;
        self.value = value;
        Ok(())
    }

    pub fn try_bool(&self) -> Result<bool, LogicError> {
        match self.value {
            Value::Bool(v) => Ok(v),
            _ => Err(self.mismatch(ValueType::Bool)),
        }
    }

    pub fn try_real(&self) -> Result<f32, LogicError> {
        match self.value {
            Value::Real(v) => Ok(v),
            _ => Err(self.mismatch(ValueType::Real)),
        }
    }

    pub fn try_vector(&self) -> Result<Vec3, LogicError> {
        match self.value {
            Value::Vector(v) => Ok(v),
            _ => Err(self.mismatch(ValueType::Vector)),
        }
    }

    pub fn try_str(&self) -> Result<&str, LogicError> {
        match &self.value {
            Value::String(v) => Ok(v),
            _ => Err(self.mismatch(ValueType::String)),
        }
    }

    //--- Fast Access ------------------------------------------------------

    pub fn bool(&self) -> bool {
        debug_assert_eq!(self.value_type(), ValueType::Bool, "socket '{}'", self.name);
        self.try_bool().unwrap_or_default()
    }

    pub fn real(&self) -> f32 {
        debug_assert_eq!(self.value_type(), ValueType::Real, "socket '{}'", self.name);
        self.try_real().unwrap_or_default()
    }

    pub fn vector(&self) -> Vec3 {
        debug_assert_eq!(self.value_type(), ValueType::Vector, "socket '{}'", self.name);
        self.try_vector().unwrap_or(Vec3::ZERO)
    }

    pub fn set_bool(&mut self, v: bool) {
        debug_assert_eq!(self.value_type(), ValueType::Bool, "socket '{}'", self.name);
        let _ = self.set(Value::Bool(v));
    }

    pub fn set_real(&mut self, v: f32) {
        debug_assert_eq!(self.value_type(), ValueType::Real, "socket '{}'", self.name);
        let _ = self.set(Value::Real(v));
    }

    pub fn set_vector(&mut self, v: Vec3) {
        debug_assert_eq!(self.value_type(), ValueType::Vector, "socket '{}'", self.name);
        let _ = self.set(Value::Vector(v));
    }

    //--- Internal Helpers -------------------------------------------------

    fn check(&self, found: ValueType) -> Result<(), LogicError> {
        let expected = self.value_type();
        if expected == found {
            Ok(())
        } else {
            Err(LogicError::SocketType { expected, found })
        }
    }

    fn mismatch(&self, requested: ValueType) -> LogicError {
        LogicError::SocketType {
            expected: self.value_type(),
            found: requested,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
