//=========================================================================
// Values
//=========================================================================
//
// Typed scalar shared by logic sockets and game object variables.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== ValueType ===========================================================

/// Type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Int,
    Real,
    Vector,
    String,
}

//=== Value ===============================================================

/// A typed value carried by a socket or stored as an object variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Real(f32),
    Vector(Vec3),
    String(String),
}

impl Value {
    /// Returns the type tag of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Real(_) => ValueType::Real,
            Self::Vector(_) => ValueType::Vector,
            Self::String(_) => ValueType::String,
        }
    }

    /// Returns the default value for a type tag.
    pub fn default_of(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Bool => Self::Bool(false),
            ValueType::Int => Self::Int(0),
            ValueType::Real => Self::Real(0.0),
            ValueType::Vector => Self::Vector(Vec3::ZERO),
            ValueType::String => Self::String(String::new()),
        }
    }

    /// Numeric addition for Int, Real and Vector values of the same type.
    ///
    /// Returns `None` for non-numeric or mismatched operands.
    pub fn add(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(Self::Int(a.wrapping_add(*b))),
            (Self::Real(a), Self::Real(b)) => Some(Self::Real(a + b)),
            (Self::Vector(a), Self::Vector(b)) => Some(Self::Vector(*a + *b)),
            _ => None,
        }
    }

    /// Returns the value as a real number when it is numeric.
    pub fn as_real(&self) -> Option<f32> {
        match self {
            Self::Int(v) => Some(*v as f32),
            Self::Real(v) => Some(*v),
            _ => None,
        }
    }
}

//--- Conversions ---------------------------------------------------------

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Real(v)
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Self::Vector(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
