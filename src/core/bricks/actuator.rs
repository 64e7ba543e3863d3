//=========================================================================
// Actuators
//=========================================================================
//
// Act on the world when pulsed by a controller.
//
// A positive pulse activates an actuator and a negative one deactivates
// it. Motion keeps running every tick while active; every other kind
// runs once per positive pulse.
//
// Side effects that would change scene structure (ending an object,
// switching scenes) are queued and applied after the tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::math::Vec3;
use crate::core::message::{LogicMessage, MessageManager};
use crate::core::object::{GameObjects, ObjectId, ObjectQueue, ObjectRequest};
use crate::core::scene::SceneRequest;
use crate::core::value::Value;

//=== Actuator Kinds ======================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyOp {
    Assign(Value),
    /// Numeric add, same type only.
    Add(Value),
    /// Flips a bool variable.
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneOp {
    Restart,
    /// Replace the running scene with the named one.
    Set(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorKind {
    /// Units and radians per second.
    Motion { linear: Vec3, angular: Vec3, local: bool },
    Property { name: String, op: PropertyOp },
    Visibility { visible: bool },
    EndObject,
    /// An empty `to` broadcasts.
    Message { to: String, subject: String, body: String },
    Scene(SceneOp),
}

impl ActuatorKind {
    fn is_continuous(&self) -> bool {
        matches!(self, Self::Motion { .. })
    }
}

//=== ActuatorContext =====================================================

pub struct ActuatorContext<'a> {
    /// Name of the scene the actuator runs in.
    pub scene: &'a str,
    pub objects: &'a mut GameObjects,
    pub messages: &'a mut MessageManager,
    pub object_queue: &'a mut ObjectQueue,
    pub scene_requests: &'a mut Vec<SceneRequest>,
    pub tick: f32,
}

//=== Actuator ============================================================

#[derive(Debug, Clone)]
pub struct Actuator {
    name: String,
    kind: ActuatorKind,

    //--- Runtime ---------------------------------------------------------
    active: bool,
    triggered: bool,
    pending: Option<bool>,
}

impl Actuator {
    pub fn new(name: impl Into<String>, kind: ActuatorKind) -> Self {
        Self {
            name: name.into(),
            kind,
            active: false,
            triggered: false,
            pending: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ActuatorKind {
        &self.kind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Records a controller pulse. Positive wins within a tick.
    pub(crate) fn pulse(&mut self, positive: bool) {
        self.pending = Some(self.pending.unwrap_or(false) || positive);
    }

    /// Applies this tick's pulse, if any.
    pub(crate) fn deliver(&mut self) {
        self.triggered = false;
        if let Some(positive) = self.pending.take() {
            self.active = positive;
            self.triggered = positive;
        }
    }

    /// `true` if `execute` has work this tick.
    pub(crate) fn should_run(&self) -> bool {
        if self.kind.is_continuous() {
            self.active
        } else {
            self.triggered
        }
    }

    pub(crate) fn execute(&mut self, owner: ObjectId, ctx: &mut ActuatorContext<'_>) {
        let tick = ctx.tick;
        match &self.kind {
            ActuatorKind::Motion { linear, angular, local } => {
                if let Some(object) = ctx.objects.get_mut(owner) {
                    if *linear != Vec3::ZERO {
                        object.translate(*linear * tick, *local);
                    }
                    if *angular != Vec3::ZERO {
                        object.rotate(*angular * tick, *local);
                    }
                }
            }

            ActuatorKind::Property { name, op } => {
                let Some(object) = ctx.objects.get_mut(owner) else {
                    return;
                };
                let next = match op {
                    PropertyOp::Assign(value) => Some(value.clone()),
                    PropertyOp::Add(delta) => object.variable(name).and_then(|v| v.add(delta)),
                    PropertyOp::Toggle => match object.variable(name) {
                        Some(Value::Bool(v)) => Some(Value::Bool(!v)),
                        _ => None,
                    },
                };
                match next {
                    Some(value) => object.set_variable(name.clone(), value),
                    None => warn!(
                        "Actuator '{}': {:?} not applicable to '{}' on '{}'",
                        self.name,
                        op,
                        name,
                        object.name()
                    ),
                }
            }

            ActuatorKind::Visibility { visible } => {
                if let Some(object) = ctx.objects.get_mut(owner) {
                    object.set_visible(*visible);
                }
            }

            ActuatorKind::EndObject => {
                ctx.object_queue.push(ObjectRequest::Unload(owner));
            }

            ActuatorKind::Message { to, subject, body } => {
                let from = ctx
                    .objects
                    .get(owner)
                    .map(|o| o.name().to_string())
                    .unwrap_or_default();
                ctx.messages
                    .send(LogicMessage::new(from, to.clone(), subject.clone(), body.clone()));
            }

            ActuatorKind::Scene(op) => {
                let request = match op {
                    SceneOp::Restart => SceneRequest::Restart(ctx.scene.to_string()),
                    SceneOp::Set(name) => SceneRequest::Replace {
                        from: ctx.scene.to_string(),
                        to: name.clone(),
                    },
                };
                debug!("Actuator '{}' queued {:?}", self.name, request);
                ctx.scene_requests.push(request);
            }
        }
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.triggered = false;
        self.pending = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
