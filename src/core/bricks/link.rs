//=========================================================================
// Logic Link
//=========================================================================
//
// One object's bricks: sensors, controllers, actuators and the wiring
// between them.
//
// A link stored on a game object is a template. Loading the object
// instantiates a fresh copy (runtime state reset) into the scene's
// logic manager, so clones and reloads never share sensor state.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::actuator::Actuator;
use super::controller::Controller;
use super::sensor::Sensor;
use crate::core::object::ObjectId;
use crate::error::LogicError;

//=== LogicLink ===========================================================

#[derive(Debug, Clone)]
pub struct LogicLink {
    owner: Option<ObjectId>,

    /// State bits; controllers whose mask misses all of them are skipped.
    pub state: u32,
    sensors: Vec<Sensor>,
    controllers: Vec<Controller>,
    actuators: Vec<Actuator>,
}

impl Default for LogicLink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicLink {
    pub fn new() -> Self {
        Self {
            owner: None,
            state: 1,
            sensors: Vec::new(),
            controllers: Vec::new(),
            actuators: Vec::new(),
        }
    }

    /// Owning object, `None` for templates.
    pub fn owner(&self) -> Option<ObjectId> {
        self.owner
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty() && self.controllers.is_empty() && self.actuators.is_empty()
    }

    //--- Building ---------------------------------------------------------

    pub fn add_sensor(&mut self, sensor: Sensor) -> usize {
        self.sensors.push(sensor);
        self.sensors.len() - 1
    }

    pub fn add_controller(&mut self, controller: Controller) -> usize {
        self.controllers.push(controller);
        self.controllers.len() - 1
    }

    pub fn add_actuator(&mut self, actuator: Actuator) -> usize {
        self.actuators.push(actuator);
        self.actuators.len() - 1
    }

    /// Feeds `sensor` into `controller`.
    pub fn link_sensor(&mut self, sensor: usize, controller: usize) -> Result<(), LogicError> {
        if controller >= self.controllers.len() {
            return Err(LogicError::UnknownController(controller));
        }
        let s = self
            .sensors
            .get_mut(sensor)
            .ok_or(LogicError::UnknownSensor(sensor))?;

        if !s.controllers.contains(&controller) {
            s.controllers.push(controller);
            self.controllers[controller].sensors.push(sensor);
        }
        Ok(())
    }

    /// Drives `actuator` from `controller`.
    pub fn link_actuator(&mut self, controller: usize, actuator: usize) -> Result<(), LogicError> {
        if actuator >= self.actuators.len() {
            return Err(LogicError::UnknownActuator(actuator));
        }
        let c = self
            .controllers
            .get_mut(controller)
            .ok_or(LogicError::UnknownController(controller))?;

        if !c.actuators.contains(&actuator) {
            c.actuators.push(actuator);
        }
        Ok(())
    }

    //--- Access -----------------------------------------------------------

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    pub fn actuators(&self) -> &[Actuator] {
        &self.actuators
    }

    pub(crate) fn sensors_mut(&mut self) -> &mut [Sensor] {
        &mut self.sensors
    }

    pub(crate) fn actuators_mut(&mut self) -> &mut [Actuator] {
        &mut self.actuators
    }

    //--- Instantiation ----------------------------------------------------

    /// Fresh runtime copy owned by `owner`.
    pub fn instantiate(&self, owner: ObjectId) -> LogicLink {
        let mut link = self.clone();
        link.owner = Some(owner);
        link.sensors.iter_mut().for_each(Sensor::reset);
        link.actuators.iter_mut().for_each(Actuator::reset);
        link
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
