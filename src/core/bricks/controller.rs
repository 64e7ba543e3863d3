//=========================================================================
// Controllers
//=========================================================================
//
// Combine the states of their linked sensors into one pulse for their
// linked actuators. A controller only runs while its state mask
// intersects the state of its link.
//
//=========================================================================

use super::sensor::Sensor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerMode {
    And,
    Or,
    Nand,
    Nor,
    /// Exactly one positive input.
    Xor,
    Xnor,
}

#[derive(Debug, Clone)]
pub struct Controller {
    name: String,
    mode: ControllerMode,
    pub state_mask: u32,
    pub(crate) sensors: Vec<usize>,
    pub(crate) actuators: Vec<usize>,
}

impl Controller {
    pub fn new(name: impl Into<String>, mode: ControllerMode) -> Self {
        Self {
            name: name.into(),
            mode,
            state_mask: 1,
            sensors: Vec::new(),
            actuators: Vec::new(),
        }
    }

    pub fn with_state_mask(mut self, mask: u32) -> Self {
        self.state_mask = mask;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> ControllerMode {
        self.mode
    }

    pub fn actuators(&self) -> &[usize] {
        &self.actuators
    }

    pub fn is_enabled_in(&self, state: u32) -> bool {
        self.state_mask & state != 0
    }

    /// Combines the current state of the linked sensors.
    pub fn evaluate(&self, sensors: &[Sensor]) -> bool {
        let states = self
            .sensors
            .iter()
            .filter_map(|&i| sensors.get(i))
            .map(Sensor::is_positive);
        combine(self.mode, states)
    }
}

/// Applies a controller mode to a sequence of sensor states.
pub fn combine(mode: ControllerMode, states: impl Iterator<Item = bool>) -> bool {
    let mut total = 0usize;
    let mut positive = 0usize;
    for state in states {
        total += 1;
        if state {
            positive += 1;
        }
    }

    let all = positive == total;
    let any = positive > 0;
    match mode {
        ControllerMode::And => all,
        ControllerMode::Or => any,
        ControllerMode::Nand => !all,
        ControllerMode::Nor => !any,
        ControllerMode::Xor => positive == 1,
        ControllerMode::Xnor => positive != 1,
    }
}
