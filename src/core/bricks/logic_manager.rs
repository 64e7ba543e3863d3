//=========================================================================
// Logic Manager
//=========================================================================
//
// Per-scene registry of instantiated logic links.
//
// Update:
//   1. sensors    dispatchers run in category order, sensors in
//                 registration order
//   2. controllers each fired controller runs once, in link order then
//                 controller order, if its state mask matches the link
//   3. actuators  pulses delivered, then every actuator with work runs
//
// A `LinkId` stays valid until `clear()`: removing an object's links
// leaves empty slots behind instead of shifting later links. `clear()`
// drops all links and registrations; the manager is reused by the next
// load of its scene, and ids restart from zero.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::actuator::ActuatorContext;
use super::dispatch::{ControllerRef, SensorDispatch, SensorRef};
use super::link::LogicLink;
use super::sensor::{SensorCategory, SensorFrame};
use crate::core::input::StateTracker;
use crate::core::message::MessageManager;
use crate::core::object::{GameObjects, ObjectId, ObjectQueue};
use crate::core::scene::SceneRequest;

//=== LogicFrame ==========================================================

/// Everything one logic update reads or writes.
pub struct LogicFrame<'a> {
    pub scene: &'a str,
    pub objects: &'a mut GameObjects,
    pub input: &'a StateTracker,
    pub messages: &'a mut MessageManager,
    pub object_queue: &'a mut ObjectQueue,
    pub scene_requests: &'a mut Vec<SceneRequest>,
}

//=== LinkId ==============================================================

/// Slot of a link in its logic manager. Never reused before `clear()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub usize);

//=== LogicManager ========================================================

#[derive(Debug)]
pub struct LogicManager {
    links: Vec<Option<LogicLink>>,
    dispatchers: Vec<SensorDispatch>,
    fired: Vec<ControllerRef>,
}

impl Default for LogicManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicManager {
    pub fn new() -> Self {
        Self {
            links: Vec::new(),
            dispatchers: SensorCategory::ALL.iter().map(|c| SensorDispatch::new(*c)).collect(),
            fired: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Instantiates `template` for `owner` and registers its sensors.
    pub fn add_link(&mut self, owner: ObjectId, template: &LogicLink) -> LinkId {
        let link = template.instantiate(owner);
        let id = LinkId(self.links.len());
        self.register_sensors(id.0, &link);
        debug!(
            "Logic link {} for object {}: {} sensors, {} controllers, {} actuators",
            id.0,
            owner.0,
            link.sensors().len(),
            link.controllers().len(),
            link.actuators().len()
        );
        self.links.push(Some(link));
        id
    }

    /// Drops every link owned by `owner`. Ids of other links are kept.
    pub fn remove_links_of(&mut self, owner: ObjectId) {
        let mut removed = false;
        for slot in &mut self.links {
            if slot.as_ref().is_some_and(|l| l.owner() == Some(owner)) {
                *slot = None;
                removed = true;
            }
        }
        if removed {
            self.rebuild_dispatchers();
        }
    }

    pub fn clear(&mut self) {
        self.links.clear();
        self.fired.clear();
        for dispatcher in &mut self.dispatchers {
            dispatcher.clear();
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Live links.
    pub fn len(&self) -> usize {
        self.links.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.links.iter().all(Option::is_none)
    }

    /// `None` once the link's owner was unloaded.
    pub fn link(&self, id: LinkId) -> Option<&LogicLink> {
        self.links.get(id.0).and_then(Option::as_ref)
    }

    pub fn links_of(&self, owner: ObjectId) -> impl Iterator<Item = &LogicLink> {
        self.links.iter().flatten().filter(move |l| l.owner() == Some(owner))
    }

    /// Registered sensors of one category.
    pub fn registered(&self, category: SensorCategory) -> usize {
        self.dispatchers[category.index()].len()
    }

    //--- Update -----------------------------------------------------------

    pub fn update(&mut self, tick: f32, frame: LogicFrame<'_>) {
        if self.is_empty() {
            return;
        }

        //--- 1. Sensors --------------------------------------------------
        self.fired.clear();
        {
            let sensor_frame = SensorFrame {
                objects: &*frame.objects,
                input: frame.input,
                inbox: frame.messages.inbox(),
            };
            for dispatcher in &self.dispatchers {
                dispatcher.dispatch(&mut self.links, &sensor_frame, &mut self.fired);
            }
        }
        self.fired.sort_unstable();
        self.fired.dedup();

        //--- 2. Controllers ----------------------------------------------
        for r in &self.fired {
            let Some(link) = self.links.get_mut(r.link).and_then(Option::as_mut) else {
                continue;
            };
            let Some(controller) = link.controllers().get(r.controller) else {
                continue;
            };
            if !controller.is_enabled_in(link.state) {
                continue;
            }
            let pulse = controller.evaluate(link.sensors());
            let targets: Vec<usize> = controller.actuators().to_vec();
            pulse_actuators(link, &targets, pulse);
        }

        //--- 3. Actuators ------------------------------------------------
        let mut ctx = ActuatorContext {
            scene: frame.scene,
            objects: frame.objects,
            messages: frame.messages,
            object_queue: frame.object_queue,
            scene_requests: frame.scene_requests,
            tick,
        };
        for link in self.links.iter_mut().flatten() {
            let Some(owner) = link.owner() else {
                continue;
            };
            for actuator in link.actuators_mut() {
                actuator.deliver();
                if actuator.should_run() {
                    actuator.execute(owner, &mut ctx);
                }
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn register_sensors(&mut self, link: usize, instance: &LogicLink) {
        for (sensor, s) in instance.sensors().iter().enumerate() {
            self.dispatchers[s.category().index()].register(SensorRef { link, sensor });
        }
    }

    fn rebuild_dispatchers(&mut self) {
        for dispatcher in &mut self.dispatchers {
            dispatcher.clear();
        }
        let links = std::mem::take(&mut self.links);
        for (index, link) in links.iter().enumerate() {
            if let Some(link) = link {
                self.register_sensors(index, link);
            }
        }
        self.links = links;
    }
}

fn pulse_actuators(link: &mut LogicLink, targets: &[usize], positive: bool) {
    for &index in targets {
        if let Some(actuator) = link.actuators_mut().get_mut(index) {
            actuator.pulse(positive);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
