//=========================================================================
// Sensor Dispatch
//=========================================================================
//
// One dispatcher per sensor category. A dispatcher holds references to
// the registered sensors of its category and ticks them in registration
// order against a single snapshot shared by the whole category.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::link::LogicLink;
use super::sensor::{SensorCategory, SensorFrame};

//=== SensorRef ===========================================================

/// A sensor inside the logic manager: `(link slot, sensor index)`.
/// Refs into empty slots are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SensorRef {
    pub link: usize,
    pub sensor: usize,
}

/// A controller that must run this tick: `(link index, controller index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerRef {
    pub link: usize,
    pub controller: usize,
}

//=== SensorDispatch ======================================================

#[derive(Debug)]
pub struct SensorDispatch {
    category: SensorCategory,
    sensors: Vec<SensorRef>,
}

impl SensorDispatch {
    pub fn new(category: SensorCategory) -> Self {
        Self {
            category,
            sensors: Vec::new(),
        }
    }

    pub fn category(&self) -> SensorCategory {
        self.category
    }

    pub fn register(&mut self, sensor: SensorRef) {
        self.sensors.push(sensor);
    }

    pub fn clear(&mut self) {
        self.sensors.clear();
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Ticks every registered sensor and appends the controllers of the
    /// ones that fired to `fired`.
    pub fn dispatch(
        &self,
        links: &mut [Option<LogicLink>],
        frame: &SensorFrame<'_>,
        fired: &mut Vec<ControllerRef>,
    ) {
        for r in &self.sensors {
            let Some(link) = links.get_mut(r.link).and_then(Option::as_mut) else {
                continue;
            };
            let Some(owner) = link.owner() else {
                continue;
            };
            let Some(sensor) = link.sensors_mut().get_mut(r.sensor) else {
                continue;
            };

            let raw = sensor.query(owner, frame);
            if sensor.tick(raw) {
                trace!("{:?} sensor '{}' fired ({})", self.category, sensor.name(), sensor.is_positive());
                fired.extend(sensor.controllers().iter().map(|&controller| ControllerRef {
                    link: r.link,
                    controller,
                }));
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bricks::collision::CollisionFilter;
    use crate::core::bricks::controller::{Controller, ControllerMode};
    use crate::core::bricks::sensor::{MouseTrigger, Sensor, SensorKind};
    use crate::core::input::{KeyCode, StateTracker};
    use crate::core::object::{GameObject, GameObjects, ObjectKind};

    /// One controller per sensor, so the `fired` list names the sensor.
    fn link_with(kinds: Vec<SensorKind>) -> LogicLink {
        let mut link = LogicLink::new();
        for (i, kind) in kinds.into_iter().enumerate() {
            let s = link.add_sensor(Sensor::new(format!("s{}", i), kind));
            let c = link.add_controller(Controller::new(format!("c{}", i), ControllerMode::And));
            link.link_sensor(s, c).unwrap();
        }
        link
    }

    fn dispatchers_for(links: &[Option<LogicLink>]) -> Vec<SensorDispatch> {
        let mut dispatchers: Vec<SensorDispatch> =
            SensorCategory::ALL.iter().map(|c| SensorDispatch::new(*c)).collect();
        for (l, link) in links.iter().enumerate() {
            let Some(link) = link else { continue };
            for (sensor, s) in link.sensors().iter().enumerate() {
                dispatchers[s.category().index()].register(SensorRef { link: l, sensor });
            }
        }
        dispatchers
    }

    #[test]
    fn categories_run_in_fixed_order_then_registration_order() {
        let mut objects = GameObjects::new();
        let owner = objects.insert(GameObject::new("owner", ObjectKind::Object)).unwrap();

        // Registered deliberately out of category order.
        let template = link_with(vec![
            SensorKind::Message { subject: String::new() },
            SensorKind::Keyboard { key: Some(KeyCode::KeyA) },
            SensorKind::Collision(CollisionFilter::any()),
            SensorKind::Always,
            SensorKind::Mouse(MouseTrigger::Movement),
            SensorKind::Keyboard { key: Some(KeyCode::KeyB) },
            SensorKind::Always,
        ]);
        let mut links = vec![Some(template.instantiate(owner)), Some(template.instantiate(owner))];
        let dispatchers = dispatchers_for(&links);

        let input = StateTracker::new();
        let frame = SensorFrame { objects: &objects, input: &input, inbox: &[] };
        let mut fired = Vec::new();
        for dispatcher in &dispatchers {
            dispatcher.dispatch(&mut links, &frame, &mut fired);
        }

        // Every sensor fires on its first tick.
        let order: Vec<(usize, usize)> = fired.iter().map(|r| (r.link, r.controller)).collect();
        assert_eq!(
            order,
            vec![
                (0, 3), (0, 6), (1, 3), (1, 6), // Constant
                (0, 1), (0, 5), (1, 1), (1, 5), // Keyboard
                (0, 4), (1, 4),                 // Mouse
                (0, 2), (1, 2),                 // Collision
                (0, 0), (1, 0),                 // Message
            ]
        );
    }

    #[test]
    fn dispatch_skips_unowned_and_stale_refs() {
        let template = link_with(vec![SensorKind::Always]);
        // Slot 0 is an unowned template, slot 1 was removed, slot 4 never existed.
        let mut links = vec![Some(template.clone()), None];
        let mut dispatcher = SensorDispatch::new(SensorCategory::Constant);
        dispatcher.register(SensorRef { link: 0, sensor: 0 });
        dispatcher.register(SensorRef { link: 1, sensor: 0 });
        dispatcher.register(SensorRef { link: 4, sensor: 0 });

        let objects = GameObjects::new();
        let input = StateTracker::new();
        let frame = SensorFrame { objects: &objects, input: &input, inbox: &[] };
        let mut fired = Vec::new();
        dispatcher.dispatch(&mut links, &frame, &mut fired);

        assert!(fired.is_empty());
        assert_eq!(dispatcher.len(), 3);
    }

    #[test]
    fn quiet_sensors_fire_only_on_change() {
        let mut objects = GameObjects::new();
        let owner = objects.insert(GameObject::new("owner", ObjectKind::Object)).unwrap();
        let mut links = vec![Some(link_with(vec![SensorKind::Always]).instantiate(owner))];
        let dispatchers = dispatchers_for(&links);
        let constant = &dispatchers[SensorCategory::Constant.index()];

        let input = StateTracker::new();
        let frame = SensorFrame { objects: &objects, input: &input, inbox: &[] };
        let mut fired = Vec::new();
        constant.dispatch(&mut links, &frame, &mut fired);
        assert_eq!(fired.len(), 1);

        fired.clear();
        constant.dispatch(&mut links, &frame, &mut fired);
        assert!(fired.is_empty());
    }
}
