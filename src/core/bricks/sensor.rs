//=========================================================================
// Sensors
//=========================================================================
//
// A sensor turns one world condition into a boolean and decides, each
// tick, whether its linked controllers need to run.
//
// Tick:
//   raw   = query()                pure read of the tick snapshot
//   state = raw ^ invert, then tap (positive for one tick only)
//   fire  = first tick || state changed || pulse due
//
// Pulse mode repeats the current state every `frequency + 1` ticks
// while it stays positive (or negative).
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::collision::CollisionFilter;
use crate::core::input::{KeyCode, MouseButton, StateTracker};
use crate::core::message::LogicMessage;
use crate::core::object::{GameObjects, ObjectId};
use crate::core::value::Value;

//=== SensorCategory ======================================================

/// Dispatch category. Categories run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorCategory {
    Constant,
    Keyboard,
    Mouse,
    Collision,
    Message,
}

impl SensorCategory {
    pub const ALL: [SensorCategory; 5] = [
        Self::Constant,
        Self::Keyboard,
        Self::Mouse,
        Self::Collision,
        Self::Message,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

//=== Sensor Kinds ========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyTest {
    Equal(Value),
    NotEqual(Value),
    /// Inclusive numeric range.
    Interval { min: f32, max: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseTrigger {
    Button(MouseButton),
    Movement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SensorKind {
    Always,
    Property { name: String, test: PropertyTest },
    /// `None` fires while any key is held.
    Keyboard { key: Option<KeyCode> },
    Mouse(MouseTrigger),
    Collision(CollisionFilter),
    /// An empty subject matches every message.
    Message { subject: String },
}

impl SensorKind {
    pub fn category(&self) -> SensorCategory {
        match self {
            Self::Always | Self::Property { .. } => SensorCategory::Constant,
            Self::Keyboard { .. } => SensorCategory::Keyboard,
            Self::Mouse(_) => SensorCategory::Mouse,
            Self::Collision(_) => SensorCategory::Collision,
            Self::Message { .. } => SensorCategory::Message,
        }
    }
}

//=== Pulse ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pulse {
    pub positive: bool,
    pub negative: bool,

    /// Ticks skipped between repeated pulses.
    pub frequency: u32,
}

//=== SensorFrame =========================================================

/// Read-only snapshot the sensors of one tick query.
pub struct SensorFrame<'a> {
    pub objects: &'a GameObjects,
    pub input: &'a StateTracker,
    pub inbox: &'a [LogicMessage],
}

//=== Sensor ==============================================================

#[derive(Debug, Clone)]
pub struct Sensor {
    name: String,
    kind: SensorKind,
    pub invert: bool,
    pub tap: bool,
    pub pulse: Pulse,
    pub(crate) controllers: Vec<usize>,

    //--- Runtime ---------------------------------------------------------
    positive: bool,
    first_tick: bool,
    tapped: bool,
    skipped: u32,
}

impl Sensor {
    pub fn new(name: impl Into<String>, kind: SensorKind) -> Self {
        Self {
            name: name.into(),
            kind,
            invert: false,
            tap: false,
            pulse: Pulse::default(),
            controllers: Vec::new(),
            positive: false,
            first_tick: true,
            tapped: false,
            skipped: 0,
        }
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn with_tap(mut self, tap: bool) -> Self {
        self.tap = tap;
        self
    }

    pub fn with_pulse(mut self, pulse: Pulse) -> Self {
        self.pulse = pulse;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &SensorKind {
        &self.kind
    }

    pub fn category(&self) -> SensorCategory {
        self.kind.category()
    }

    /// State after the last tick (invert and tap applied).
    pub fn is_positive(&self) -> bool {
        self.positive
    }

    /// Controller indices this sensor feeds.
    pub fn controllers(&self) -> &[usize] {
        &self.controllers
    }

    /// Raw condition for `owner` against this tick's snapshot.
    pub fn query(&self, owner: ObjectId, frame: &SensorFrame<'_>) -> bool {
        match &self.kind {
            SensorKind::Always => true,

            SensorKind::Property { name, test } => frame
                .objects
                .get(owner)
                .and_then(|o| o.variable(name))
                .is_some_and(|value| match test {
                    PropertyTest::Equal(expected) => value == expected,
                    PropertyTest::NotEqual(expected) => value != expected,
                    PropertyTest::Interval { min, max } => value
                        .as_real()
                        .is_some_and(|v| v >= *min && v <= *max),
                }),

            SensorKind::Keyboard { key: Some(key) } => frame.input.is_key_down(*key),
            SensorKind::Keyboard { key: None } => frame.input.any_key_down(),

            SensorKind::Mouse(MouseTrigger::Button(button)) => frame.input.is_button_down(*button),
            SensorKind::Mouse(MouseTrigger::Movement) => frame.input.mouse_moved(),

            SensorKind::Collision(filter) => filter.matches(owner, frame.objects),

            SensorKind::Message { subject } => {
                let Some(object) = frame.objects.get(owner) else {
                    return false;
                };
                frame.inbox.iter().any(|message| {
                    message.is_for(object.name())
                        && (subject.is_empty() || message.subject == *subject)
                })
            }
        }
    }

    /// Advances the sensor with a raw query result.
    ///
    /// Returns `true` when the linked controllers should run.
    pub fn tick(&mut self, raw: bool) -> bool {
        let mut state = raw != self.invert;

        if self.tap {
            if state {
                if self.tapped {
                    state = false;
                } else {
                    self.tapped = true;
                }
            } else {
                self.tapped = false;
            }
        }

        let mut fire = self.first_tick || state != self.positive;
        self.first_tick = false;
        self.positive = state;

        if fire {
            self.skipped = 0;
        } else if (state && self.pulse.positive) || (!state && self.pulse.negative) {
            self.skipped += 1;
            if self.skipped > self.pulse.frequency {
                self.skipped = 0;
                fire = true;
            }
        }

        fire
    }

    /// Forgets runtime state, as for a freshly instantiated sensor.
    pub fn reset(&mut self) {
        self.positive = false;
        self.first_tick = true;
        self.tapped = false;
        self.skipped = 0;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::InputEvent;
    use crate::core::object::{GameObject, ObjectKind};

    fn ticks(sensor: &mut Sensor, raw: &[bool]) -> Vec<bool> {
        raw.iter().map(|r| sensor.tick(*r)).collect()
    }

    #[test]
    fn fires_on_first_tick_and_on_change() {
        let mut sensor = Sensor::new("s", SensorKind::Always);
        assert_eq!(ticks(&mut sensor, &[false, false, true, true, false]), [true, false, true, false, true]);
    }

    #[test]
    fn invert_flips_state() {
        let mut sensor = Sensor::new("s", SensorKind::Always).with_invert(true);
        sensor.tick(true);
        assert!(!sensor.is_positive());
        sensor.tick(false);
        assert!(sensor.is_positive());
    }

    #[test]
    fn tap_is_positive_for_one_tick() {
        let mut sensor = Sensor::new("s", SensorKind::Always).with_tap(true);
        let fired = ticks(&mut sensor, &[true, true, true]);
        assert_eq!(fired, [true, true, false]);
        assert!(!sensor.is_positive());

        sensor.tick(false);
        sensor.tick(true);
        assert!(sensor.is_positive());
    }

    #[test]
    fn positive_pulse_honours_frequency() {
        let mut every_tick = Sensor::new("s", SensorKind::Always)
            .with_pulse(Pulse { positive: true, negative: false, frequency: 0 });
        assert_eq!(ticks(&mut every_tick, &[true, true, true]), [true, true, true]);

        let mut every_third = Sensor::new("s", SensorKind::Always)
            .with_pulse(Pulse { positive: true, negative: false, frequency: 2 });
        assert_eq!(
            ticks(&mut every_third, &[true, true, true, true, true, true, true]),
            [true, false, false, true, false, false, true]
        );
    }

    #[test]
    fn negative_pulse_only_while_negative() {
        let mut sensor = Sensor::new("s", SensorKind::Always)
            .with_pulse(Pulse { positive: false, negative: true, frequency: 0 });
        assert_eq!(ticks(&mut sensor, &[false, false, true, true]), [true, true, true, false]);
    }

    #[test]
    fn categories() {
        assert_eq!(SensorKind::Always.category(), SensorCategory::Constant);
        assert_eq!(SensorKind::Keyboard { key: None }.category(), SensorCategory::Keyboard);
        assert_eq!(
            SensorKind::Collision(CollisionFilter::any()).category(),
            SensorCategory::Collision
        );
        assert_eq!(
            SensorKind::Message { subject: String::new() }.category(),
            SensorCategory::Message
        );
    }

    #[test]
    fn property_and_message_queries() {
        let mut objects = GameObjects::new();
        let mut obj = GameObject::new("Door", ObjectKind::Object);
        obj.set_variable("open", 3);
        let owner = objects.insert(obj).unwrap();
        let input = StateTracker::new();
        let inbox = [LogicMessage::new("Key", "Door", "unlock", "")];
        let frame = SensorFrame { objects: &objects, input: &input, inbox: &inbox };

        let equal = Sensor::new("p", SensorKind::Property {
            name: "open".into(),
            test: PropertyTest::Equal(Value::Int(3)),
        });
        let interval = Sensor::new("i", SensorKind::Property {
            name: "open".into(),
            test: PropertyTest::Interval { min: 4.0, max: 10.0 },
        });
        let unlock = Sensor::new("m", SensorKind::Message { subject: "unlock".into() });
        let lock = Sensor::new("m", SensorKind::Message { subject: "lock".into() });

        assert!(equal.query(owner, &frame));
        assert!(!interval.query(owner, &frame));
        assert!(unlock.query(owner, &frame));
        assert!(!lock.query(owner, &frame));
    }

    #[test]
    fn keyboard_queries() {
        let objects = GameObjects::new();
        let mut input = StateTracker::new();
        input.dispatch(&[vec![InputEvent::key_down(KeyCode::KeyW)]]);
        let frame = SensorFrame { objects: &objects, input: &input, inbox: &[] };

        let w = Sensor::new("w", SensorKind::Keyboard { key: Some(KeyCode::KeyW) });
        let s = Sensor::new("s", SensorKind::Keyboard { key: Some(KeyCode::KeyS) });
        let any = Sensor::new("any", SensorKind::Keyboard { key: None });

        assert!(w.query(ObjectId(0), &frame));
        assert!(!s.query(ObjectId(0), &frame));
        assert!(any.query(ObjectId(0), &frame));
    }
}
