//=========================================================================
// Logic Brick Tests
//=========================================================================
//
// Sensors, controllers and actuators driven end to end: input goes in
// through the headless window, effects are read back from the scenes.
//
//=========================================================================

mod common;

use std::time::Duration;

use approx::assert_relative_eq;
use common::{headless_engine, ContactScript, Journal, MockPhysics};
use gamekit_engine::core::bricks::{CollisionFilter, PropertyOp, Pulse, SceneOp};
use gamekit_engine::core::object::PhysicsProperties;
use gamekit_engine::prelude::*;

//=== Helpers =============================================================

/// One sensor → AND → one actuator.
fn single_chain(sensor: Sensor, actuator: Actuator) -> LogicLink {
    let mut link = LogicLink::new();
    let s = link.add_sensor(sensor);
    let c = link.add_controller(Controller::new("and", ControllerMode::And));
    let a = link.add_actuator(actuator);
    link.link_sensor(s, c).unwrap();
    link.link_actuator(c, a).unwrap();
    link
}

fn object_with(name: &str, link: LogicLink) -> GameObject {
    let mut object = GameObject::new(name, ObjectKind::Object);
    object.set_logic(link);
    object
}

struct Harness {
    engine: Engine,
    input: InputSender,
    clock: ManualClock,
    journal: Journal,
}

impl Harness {
    fn new(scenes: Vec<Scene>) -> Self {
        let journal = Journal::new();
        let (mut engine, input, clock) = headless_engine(&journal);
        engine.initialize().unwrap();
        let first = scenes.first().map(|s| s.name().to_string());
        for scene in scenes {
            engine.add_scene(scene);
        }
        if let Some(name) = first {
            assert!(engine.load_scene(&name));
        }
        engine.initialize_step_loop().unwrap();
        Self { engine, input, clock, journal }
    }

    /// Runs one frame holding exactly one tick.
    fn frame(&mut self) -> bool {
        let running = self.engine.step_one_frame();
        self.clock.advance(Duration::from_millis(100));
        running
    }

    fn object(&self, name: &str) -> &GameObject {
        let scene = self.engine.active_scene().unwrap();
        scene.find(name).and_then(|id| scene.object(id)).unwrap()
    }
}

fn level(objects: Vec<GameObject>) -> Scene {
    let mut scene = Scene::new("Level");
    scene.create_camera("Camera");
    for object in objects {
        scene.add_object(object);
    }
    scene
}

//=== Tests ===============================================================

#[test]
fn held_key_drives_motion() {
    let link = single_chain(
        Sensor::new("w", SensorKind::Keyboard { key: Some(KeyCode::KeyW) }),
        Actuator::new(
            "forward",
            ActuatorKind::Motion { linear: Vec3::Y, angular: Vec3::ZERO, local: false },
        ),
    );
    let mut h = Harness::new(vec![level(vec![object_with("Player", link)])]);

    h.input.send(vec![InputEvent::key_down(KeyCode::KeyW)]);
    h.frame();
    assert_relative_eq!(h.object("Player").position().y, 0.1, epsilon = 1e-5);

    // Still held: the motion actuator keeps running without new pulses.
    h.frame();
    assert_relative_eq!(h.object("Player").position().y, 0.2, epsilon = 1e-5);

    h.input.send(vec![InputEvent::key_up(KeyCode::KeyW)]);
    h.frame();
    h.frame();
    assert_relative_eq!(h.object("Player").position().y, 0.2, epsilon = 1e-5);
}

#[test]
fn positive_pulse_repeats_every_tick() {
    let counter = |pulse: Pulse| {
        single_chain(
            Sensor::new("always", SensorKind::Always).with_pulse(pulse),
            Actuator::new(
                "count",
                ActuatorKind::Property { name: "score".into(), op: PropertyOp::Add(Value::Int(1)) },
            ),
        )
    };
    let mut once = object_with("Once", counter(Pulse::default()));
    once.set_variable("score", 0);
    let mut every = object_with("Every", counter(Pulse { positive: true, ..Pulse::default() }));
    every.set_variable("score", 0);

    let mut h = Harness::new(vec![level(vec![once, every])]);
    for _ in 0..5 {
        h.frame();
    }

    assert_eq!(h.object("Once").variable("score"), Some(&Value::Int(1)));
    assert_eq!(h.object("Every").variable("score"), Some(&Value::Int(5)));
}

#[test]
fn collision_with_tagged_object_fires_property_actuator() {
    let mut mine = object_with(
        "Mine",
        single_chain(
            Sensor::new("hit", SensorKind::Collision(CollisionFilter::property("enemy"))),
            Actuator::new(
                "count",
                ActuatorKind::Property { name: "hits".into(), op: PropertyOp::Add(Value::Int(1)) },
            ),
        ),
    );
    mine.set_variable("hits", 0);
    mine.properties_mut().physics = Some(PhysicsProperties::default());
    let mut orc = GameObject::new("Orc", ObjectKind::Object);
    orc.set_variable("enemy", true);

    let script = ContactScript::new();
    let mut scene = level(Vec::new());
    scene.create_world(Box::new(MockPhysics::new(Journal::new()).with_contacts(script.clone())));
    let mine = scene.add_object(mine).unwrap();
    let barrel = scene.add_object(GameObject::new("Barrel", ObjectKind::Object)).unwrap();
    let orc = scene.add_object(orc).unwrap();
    let mut h = Harness::new(vec![scene]);

    h.frame();
    script.touch(mine, barrel, "wood");
    h.frame();
    h.frame();
    assert_eq!(h.object("Mine").variable("hits"), Some(&Value::Int(0)));

    script.touch(mine, orc, "");
    // Contacts from this tick's step are seen by the sensor next tick.
    h.frame();
    assert_eq!(h.object("Mine").variable("hits"), Some(&Value::Int(0)));
    h.frame();
    assert_eq!(h.object("Mine").variable("hits"), Some(&Value::Int(1)));

    h.frame();
    assert_eq!(h.object("Mine").variable("hits"), Some(&Value::Int(1)));

    script.separate(mine);
    h.frame();
    h.frame();
    script.touch(mine, orc, "");
    h.frame();
    h.frame();
    assert_eq!(h.object("Mine").variable("hits"), Some(&Value::Int(2)));
}

#[test]
fn messages_arrive_on_the_next_tick() {
    let sender = single_chain(
        Sensor::new("always", SensorKind::Always),
        Actuator::new(
            "shout",
            ActuatorKind::Message { to: "Enemy".into(), subject: "hit".into(), body: String::new() },
        ),
    );
    let receiver = single_chain(
        Sensor::new("hit", SensorKind::Message { subject: "hit".into() }),
        Actuator::new("hide", ActuatorKind::Visibility { visible: false }),
    );
    let mut h = Harness::new(vec![level(vec![
        object_with("Player", sender),
        object_with("Enemy", receiver),
    ])]);

    h.frame();
    assert!(h.object("Enemy").is_visible());

    h.frame();
    assert!(!h.object("Enemy").is_visible());
}

#[test]
fn end_object_unloads_but_keeps_the_object() {
    let link = single_chain(
        Sensor::new("space", SensorKind::Keyboard { key: Some(KeyCode::Space) }),
        Actuator::new("end", ActuatorKind::EndObject),
    );
    let mut h = Harness::new(vec![level(vec![object_with("Crate", link)])]);
    h.frame();
    assert!(h.object("Crate").is_loaded());

    h.input.send(vec![InputEvent::key_down(KeyCode::Space)]);
    h.frame();

    assert!(!h.object("Crate").is_loaded());
    assert!(h.object("Crate").instance().is_none());
    assert_eq!(h.journal.count("render.destroy_instance"), 1);
    assert!(h.engine.active_scene().unwrap().logic().is_empty());
}

#[test]
fn scene_actuator_replaces_the_running_scene() {
    let link = single_chain(
        Sensor::new("esc", SensorKind::Keyboard { key: Some(KeyCode::Escape) }),
        Actuator::new("menu", ActuatorKind::Scene(SceneOp::Set("Menu".into()))),
    );
    let mut menu = Scene::new("Menu");
    menu.create_camera("MenuCamera");
    let mut h = Harness::new(vec![level(vec![object_with("Player", link)]), menu]);

    h.frame();
    assert_eq!(h.engine.active_scene().map(Scene::name), Some("Level"));

    h.input.send(vec![InputEvent::key_down(KeyCode::Escape)]);
    assert!(h.frame());

    assert_eq!(h.engine.active_scene().map(Scene::name), Some("Menu"));
    assert!(!h.engine.scenes().get("Level").unwrap().is_loaded());
    assert!(h.engine.scenes().get("Menu").unwrap().is_loaded());
}

#[test]
fn scene_restart_restores_initial_variables() {
    let mut link = LogicLink::new();
    let always = link.add_sensor(
        Sensor::new("always", SensorKind::Always).with_pulse(Pulse { positive: true, ..Pulse::default() }),
    );
    let r = link.add_sensor(Sensor::new("r", SensorKind::Keyboard { key: Some(KeyCode::KeyR) }));
    let count = link.add_controller(Controller::new("count", ControllerMode::And));
    let restart = link.add_controller(Controller::new("restart", ControllerMode::And));
    let add = link.add_actuator(Actuator::new(
        "add",
        ActuatorKind::Property { name: "ticks".into(), op: PropertyOp::Add(Value::Int(1)) },
    ));
    let reset = link.add_actuator(Actuator::new("reset", ActuatorKind::Scene(SceneOp::Restart)));
    link.link_sensor(always, count).unwrap();
    link.link_actuator(count, add).unwrap();
    link.link_sensor(r, restart).unwrap();
    link.link_actuator(restart, reset).unwrap();

    let mut player = object_with("Player", link);
    player.set_variable("ticks", 0);
    let mut h = Harness::new(vec![level(vec![player])]);

    for _ in 0..3 {
        h.frame();
    }
    assert_eq!(h.object("Player").variable("ticks"), Some(&Value::Int(3)));

    h.input.send(vec![InputEvent::key_down(KeyCode::KeyR)]);
    h.frame();

    assert_eq!(h.object("Player").variable("ticks"), Some(&Value::Int(0)));
    assert!(h.engine.active_scene().unwrap().is_loaded());
}
