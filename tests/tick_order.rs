//=========================================================================
// Tick Order Tests
//=========================================================================
//
// One tick runs logic bricks, then physics, then listeners, then
// constraints, then the render sync. These tests watch that order
// through the shared journal.
//
//=========================================================================

mod common;

use std::time::Duration;

use common::{headless_engine, Journal, MockPhysics};
use gamekit_engine::core::bricks::Pulse;
use gamekit_engine::core::object::PhysicsProperties;
use gamekit_engine::prelude::*;

fn pushed_box() -> GameObject {
    let mut link = LogicLink::new();
    let always = link.add_sensor(Sensor::new("always", SensorKind::Always).with_pulse(Pulse {
        positive: true,
        ..Pulse::default()
    }));
    let and = link.add_controller(Controller::new("and", ControllerMode::And));
    let push = link.add_actuator(Actuator::new(
        "push",
        ActuatorKind::Motion { linear: Vec3::X, angular: Vec3::ZERO, local: false },
    ));
    link.link_sensor(always, and).unwrap();
    link.link_actuator(and, push).unwrap();

    let mut object = GameObject::new("Box", ObjectKind::Entity { mesh: "box.mesh".into() });
    object.properties_mut().physics = Some(PhysicsProperties::default());
    object.set_logic(link);
    object
}

fn box_x(scenes: &SceneManager) -> f32 {
    scenes
        .get("Level")
        .and_then(|scene| scene.find("Box").and_then(|id| scene.object(id)))
        .map(|object| object.position().x)
        .unwrap_or(f32::NAN)
}

fn level(journal: &Journal) -> Scene {
    let mut scene = Scene::new("Level");
    scene.create_camera("Camera");
    let id = scene.add_object(pushed_box()).unwrap();
    scene.create_world(Box::new(MockPhysics::new(journal.clone())));
    scene.add_constraint(Constraint::LimitLocation {
        object: id,
        min: Vec3::splat(-10.0),
        max: Vec3::new(0.25, 10.0, 10.0),
    });
    scene
}

fn running_engine(journal: &Journal) -> (Engine, InputSender, ManualClock) {
    let (mut engine, input, clock) = headless_engine(journal);
    let log = journal.clone();
    engine.add_listener(move |scenes: &mut SceneManager, _dt: f32| {
        log.push(format!("listener:{:.2}", box_x(scenes)));
    });
    engine.initialize().unwrap();
    engine.add_scene(level(journal));
    assert!(engine.load_scene("Level"));
    engine.initialize_step_loop().unwrap();
    journal.clear();
    (engine, input, clock)
}

#[test]
fn logic_then_physics_then_listeners_then_render() {
    let journal = Journal::new();
    let (mut engine, _input, _clock) = running_engine(&journal);

    assert!(engine.step_one_frame());

    let step = journal.position("physics.step").unwrap();
    let listener = journal.position("listener:0.10").unwrap();
    let sync = journal.position("render.sync:Box:0.10").unwrap();
    let frame = journal.position("render.frame").unwrap();
    assert!(step < listener);
    assert!(listener < sync);
    assert!(sync < frame);
}

#[test]
fn constraints_apply_after_listeners_and_before_sync() {
    let journal = Journal::new();
    let (mut engine, _input, clock) = running_engine(&journal);

    for _ in 0..3 {
        engine.step_one_frame();
        clock.advance(Duration::from_millis(100));
    }

    // Third tick moves the box to 0.30; the listener still sees that,
    // the render backend only ever sees the clamped position.
    assert!(journal.position("listener:0.30").is_some());
    assert!(journal.position("render.sync:Box:0.30").is_none());
    assert!(journal.position("render.sync:Box:0.25").is_some());
    assert_eq!(box_x(engine.scenes()), 0.25);
}

#[test]
fn every_due_tick_runs_the_full_pipeline() {
    let journal = Journal::new();
    let (mut engine, _input, clock) = running_engine(&journal);

    engine.step_one_frame();
    clock.advance(Duration::from_millis(310));
    engine.step_one_frame();

    assert_eq!(engine.tick_state().ticks(), 4);
    assert_eq!(journal.count("physics.step"), 4);
    assert_eq!(journal.count("listener"), 4);
    assert_eq!(journal.count("render.sync:Box"), 4);
    assert_eq!(journal.count("render.frame"), 2);
}

#[test]
fn listeners_run_in_registration_order() {
    let journal = Journal::new();
    let (mut engine, _input, _clock) = running_engine(&journal);
    let (first, second) = (journal.clone(), journal.clone());
    engine.add_listener(move |_: &mut SceneManager, _: f32| first.push("late:1"));
    engine.add_listener(move |_: &mut SceneManager, _: f32| second.push("late:2"));

    engine.step_one_frame();

    let a = journal.position("listener:0.10").unwrap();
    let b = journal.position("late:1").unwrap();
    let c = journal.position("late:2").unwrap();
    assert!(a < b && b < c);
}

#[test]
fn removed_listener_stops_and_others_keep_their_order() {
    let journal = Journal::new();
    let (mut engine, _input, clock) = running_engine(&journal);
    let (first, second, third) = (journal.clone(), journal.clone(), journal.clone());
    let a = engine.add_listener(move |_: &mut SceneManager, _: f32| first.push("late:1"));
    let b = engine.add_listener(move |_: &mut SceneManager, _: f32| second.push("late:2"));
    engine.add_listener(move |_: &mut SceneManager, _: f32| third.push("late:3"));

    assert!(engine.remove_listener(b));
    assert!(!engine.remove_listener(b));

    engine.step_one_frame();
    clock.advance(Duration::from_millis(100));
    assert_eq!(journal.count("late:2"), 0);
    let one = journal.position("late:1").unwrap();
    let three = journal.position("late:3").unwrap();
    assert!(one < three);

    assert!(engine.remove_listener(a));
    journal.clear();
    engine.step_one_frame();
    assert_eq!(journal.count("late:"), 1);
    assert_eq!(journal.count("listener:"), 1);
}
