//! End-to-end frame driver scenarios

use animation::{AnimationClip, ClipName};
use devices::{ManualBackend, TrackedControllerState};
use glam::Vec3;
use grove_avatar::{AvatarConfig, FrameDriver, MoveOutcome, Scene, Transform, World};
use grove_physics::{Aabb, Obstacle, ObstacleId};

const DT: f32 = 0.1;

fn loaded_driver(scene: Scene) -> FrameDriver {
    let config = AvatarConfig::default();
    let mut driver = FrameDriver::from_config(&config, scene, Box::new(ManualBackend::new()));
    let library = driver.session_mut().animation.library_mut();
    for name in ClipName::ALL {
        library.insert(AnimationClip::new(name, 1.0));
    }
    driver
}

fn scene_with_model() -> Scene {
    let mut scene = Scene::default();
    scene.set_avatar_footprint(AvatarConfig::default().avatar.footprint);
    scene
}

fn tree(position: Vec3) -> Obstacle {
    Obstacle::place(ObstacleId(0), &Aabb::grounded(40.0, 500.0, 40.0), position)
}

#[test]
fn test_forward_walk_covers_speed_times_dt() {
    let mut driver = loaded_driver(scene_with_model());
    driver.session_mut().input.key_down("w");

    let output = driver.tick(DT);

    let expected = Vec3::NEG_Z * 15.0;
    assert!((output.transform.position - expected).length() < 1e-3);
    assert_eq!(output.delta.outcome, MoveOutcome::Moved);
    assert_eq!(output.active, Some(ClipName::Walk));
}

#[test]
fn test_blocked_walk_keeps_transform_and_walks() {
    let mut scene = scene_with_model();
    scene.install_obstacles(vec![tree(Vec3::new(0.0, 0.0, -60.0))]).unwrap();
    let mut driver = loaded_driver(scene);
    driver.session_mut().input.key_down("w");

    let output = driver.tick(DT);

    assert_eq!(output.transform, Transform::default());
    assert_eq!(output.delta.outcome, MoveOutcome::Blocked);
    assert_eq!(output.active, Some(ClipName::Walk));
    assert_eq!(driver.stats().blocked, 1);
}

#[test]
fn test_action_beats_movement() {
    let mut driver = loaded_driver(scene_with_model());
    let input = &mut driver.session_mut().input;
    input.key_down("w");
    input.key_down("d");
    input.key_down("q");

    for _ in 0..5 {
        let output = driver.tick(DT);
        assert_eq!(output.active, Some(ClipName::Defense));
        assert_eq!(output.transform.position, Vec3::ZERO);
        assert!(output.clips.iter().all(|w| w.clip != ClipName::Walk));
    }
}

#[test]
fn test_latest_action_key_wins() {
    let mut driver = loaded_driver(scene_with_model());
    driver.session_mut().input.key_down("f");
    assert_eq!(driver.tick(DT).active, Some(ClipName::Attack1));

    driver.session_mut().input.key_down(" ");
    assert_eq!(driver.tick(DT).active, Some(ClipName::Kick));

    driver.session_mut().input.key_up(" ");
    assert_eq!(driver.tick(DT).active, Some(ClipName::Attack1));
}

#[test]
fn test_no_step_ever_ends_inside_an_obstacle() {
    let mut scene = scene_with_model();
    scene.install_obstacles(vec![tree(Vec3::new(0.0, 0.0, -200.0))]).unwrap();
    let mut driver = loaded_driver(scene);
    driver.session_mut().input.key_down("w");

    for _ in 0..30 {
        let output = driver.tick(DT);
        let world = &driver.session().world;
        let footprint = world.avatar_footprint(output.transform.position).unwrap();
        assert!(!world.would_collide(&footprint));
    }
    assert!(driver.stats().moves > 0);
    assert!(driver.stats().blocked > 0);
}

#[test]
fn test_zero_intent_settles_on_idle() {
    let mut driver = loaded_driver(scene_with_model());
    driver.session_mut().input.key_down("w");
    for _ in 0..10 {
        driver.tick(DT);
    }
    driver.session_mut().input.key_up("w");

    let outputs: Vec<_> = (0..3).map(|_| driver.tick(0.2)).collect();

    assert_eq!(outputs[0].active, Some(ClipName::Idle));
    assert_eq!(outputs[0].clips.len(), 2);
    let last = &outputs[2];
    assert_eq!(last.clips.len(), 1);
    assert_eq!(last.clips[0].clip, ClipName::Idle);
    assert_eq!(last.clips[0].weight, 1.0);
}

#[test]
fn test_grace_period_then_idle() {
    let config = AvatarConfig::default();
    let mut driver =
        FrameDriver::from_config(&config, Scene::default(), Box::new(ManualBackend::new()));

    driver.session_mut().input.key_down("w");
    let output = driver.tick(DT);
    assert_eq!(output.active, None);
    assert!(output.clips.is_empty());
    // Movement does not wait for clips or the model
    assert_eq!(output.delta.outcome, MoveOutcome::Moved);

    driver.session_mut().input.key_up("w");
    let library = driver.session_mut().animation.library_mut();
    library.insert(config.animation.clip(ClipName::Idle).unwrap());
    let output = driver.tick(DT);
    assert_eq!(output.active, Some(ClipName::Idle));
}

#[test]
fn test_tracked_thumbstick_moves_forward() {
    let mut backend = ManualBackend::new();
    let mut stick = TrackedControllerState::xr_standard();
    stick.set_thumbstick(0.0, -1.0);
    backend.connect("Left Hand", stick);

    let config = AvatarConfig::default();
    let mut driver = FrameDriver::from_config(&config, scene_with_model(), Box::new(backend));
    driver.session_mut().input.set_presenting(true);
    // Desk keys are ignored while presenting
    driver.session_mut().input.key_down("s");

    let output = driver.tick(DT);
    assert!((output.transform.position - Vec3::NEG_Z * 15.0).length() < 1e-3);
    assert_eq!(output.intent.action, None);
}

#[test]
fn test_seeded_scene_respects_exclusion_radius() {
    let config = AvatarConfig::default();
    let obstacles = config.place_obstacles(1234).unwrap();
    let mut scene = config.empty_scene();
    scene.install_obstacles(obstacles).unwrap();

    assert_eq!(scene.obstacles().len(), config.obstacles.scatter.count);
    let radius = config.obstacles.scatter.exclusion_radius;
    for obstacle in scene.obstacles() {
        assert!(obstacle.position.distance(config.spawn) >= radius);
    }
}
