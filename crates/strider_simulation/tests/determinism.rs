//! Тесты детерминизма locomotion core
//!
//! Одинаковый seed + одинаковый скрипт ввода → идентичные снепшоты мира.

use bevy::prelude::*;
use strider_simulation::{
    create_headless_app, physics, world_snapshot, MotionConfig, MotionState, PlayerInput,
};

/// Прогоняет скриптованную сессию и возвращает snapshot состояния движения
fn run_scripted_session(seed: u64, tick_count: u32) -> Vec<u8> {
    let mut app = create_headless_app(seed);

    let camera_target = app.world_mut().spawn(Transform::default()).id();
    let player = app
        .world_mut()
        .spawn(physics::character_bundle(
            MotionConfig::default(),
            Vec3::ZERO,
            camera_target,
        ))
        .id();

    for tick in 0..tick_count {
        {
            let mut input = app.world_mut().get_mut::<PlayerInput>(player).unwrap();
            input.move_axis = Vec2::new(0.7, 0.7);
            input.sprint = tick > 200;
            input.look = Vec2::new(1.0, 0.5);
            input.device = strider_simulation::InputDevice::Gamepad;
            if tick == 100 {
                input.jump = true;
            }
            input.crouch = (300..350).contains(&tick);
        }

        app.update();
    }

    world_snapshot::<MotionState>(app.world_mut())
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: u32 = 400;

    let snapshot1 = run_scripted_session(SEED, TICK_COUNT);
    let snapshot2 = run_scripted_session(SEED, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Сессия с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: u32 = 400;

    let snapshots: Vec<_> = (0..5)
        .map(|_| run_scripted_session(SEED, TICK_COUNT))
        .collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}
