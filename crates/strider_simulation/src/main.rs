//! Headless симуляция STRIDER
//!
//! Прогоняет locomotion core без рендера: разгон, прыжок, приземление.

use bevy::prelude::*;
use strider_simulation::{
    create_headless_app, physics, MotionConfig, MotionState, PlayerInput,
};

fn main() {
    let seed = 42;
    println!("Starting STRIDER headless locomotion (seed: {})", seed);

    let config = MotionConfig::default();
    if let Err(error) = config.validate() {
        eprintln!("Invalid MotionConfig: {}", error);
        std::process::exit(1);
    }

    let mut app = create_headless_app(seed);

    let camera_target = app.world_mut().spawn(Transform::default()).id();
    let player = app
        .world_mut()
        .spawn(physics::character_bundle(config, Vec3::ZERO, camera_target))
        .id();

    for tick in 0..600u32 {
        // Скрипт ввода: вперёд всё время, прыжок на тике 120
        {
            let mut input = app.world_mut().get_mut::<PlayerInput>(player).unwrap();
            input.move_axis = Vec2::new(0.0, 1.0);
            if tick == 120 {
                input.jump = true;
            }
        }

        app.update();

        if tick % 100 == 0 {
            let state = app.world().get::<MotionState>(player).unwrap();
            let transform = app.world().get::<Transform>(player).unwrap();
            println!(
                "Tick {}: speed {:.3} m/s, y {:.3}, phase {:?}",
                tick, state.speed, transform.translation.y, state.phase
            );
        }
    }

    println!("Simulation complete!");
}
