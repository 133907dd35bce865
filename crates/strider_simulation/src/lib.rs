//! STRIDER Simulation Core
//!
//! Third-person locomotion как headless ECS-симуляция на Bevy 0.16.
//! Ядро — per-frame state machine: grounded probe → jump/gravity →
//! speed smoothing + доворот → camera rig, со строгим порядком внутри тика.
//!
//! Внешние коллабораторы (подключаются хостом):
//! - input capture → PlayerInput
//! - ground probe → GroundProbe
//! - animation playback → Animator + AnimationClipEvent
//! - audio playback → AudioOutput
//! - camera rig → читает Transform follow-цели

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod audio;
pub mod camera;
pub mod config;
pub mod input;
pub mod locomotion;
pub mod logger;
pub mod physics;
pub mod shared;

// Re-export базовых типов для удобства
pub use animation::{params, Animator, AnimatorSink, RecordingAnimator};
pub use audio::{
    AnimationClipEvent, AnimationEventKind, AudioOutput, AudioPlayback, PlayedClip,
    RecordingAudio, CLIP_WEIGHT_GATE,
};
pub use camera::{CameraFollowTarget, LOOK_THRESHOLD};
pub use config::{ConfigError, MotionConfig};
pub use input::{InputDevice, PlayerInput};
pub use locomotion::{
    FlatGroundProbe, GroundProbe, GroundProbeHandle, LocomotionPlugin, MotionState,
    VerticalPhase, GROUNDED_STICK_VELOCITY, TERMINAL_VELOCITY,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use physics::{
    character_bundle, spawn_character, CharacterBody, DisplacementRequest, FloorPlane,
};

/// Главный plugin симуляции (fixed clock + RNG + locomotion core)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .insert_resource(DeterministicRng::new(42))
            .add_plugins(LocomotionPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Clock шагает фиксированно (1/60 сек на update) — тесты и реплеи
/// детерминированы независимо от wall-clock.
pub fn create_headless_app(seed: u64) -> App {
    use std::time::Duration;

    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
            Duration::from_secs_f64(1.0 / 60.0),
        ))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        // Headless-пол совпадает с плоскостью FlatGroundProbe по умолчанию
        .insert_resource(physics::FloorPlane { y: 0.0 })
        .add_plugins(LocomotionPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
