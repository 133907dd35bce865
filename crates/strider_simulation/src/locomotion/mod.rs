//! Locomotion core — per-frame state machine движения персонажа
//!
//! Четыре компонента, строгий внутрикадровый порядок:
//! 1. GroundedSensor — сферическая проба земли (leaf, без зависимостей)
//! 2. VerticalMotion — jump/gravity, читает grounded ЭТОГО кадра
//! 3. HorizontalMotion — скорость/доворот/перемещение, читает вертикальную
//!    скорость ЭТОГО кадра и camera yaw ПРОШЛОГО кадра
//! 4. CameraRig — поздняя фаза, после всего движения
//!
//! Однопоточный one-pass-per-frame: состояние во владении core, блокировки
//! не нужны.

pub mod crouch;
pub mod grounded;
pub mod horizontal;
pub mod state;
pub mod vertical;

pub use crouch::{crouch, update_crouch, CROUCH_CENTER_Y, CROUCH_HEIGHT};
pub use grounded::{
    grounded_sensor, update_grounded, FlatGroundProbe, GroundProbe, GroundProbeHandle,
};
pub use horizontal::{horizontal_motion, input_magnitude, update_horizontal, SPEED_OFFSET};
pub use state::{MotionState, VerticalPhase, GROUNDED_STICK_VELOCITY, TERMINAL_VELOCITY};
pub use vertical::{update_vertical, vertical_motion};

use bevy::prelude::*;

use crate::audio::{play_animation_audio, AnimationClipEvent};
use crate::camera::camera_rotation;
use crate::physics::{apply_displacement, sync_velocity_to_rapier};
use crate::DeterministicRng;

/// Plugin locomotion core
///
/// Регистрирует цепочку FixedUpdate (60Hz):
/// grounded_sensor → vertical_motion → crouch → horizontal_motion →
/// apply_displacement → sync_velocity_to_rapier → camera_rotation →
/// play_animation_audio
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationClipEvent>()
            .init_resource::<GroundProbeHandle>();

        // RNG нужен footstep-пикеру; хост мог вставить свой seed раньше
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_systems(
            FixedUpdate,
            (
                grounded_sensor,
                vertical_motion,
                crouch,
                horizontal_motion,
                apply_displacement,
                sync_velocity_to_rapier,
                camera_rotation,
                play_animation_audio,
            )
                .chain(), // Последовательное выполнение — порядок является контрактом
        );
    }
}
