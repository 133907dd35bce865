//! CameraRig: накопление yaw/pitch и rotation follow-цели
//!
//! Камеру не двигаем — пишем только rotation look-at цели, внешний camera
//! rig читает её по своему расписанию. Бежит ПОСЛЕ движения: camera yaw
//! потребляется HorizontalMotion лишь на следующем кадре (однокадровый лаг
//! между поворотом камеры и направлением движения — намеренный, сохранён).

use bevy::prelude::*;

use crate::config::MotionConfig;
use crate::input::PlayerInput;
use crate::locomotion::MotionState;
use crate::shared::clamp_angle;

/// Порог look-input (сравнение по квадрату magnitude)
pub const LOOK_THRESHOLD: f32 = 0.01;

/// Ссылка на entity, чью rotation пишет camera rig
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraFollowTarget {
    pub target: Entity,
}

/// Per-frame шаг camera rig; возвращает rotation для follow-цели
pub fn update_camera(
    config: &MotionConfig,
    state: &mut MotionState,
    input: &PlayerInput,
    delta: f32,
) -> Quat {
    if input.look.length_squared() >= LOOK_THRESHOLD * LOOK_THRESHOLD
        && !config.lock_camera_position
    {
        // Pointer-дельты уже нормализованы источником — dt не умножаем
        let multiplier = if input.device.is_pointer() { 1.0 } else { delta };

        state.camera_yaw += input.look.x * multiplier;
        state.camera_pitch += input.look.y * multiplier;
    }

    // Yaw без лимита (только wrap в [-360, 360]), pitch зажат конфигом
    state.camera_yaw = clamp_angle(state.camera_yaw, f32::MIN, f32::MAX);
    state.camera_pitch = clamp_angle(state.camera_pitch, config.bottom_clamp, config.top_clamp);

    Quat::from_euler(
        EulerRot::YXZ,
        state.camera_yaw.to_radians(),
        (state.camera_pitch + config.camera_angle_override).to_radians(),
        0.0,
    )
}

/// Система: camera rotation → Transform follow-цели
pub fn camera_rotation(
    time: Res<Time<Fixed>>,
    mut players: Query<(
        &MotionConfig,
        &mut MotionState,
        &PlayerInput,
        &CameraFollowTarget,
    )>,
    mut targets: Query<&mut Transform, Without<MotionState>>,
) {
    let delta = time.delta_secs();

    for (config, mut state, input, follow) in players.iter_mut() {
        let rotation = update_camera(config, &mut state, input, delta);

        if let Ok(mut transform) = targets.get_mut(follow.target) {
            transform.rotation = rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputDevice;

    #[test]
    fn test_pitch_never_leaves_clamp() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(&config);
        let input = PlayerInput {
            look: Vec2::new(0.0, 5.0),
            device: InputDevice::MouseKeyboard,
            ..PlayerInput::default()
        };

        for _ in 0..200 {
            update_camera(&config, &mut state, &input, 1.0 / 60.0);
            assert!(state.camera_pitch <= config.top_clamp);
            assert!(state.camera_pitch >= config.bottom_clamp);
        }
        assert_eq!(state.camera_pitch, config.top_clamp);
    }

    #[test]
    fn test_pointer_deltas_unscaled() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(&config);
        let delta = 1.0 / 60.0;

        let mouse = PlayerInput {
            look: Vec2::new(10.0, 0.0),
            device: InputDevice::MouseKeyboard,
            ..PlayerInput::default()
        };
        update_camera(&config, &mut state, &mouse, delta);
        assert!((state.camera_yaw - 10.0).abs() < 1e-4);

        let mut pad_state = MotionState::new(&config);
        let pad = PlayerInput {
            look: Vec2::new(10.0, 0.0),
            device: InputDevice::Gamepad,
            ..PlayerInput::default()
        };
        update_camera(&config, &mut pad_state, &pad, delta);
        assert!((pad_state.camera_yaw - 10.0 * delta).abs() < 1e-4);
    }

    #[test]
    fn test_lock_and_threshold_skip_accumulation() {
        let mut config = MotionConfig::default();
        let mut state = MotionState::new(&config);

        // Ниже порога — не накапливаем
        let tiny = PlayerInput {
            look: Vec2::new(0.005, 0.005),
            ..PlayerInput::default()
        };
        update_camera(&config, &mut state, &tiny, 1.0 / 60.0);
        assert_eq!(state.camera_yaw, 0.0);

        // Камера заблокирована — не накапливаем даже при большом вводе
        config.lock_camera_position = true;
        let big = PlayerInput {
            look: Vec2::new(50.0, 50.0),
            ..PlayerInput::default()
        };
        update_camera(&config, &mut state, &big, 1.0 / 60.0);
        assert_eq!(state.camera_yaw, 0.0);
        assert_eq!(state.camera_pitch, 0.0);
    }

    #[test]
    fn test_yaw_wraps_unclamped() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(&config);
        state.camera_yaw = 355.0;
        let input = PlayerInput {
            look: Vec2::new(10.0, 0.0),
            device: InputDevice::MouseKeyboard,
            ..PlayerInput::default()
        };

        update_camera(&config, &mut state, &input, 1.0 / 60.0);
        // 365 → wrap в 5
        assert!((state.camera_yaw - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_angle_override_applied_to_pitch_only() {
        let config = MotionConfig {
            camera_angle_override: 15.0,
            ..MotionConfig::default()
        };
        let mut state = MotionState::new(&config);

        let rotation = update_camera(&config, &mut state, &PlayerInput::default(), 1.0 / 60.0);
        let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
        assert!(yaw.abs() < 1e-5);
        assert!((pitch - 15f32.to_radians()).abs() < 1e-4);
        assert!(roll.abs() < 1e-5);
    }
}
