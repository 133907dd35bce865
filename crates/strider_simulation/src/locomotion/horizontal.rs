//! HorizontalMotion: целевая скорость, доворот, запрос перемещения
//!
//! Алгоритм (строгий порядок):
//! 1. target speed = sprint/move, точный ноль move-вектора → 0
//! 2. current speed = горизонтальная проекция скорости тела (коллаборатор)
//! 3. |current - target| > 0.1 → lerp к target * input magnitude с
//!    квантованием до 3 знаков; иначе снап ровно в target
//! 4. animation_blend сглаживается тем же rate БЕЗ округления, < 0.01 → 0
//! 5. move ≠ 0 → target yaw = atan2(x, z)° + camera yaw, критически-
//!    демпфированный доворот; move = 0 → target yaw НЕ пересчитывается
//!    (остановка input не сбрасывает facing)
//! 6. запрос перемещения = forward(target yaw) * speed * dt + (0, vy, 0) * dt
//! 7. публикация Speed/MotionSpeed в аниматор

use bevy::prelude::*;

use crate::animation::{params, Animator};
use crate::config::MotionConfig;
use crate::input::PlayerInput;
use crate::locomotion::MotionState;
use crate::physics::{CharacterBody, DisplacementRequest};
use crate::shared::{lerp, round3, smooth_damp_angle};

/// Зона снапа вокруг целевой скорости (m/s)
pub const SPEED_OFFSET: f32 = 0.1;

/// Magnitude ввода: 1.0 для цифровых устройств независимо от частичного нажатия
pub fn input_magnitude(input: &PlayerInput) -> f32 {
    if input.analog_movement {
        input.move_axis.length()
    } else {
        1.0
    }
}

/// Per-frame шаг горизонтального движения; возвращает желаемое мировое
/// перемещение за кадр (уходит collision-коллаборатору)
pub fn update_horizontal(
    config: &MotionConfig,
    state: &mut MotionState,
    input: &PlayerInput,
    body_velocity: Vec3,
    delta: f32,
) -> Vec3 {
    let mut target_speed = if input.sprint {
        config.sprint_speed
    } else {
        config.move_speed
    };

    // Точное сравнение намеренно: move-вектор либо ровно ноль, либо
    // аналоговый сэмпл (контракт input-коллаборатора)
    if input.move_axis == Vec2::ZERO {
        target_speed = 0.0;
    }

    let current_horizontal_speed = Vec3::new(body_velocity.x, 0.0, body_velocity.z).length();
    let magnitude = input_magnitude(input);

    if current_horizontal_speed < target_speed - SPEED_OFFSET
        || current_horizontal_speed > target_speed + SPEED_OFFSET
    {
        // Экспоненциальное приближение даёт органичный разгон;
        // квантование убирает дрожь анимаций от float drift
        let smoothed = lerp(
            current_horizontal_speed,
            target_speed * magnitude,
            delta * config.speed_change_rate,
        );
        state.speed = round3(smoothed);
    } else {
        state.speed = target_speed;
    }

    state.animation_blend = lerp(
        state.animation_blend,
        target_speed,
        delta * config.speed_change_rate,
    );
    if state.animation_blend < 0.01 {
        state.animation_blend = 0.0;
    }

    if input.move_axis != Vec2::ZERO {
        let direction = Vec3::new(input.move_axis.x, 0.0, input.move_axis.y).normalize();
        // camera_yaw здесь — значение прошлого кадра (CameraRig бежит позже);
        // однокадровый лаг между поворотом камеры и направлением — намеренный
        state.target_rotation =
            direction.x.atan2(direction.z).to_degrees() + state.camera_yaw;
        state.yaw = smooth_damp_angle(
            state.yaw,
            state.target_rotation,
            &mut state.rotation_velocity,
            config.rotation_smooth_time,
            delta,
        );
    }

    // Перемещение — по TARGET yaw, не по текущему сглаженному
    let yaw_rad = state.target_rotation.to_radians();
    let target_direction = Vec3::new(yaw_rad.sin(), 0.0, yaw_rad.cos());

    target_direction * (state.speed * delta)
        + Vec3::new(0.0, state.vertical_velocity, 0.0) * delta
}

/// Система: горизонтальное движение (после vertical_motion — перемещение
/// кадра включает вертикальную скорость ЭТОГО кадра)
pub fn horizontal_motion(
    time: Res<Time<Fixed>>,
    mut query: Query<(
        &MotionConfig,
        &mut MotionState,
        &PlayerInput,
        &CharacterBody,
        &mut DisplacementRequest,
        &mut Transform,
        Option<&mut Animator>,
    )>,
) {
    let delta = time.delta_secs();

    for (config, mut state, input, body, mut request, mut transform, animator) in query.iter_mut()
    {
        request.0 = update_horizontal(config, &mut state, input, body.velocity, delta);
        transform.rotation = Quat::from_rotation_y(state.yaw.to_radians());

        if let Some(mut animator) = animator {
            animator.set_float(params::SPEED, state.animation_blend);
            animator.set_float(params::MOTION_SPEED, input_magnitude(input));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_input() -> PlayerInput {
        PlayerInput {
            move_axis: Vec2::new(0.0, 1.0),
            ..PlayerInput::default()
        }
    }

    #[test]
    fn test_speed_smooth_path_is_rounded() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(&config);
        let input = forward_input();
        let delta = 1.0 / 60.0;

        // current 0, target 2.0 → разница > 0.1 → lerp(0, 2, 1/6) = 0.3333…
        update_horizontal(&config, &mut state, &input, Vec3::ZERO, delta);
        assert_eq!(state.speed, 0.333);
    }

    #[test]
    fn test_speed_snaps_within_offset() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(&config);
        let input = forward_input();

        // |1.95 - 2.0| <= 0.1 → ровно target, без остатка интерполяции
        update_horizontal(&config, &mut state, &input, Vec3::new(0.0, 0.0, 1.95), 1.0 / 60.0);
        assert_eq!(state.speed, 2.0);
    }

    #[test]
    fn test_zero_move_targets_zero_speed() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(&config);
        let input = PlayerInput {
            sprint: true, // спринт не важен при нулевом векторе
            ..PlayerInput::default()
        };

        // Остаточная скорость 3.0 → замедление к 0
        update_horizontal(&config, &mut state, &input, Vec3::new(0.0, 0.0, 3.0), 1.0 / 60.0);
        assert!(state.speed < 3.0);

        // В зоне снапа → ровно 0
        update_horizontal(&config, &mut state, &input, Vec3::new(0.0, 0.0, 0.05), 1.0 / 60.0);
        assert_eq!(state.speed, 0.0);
    }

    #[test]
    fn test_sprint_raises_target() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(&config);
        let input = PlayerInput {
            sprint: true,
            ..forward_input()
        };

        // current 5.3 в зоне снапа спринта (5.335 ± 0.1)
        update_horizontal(&config, &mut state, &input, Vec3::new(0.0, 0.0, 5.3), 1.0 / 60.0);
        assert_eq!(state.speed, config.sprint_speed);
    }

    #[test]
    fn test_animation_blend_snaps_to_zero() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(&config);
        state.animation_blend = 0.009;
        let input = PlayerInput::default();

        update_horizontal(&config, &mut state, &input, Vec3::ZERO, 1.0 / 60.0);
        assert_eq!(state.animation_blend, 0.0);
    }

    #[test]
    fn test_facing_retained_on_zero_input() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(&config);
        state.camera_yaw = 30.0;
        let delta = 1.0 / 60.0;

        // Вперёд при camera yaw 30° → target rotation 30°
        let input = forward_input();
        update_horizontal(&config, &mut state, &input, Vec3::ZERO, delta);
        assert!((state.target_rotation - 30.0).abs() < 1e-4);

        // Нулевой ввод + повёрнутая камера: target rotation не трогаем
        state.camera_yaw = 120.0;
        let idle = PlayerInput::default();
        update_horizontal(&config, &mut state, &idle, Vec3::ZERO, delta);
        assert!((state.target_rotation - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_displacement_follows_target_yaw() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(&config);
        state.speed = 2.0;
        state.target_rotation = 90.0;
        state.vertical_velocity = -2.0;
        let input = PlayerInput::default();
        let delta = 1.0 / 60.0;

        let displacement =
            update_horizontal(&config, &mut state, &input, Vec3::new(2.0, 0.0, 0.0), delta);

        // target yaw 90° → мировой +X; скорость снапнулась в 0 (нет ввода,
        // current 2.0 > 0.1 → lerp вниз), поэтому проверяем только направление
        assert!(displacement.x >= 0.0);
        assert!(displacement.z.abs() < 1e-4);
        assert!((displacement.y - (-2.0 * delta)).abs() < 1e-6);
    }

    #[test]
    fn test_analog_magnitude_scales_acceleration() {
        let config = MotionConfig::default();
        let mut state = MotionState::new(&config);
        let input = PlayerInput {
            move_axis: Vec2::new(0.0, 0.5),
            analog_movement: true,
            ..PlayerInput::default()
        };

        assert_eq!(input_magnitude(&input), 0.5);

        // Цифровое устройство — magnitude всегда 1
        let digital = PlayerInput {
            move_axis: Vec2::new(0.0, 0.5),
            analog_movement: false,
            ..PlayerInput::default()
        };
        assert_eq!(input_magnitude(&digital), 1.0);

        let delta = 1.0 / 60.0;
        update_horizontal(&config, &mut state, &input, Vec3::ZERO, delta);
        // lerp(0, 2.0 * 0.5, 1/6) = 0.1666… → 0.167
        assert_eq!(state.speed, 0.167);
    }
}
