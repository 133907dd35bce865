//! Per-frame состояние locomotion core
//!
//! Одна структура во владении core, мутируется ровно один раз за тик
//! внутри цепочки FixedUpdate систем. Никаких глобальных singletons.

use bevy::prelude::*;

use crate::config::MotionConfig;

/// Пол на вертикальную скорость вниз (m/s): ниже гравитация не интегрируется
pub const TERMINAL_VELOCITY: f32 = 53.0;

/// Скорость прижатия к земле при приземлении (не 0 — иначе probe теряет
/// контакт на склонах)
pub const GROUNDED_STICK_VELOCITY: f32 = -2.0;

/// Явная вертикальная фаза (вместо неявной комбинации bool + таймеры)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum VerticalPhase {
    #[default]
    Grounded,
    /// В воздухе, скорость вверх (прыжок)
    Rising,
    /// В воздухе, скорость вниз, fall timeout ещё не истёк
    Falling,
    /// Fall timeout истёк — полноценное падение (free-fall анимация)
    FreeFalling,
}

/// Состояние движения персонажа (mutable, один владелец — core)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MotionState {
    /// Результат ground probe текущего кадра
    pub grounded: bool,
    pub phase: VerticalPhase,

    /// Сглаженная горизонтальная скорость (снапается/квантуется)
    pub speed: f32,
    /// Бленд для анимаций: сглаживается тем же rate, но без округления
    pub animation_blend: f32,

    /// Текущий yaw персонажа (градусы) — источник истины для Transform
    pub yaw: f32,
    /// Целевой yaw относительно камеры (градусы)
    pub target_rotation: f32,
    /// Derivative state критически-демпфированного доворота
    pub rotation_velocity: f32,

    /// Вертикальная скорость (m/s), пол — -TERMINAL_VELOCITY
    pub vertical_velocity: f32,
    /// Отсчёт до возможности прыгнуть (тикает на земле)
    pub jump_timeout_remaining: f32,
    /// Отсчёт до free-fall (тикает в воздухе)
    pub fall_timeout_remaining: f32,

    /// Выводится из raw input каждый кадр, не защёлкивается
    pub is_crouching: bool,

    /// Накопленный yaw камеры (wrap в [-360, 360])
    pub camera_yaw: f32,
    /// Накопленный pitch камеры (clamp в [bottom, top])
    pub camera_pitch: f32,
}

impl MotionState {
    /// Инициализация при активации персонажа: таймеры = конфиг-таймауты
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            grounded: true,
            phase: VerticalPhase::Grounded,
            speed: 0.0,
            animation_blend: 0.0,
            yaw: 0.0,
            target_rotation: 0.0,
            rotation_velocity: 0.0,
            vertical_velocity: 0.0,
            jump_timeout_remaining: config.jump_timeout,
            fall_timeout_remaining: config.fall_timeout,
            is_crouching: false,
            camera_yaw: 0.0,
            camera_pitch: 0.0,
        }
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new(&MotionConfig::default())
    }
}
