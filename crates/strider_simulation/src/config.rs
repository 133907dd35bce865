//! Authoring-time конфигурация locomotion core
//!
//! MotionConfig задаётся снаружи (tuning data), валидируется при загрузке —
//! per-frame update конфигурацию НЕ проверяет (load-time concern хоста).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки валидации MotionConfig (поднимаются при загрузке, не в update)
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("rotation_smooth_time {0} outside [0.0, 0.3]")]
    RotationSmoothTime(f32),

    #[error("footstep_volume {0} outside [0.0, 1.0]")]
    FootstepVolume(f32),

    /// Положительная гравитация даёт NaN в формуле прыжка sqrt(H * -2 * G)
    #[error("gravity {0} must be negative")]
    Gravity(f32),

    #[error("grounded_radius {0} must be positive")]
    GroundedRadius(f32),
}

/// Конфигурация движения персонажа (immutable per session)
///
/// Значения по умолчанию — базовый humanoid: ходьба 2 m/s, спринт 5.335 m/s,
/// прыжок 1.2 m при гравитации -15 m/s².
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct MotionConfig {
    /// Скорость ходьбы (m/s)
    pub move_speed: f32,
    /// Скорость спринта (m/s)
    pub sprint_speed: f32,
    /// Время доворота к направлению движения (сек, диапазон [0.0, 0.3])
    pub rotation_smooth_time: f32,
    /// Ускорение/замедление (rate для экспоненциального приближения)
    pub speed_change_rate: f32,

    /// Высота прыжка (m)
    pub jump_height: f32,
    /// Собственная гравитация персонажа (m/s², отрицательная)
    pub gravity: f32,
    /// Время до возможности прыгнуть снова (сек). 0 — прыжок сразу
    pub jump_timeout: f32,
    /// Задержка до перехода в free-fall (сек). Полезно на лестницах
    pub fall_timeout: f32,

    /// Смещение ground-probe вниз от позиции (m). Отрицательное — выше ног
    pub grounded_offset: f32,
    /// Радиус ground-probe сферы (m), должен совпадать с радиусом капсулы
    pub grounded_radius: f32,
    /// Битовая маска слоёв, считающихся землёй. 0 — никогда не grounded
    pub ground_layers: u32,

    /// Верхний предел pitch камеры (градусы)
    pub top_clamp: f32,
    /// Нижний предел pitch камеры (градусы)
    pub bottom_clamp: f32,
    /// Дополнительные градусы pitch поверх накопленного (fine-tuning)
    pub camera_angle_override: f32,
    /// Полная блокировка накопления camera input
    pub lock_camera_position: bool,

    /// Клипы шагов (случайный выбор). Пустой набор — шаги без звука
    pub footstep_clips: Vec<String>,
    /// Клип приземления. None — приземление без звука
    pub landing_clip: Option<String>,
    /// Громкость footstep/landing, диапазон [0.0, 1.0]
    pub footstep_volume: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            sprint_speed: 5.335,
            rotation_smooth_time: 0.12,
            speed_change_rate: 10.0,
            jump_height: 1.2,
            gravity: -15.0,
            jump_timeout: 0.50,
            fall_timeout: 0.15,
            grounded_offset: -0.14,
            grounded_radius: 0.28,
            ground_layers: 1,
            top_clamp: 70.0,
            bottom_clamp: -30.0,
            camera_angle_override: 0.0,
            lock_camera_position: false,
            footstep_clips: Vec::new(),
            landing_clip: None,
            footstep_volume: 0.5,
        }
    }
}

impl MotionConfig {
    /// Load-time валидация инвариантов конфигурации
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=0.3).contains(&self.rotation_smooth_time) {
            return Err(ConfigError::RotationSmoothTime(self.rotation_smooth_time));
        }
        if !(0.0..=1.0).contains(&self.footstep_volume) {
            return Err(ConfigError::FootstepVolume(self.footstep_volume));
        }
        if self.gravity >= 0.0 {
            return Err(ConfigError::Gravity(self.gravity));
        }
        if self.grounded_radius <= 0.0 {
            return Err(ConfigError::GroundedRadius(self.grounded_radius));
        }
        Ok(())
    }
}
