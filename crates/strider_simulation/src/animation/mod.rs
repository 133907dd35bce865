//! Animation-parameter sink (опциональный коллаборатор)
//!
//! Рендер/анимация — внешняя подсистема. Core публикует именованные
//! параметры через AnimatorSink; отсутствие аниматора — не ошибка, а no-op:
//! системы берут `Option<&mut Animator>` и молча пропускают (capability check
//! вместо разбросанных null-проверок).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bevy::prelude::*;

/// Имена анимационных параметров (аналог animator IDs)
pub mod params {
    pub const SPEED: &str = "Speed";
    pub const GROUNDED: &str = "Grounded";
    pub const JUMP: &str = "Jump";
    pub const FREE_FALL: &str = "FreeFall";
    pub const MOTION_SPEED: &str = "MotionSpeed";
    pub const IS_CROUCHING: &str = "IsCrouching";
}

/// Полиморфный sink анимационных параметров
pub trait AnimatorSink: Send + Sync {
    fn set_bool(&mut self, param: &str, value: bool);
    fn set_float(&mut self, param: &str, value: f32);
}

/// Компонент-обёртка над sink'ом конкретного animation backend
///
/// Акторы БЕЗ этого компонента анимационных параметров не получают
/// (headless симуляция, капсула без скина).
#[derive(Component)]
pub struct Animator(Box<dyn AnimatorSink>);

impl Animator {
    pub fn new(sink: impl AnimatorSink + 'static) -> Self {
        Self(Box::new(sink))
    }

    pub fn set_bool(&mut self, param: &str, value: bool) {
        self.0.set_bool(param, value);
    }

    pub fn set_float(&mut self, param: &str, value: f32) {
        self.0.set_float(param, value);
    }
}

/// Sink-регистратор для headless режима и тестов
///
/// Хранит последние значения параметров; клон разделяет хранилище,
/// так что тест держит копию и читает что публикует симуляция.
#[derive(Default, Clone)]
pub struct RecordingAnimator {
    inner: Arc<Mutex<RecordedParams>>,
}

#[derive(Default)]
struct RecordedParams {
    bools: HashMap<String, bool>,
    floats: HashMap<String, f32>,
}

impl RecordingAnimator {
    pub fn get_bool(&self, param: &str) -> Option<bool> {
        self.inner.lock().unwrap().bools.get(param).copied()
    }

    pub fn get_float(&self, param: &str) -> Option<f32> {
        self.inner.lock().unwrap().floats.get(param).copied()
    }
}

impl AnimatorSink for RecordingAnimator {
    fn set_bool(&mut self, param: &str, value: bool) {
        self.inner.lock().unwrap().bools.insert(param.to_string(), value);
    }

    fn set_float(&mut self, param: &str, value: f32) {
        self.inner.lock().unwrap().floats.insert(param.to_string(), value);
    }
}
