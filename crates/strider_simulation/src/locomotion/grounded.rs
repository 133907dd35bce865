//! GroundedSensor: сферическая проба земли под персонажем
//!
//! Контракт: сфера радиуса grounded_radius с центром position - (0, offset, 0)
//! пересекает ground-геометрию указанных слоёв (trigger-объёмы игнорируются
//! реализацией пробы). Нулевая/невалидная маска слоёв — «никогда не grounded»,
//! без падения.
//!
//! Leaf-компонент цепочки: обязан отработать ДО VerticalMotion (jump/gravity
//! читает grounded текущего кадра, не прошлого).

use bevy::prelude::*;

use crate::animation::{params, Animator};
use crate::config::MotionConfig;
use crate::locomotion::MotionState;

/// Сервис ground probe (environment query — внешний коллаборатор)
pub trait GroundProbe: Send + Sync {
    /// true если сфера (center, radius) пересекает ground-геометрию слоёв mask
    fn overlaps_ground(&self, center: Vec3, radius: f32, layers: u32) -> bool;
}

/// Resource-обёртка над активной реализацией пробы
#[derive(Resource)]
pub struct GroundProbeHandle(pub Box<dyn GroundProbe>);

impl GroundProbeHandle {
    pub fn new(probe: impl GroundProbe + 'static) -> Self {
        Self(Box::new(probe))
    }
}

impl Default for GroundProbeHandle {
    fn default() -> Self {
        Self::new(FlatGroundProbe::default())
    }
}

/// Проба против бесконечной плоскости y = ground_y
///
/// Достаточно для headless симуляции и тестов.
/// TODO: rapier-вариант через intersection_with_shape когда подключится
/// полный RapierPhysicsPlugin с загруженной геометрией уровня.
#[derive(Debug, Clone, Copy)]
pub struct FlatGroundProbe {
    pub ground_y: f32,
    /// Слои, которые эта плоскость представляет
    pub layers: u32,
}

impl Default for FlatGroundProbe {
    fn default() -> Self {
        Self {
            ground_y: 0.0,
            layers: 1,
        }
    }
}

impl GroundProbe for FlatGroundProbe {
    fn overlaps_ground(&self, center: Vec3, radius: f32, layers: u32) -> bool {
        if layers & self.layers == 0 {
            return false;
        }
        center.y - radius <= self.ground_y
    }
}

/// Per-frame обновление grounded-флага
pub fn update_grounded(
    config: &MotionConfig,
    state: &mut MotionState,
    position: Vec3,
    probe: &dyn GroundProbe,
) {
    if config.ground_layers == 0 {
        state.grounded = false;
        return;
    }

    let sphere_center = Vec3::new(
        position.x,
        position.y - config.grounded_offset,
        position.z,
    );
    state.grounded = probe.overlaps_ground(sphere_center, config.grounded_radius, config.ground_layers);
}

/// Система: ground probe → MotionState.grounded (+ публикация в аниматор)
pub fn grounded_sensor(
    probe: Res<GroundProbeHandle>,
    mut query: Query<(
        &MotionConfig,
        &mut MotionState,
        &Transform,
        Option<&mut Animator>,
    )>,
) {
    for (config, mut state, transform, animator) in query.iter_mut() {
        update_grounded(config, &mut state, transform.translation, probe.0.as_ref());

        if let Some(mut animator) = animator {
            animator.set_bool(params::GROUNDED, state.grounded);
        }
    }
}
