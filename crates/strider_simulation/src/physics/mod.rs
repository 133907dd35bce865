//! Collision/movement коллаборатор (kinematic тело персонажа)
//!
//! Core владеет только кинематическими целями: он отправляет желаемое
//! перемещение за кадр (DisplacementRequest), коллаборатор применяет его и
//! отдаёт фактическую скорость для speed-сенсинга следующего кадра.
//!
//! Rapier используется для коллизий (RigidBody::KinematicPositionBased +
//! capsule Collider), интеграция перемещения — своя, не rapier forces.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::camera::CameraFollowTarget;
use crate::config::MotionConfig;
use crate::input::PlayerInput;
use crate::locomotion::MotionState;

/// Кинематическое тело персонажа: скорость + геометрия капсулы
///
/// base_height/base_center_y захватываются один раз при создании — crouch
/// восстанавливает их бит-в-бит при отпускании.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct CharacterBody {
    /// Фактическая скорость за прошлый кадр (перемещение / dt)
    pub velocity: Vec3,
    /// Текущая высота капсулы (m)
    pub height: f32,
    /// Текущий центр капсулы относительно origin персонажа
    pub center: Vec3,
    /// Исходная высота капсулы (захвачена при активации)
    pub base_height: f32,
    /// Исходный center.y (захвачен при активации)
    pub base_center_y: f32,
}

impl CharacterBody {
    pub fn new(height: f32, center: Vec3) -> Self {
        Self {
            velocity: Vec3::ZERO,
            height,
            center,
            base_height: height,
            base_center_y: center.y,
        }
    }
}

impl Default for CharacterBody {
    fn default() -> Self {
        // Капсула 1.8m, центр на 0.9m (origin в ногах)
        Self::new(1.8, Vec3::new(0.0, 0.9, 0.0))
    }
}

/// Желаемое мировое перемещение за кадр (пишет HorizontalMotion)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct DisplacementRequest(pub Vec3);

/// Плоскость пола для headless-резолвера коллизий
///
/// Без ресурса перемещение применяется как есть (коллизии резолвит
/// полноценный physics backend хоста).
#[derive(Resource, Debug, Clone, Copy)]
pub struct FloorPlane {
    pub y: f32,
}

/// Система: применяет запрошенное перемещение к Transform
///
/// Контракт коллаборатора: применяется ФАКТИЧЕСКОЕ перемещение с учётом
/// коллизий (headless — только плоскость пола). Скорость тела = фактическое
/// перемещение / dt — её читает HorizontalMotion следующего кадра как
/// current horizontal speed.
pub fn apply_displacement(
    time: Res<Time<Fixed>>,
    floor: Option<Res<FloorPlane>>,
    mut query: Query<(&DisplacementRequest, &mut CharacterBody, &mut Transform)>,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (request, mut body, mut transform) in query.iter_mut() {
        let before = transform.translation;
        transform.translation += request.0;

        if let Some(floor) = floor.as_deref() {
            if transform.translation.y < floor.y {
                transform.translation.y = floor.y;
            }
        }

        body.velocity = (transform.translation - before) / delta;
    }
}

/// Система: зеркалит скорость тела в rapier Velocity
///
/// Подключённый physics backend видит кинематическое движение персонажа
/// (contacts, queries), сам скорость не интегрирует.
pub fn sync_velocity_to_rapier(
    mut query: Query<(&CharacterBody, &mut Velocity), With<MotionState>>,
) {
    for (body, mut rapier_velocity) in query.iter_mut() {
        rapier_velocity.linvel = body.velocity;
    }
}

/// Collision groups акторов (группа 1, коллайдит со всеми)
pub fn actor_groups() -> CollisionGroups {
    CollisionGroups::new(Group::GROUP_1, Group::ALL)
}

/// Bundle персонажа: ECS-компоненты core + rapier физика
///
/// `camera_target` — заранее созданный entity, чью rotation пишет CameraRig.
pub fn character_bundle(
    config: MotionConfig,
    position: Vec3,
    camera_target: Entity,
) -> impl Bundle {
    let state = MotionState::new(&config);

    (
        Transform::from_translation(position),
        state,
        config,
        PlayerInput::default(),
        CharacterBody::default(),
        DisplacementRequest::default(),
        CameraFollowTarget {
            target: camera_target,
        },
        // Rapier physics
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(0.5, 0.4), // Высота 1.8m (1.0 цилиндр + 2 * 0.4 сферы)
        Velocity::default(),
        actor_groups(),
    )
}

/// Spawn helper: camera follow target + персонаж, возвращает entity персонажа
pub fn spawn_character(commands: &mut Commands, config: MotionConfig, position: Vec3) -> Entity {
    let camera_target = commands.spawn(Transform::default()).id();
    commands
        .spawn(character_bundle(config, position, camera_target))
        .id()
}
