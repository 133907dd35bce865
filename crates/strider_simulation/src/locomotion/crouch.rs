//! Crouch: per-frame производное состояние, не защёлкивается
//!
//! Удержание crouch сжимает капсулу до фиксированной геометрии; отпускание
//! восстанавливает захваченные при активации height/center.y бит-в-бит.

use bevy::prelude::*;

use crate::animation::{params, Animator};
use crate::input::PlayerInput;
use crate::locomotion::MotionState;
use crate::physics::CharacterBody;

/// Высота капсулы в присяде (m)
pub const CROUCH_HEIGHT: f32 = 1.0;
/// Center.y капсулы в присяде (m)
pub const CROUCH_CENTER_Y: f32 = 0.5;

/// Per-frame вывод crouch-состояния из raw input
pub fn update_crouch(state: &mut MotionState, input: &PlayerInput, body: &mut CharacterBody) {
    if input.crouch {
        state.is_crouching = true;
        body.height = CROUCH_HEIGHT;
        body.center.y = CROUCH_CENTER_Y;
    } else {
        state.is_crouching = false;
        body.height = body.base_height;
        body.center.y = body.base_center_y;
    }
}

/// Система: crouch-геометрия + публикация флага в аниматор
pub fn crouch(
    mut query: Query<(
        &mut MotionState,
        &PlayerInput,
        &mut CharacterBody,
        Option<&mut Animator>,
    )>,
) {
    for (mut state, input, mut body, animator) in query.iter_mut() {
        update_crouch(&mut state, input, &mut body);

        if let Some(mut animator) = animator {
            animator.set_bool(params::IS_CROUCHING, state.is_crouching);
        }
    }
}
