//! VerticalMotion: jump & gravity state machine
//!
//! Состояния: Grounded | Rising | Falling | FreeFalling (см. VerticalPhase).
//! Переходы:
//! - Вход в Grounded (каждый grounded-кадр, идемпотентно): сброс fall-таймера,
//!   очистка jump/free-fall анимационных флагов, прижатие отрицательной
//!   скорости к -2.0; прыжок если запрошен И jump-таймер ≤ 0; jump-таймер
//!   тикает вниз каждый grounded-кадр даже без запроса.
//! - Airborne: jump-таймер сбрасывается к полному значению (приземление +
//!   немедленный прыжок всегда гейтится полным таймаутом); fall-таймер тикает
//!   вниз с граничным сравнением >= 0.0 — free-fall флаг поднимается на первом
//!   кадре, ВОШЕДШЕМ с отрицательным таймером (граница сохранена намеренно);
//!   запрос прыжка принудительно сбрасывается каждый airborne-кадр.
//! - Гравитация: один шаг Эйлера за airborne-кадр, пол -TERMINAL_VELOCITY.
//!   Grounded-кадры не интегрируют: прижатие -2.0 и прыжковый импульс
//!   остаются точными значениями.

use bevy::prelude::*;

use crate::animation::{params, Animator};
use crate::config::MotionConfig;
use crate::input::PlayerInput;
use crate::locomotion::{MotionState, VerticalPhase, GROUNDED_STICK_VELOCITY, TERMINAL_VELOCITY};
use crate::logger::log;

/// Per-frame шаг вертикальной машины состояний
pub fn update_vertical(
    config: &MotionConfig,
    state: &mut MotionState,
    input: &mut PlayerInput,
    mut animator: Option<&mut Animator>,
    delta: f32,
) {
    if state.grounded {
        state.fall_timeout_remaining = config.fall_timeout;
        state.phase = VerticalPhase::Grounded;

        if let Some(animator) = animator.as_deref_mut() {
            animator.set_bool(params::JUMP, false);
            animator.set_bool(params::FREE_FALL, false);
        }

        // Не обнуляем: -2.0 держит пробу в контакте на склонах
        if state.vertical_velocity < 0.0 {
            state.vertical_velocity = GROUNDED_STICK_VELOCITY;
        }

        if input.jump && state.jump_timeout_remaining <= 0.0 {
            // v0 = sqrt(H * -2 * G) — баллистическая дуга высотой jump_height
            state.vertical_velocity = (config.jump_height * -2.0 * config.gravity).sqrt();
            state.phase = VerticalPhase::Rising;

            if let Some(animator) = animator.as_deref_mut() {
                animator.set_bool(params::JUMP, true);
            }
            log(&format!("Jump fired: v0 = {:.3} m/s", state.vertical_velocity));
        }

        if state.jump_timeout_remaining >= 0.0 {
            state.jump_timeout_remaining -= delta;
        }
    } else {
        state.jump_timeout_remaining = config.jump_timeout;

        if state.fall_timeout_remaining >= 0.0 {
            state.fall_timeout_remaining -= delta;
            state.phase = if state.vertical_velocity > 0.0 {
                VerticalPhase::Rising
            } else {
                VerticalPhase::Falling
            };
        } else {
            if state.phase != VerticalPhase::FreeFalling {
                log("Free-fall entered");
            }
            state.phase = VerticalPhase::FreeFalling;
            if let Some(animator) = animator.as_deref_mut() {
                animator.set_bool(params::FREE_FALL, true);
            }
        }

        // Контракт с input-коллаборатором: запрос прыжка не переживает полёт
        input.jump = false;

        if state.vertical_velocity > -TERMINAL_VELOCITY {
            state.vertical_velocity =
                (state.vertical_velocity + config.gravity * delta).max(-TERMINAL_VELOCITY);
        }
    }
}

/// Система: вертикальная машина состояний (после grounded_sensor)
pub fn vertical_motion(
    time: Res<Time<Fixed>>,
    mut query: Query<(
        &MotionConfig,
        &mut MotionState,
        &mut PlayerInput,
        Option<&mut Animator>,
    )>,
) {
    let delta = time.delta_secs();

    for (config, mut state, mut input, mut animator) in query.iter_mut() {
        update_vertical(config, &mut state, &mut input, animator.as_deref_mut(), delta);
    }
}
