//! Math helpers для per-frame интеграторов
//!
//! - lerp: экспоненциальное приближение (t клампится в [0, 1])
//! - smooth_damp_angle: critically-damped angle interpolation с derivative state
//! - clamp_angle: wrap в [-360, 360] + clamp
//! - round3: квантование до 3 знаков (анимации не дрожат от float drift)

/// Линейная интерполяция с клампом t в [0, 1]
///
/// T ограничен, поэтому результат никогда не выходит за [a, b].
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Округление до 3 десятичных знаков
pub fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

/// Кратчайшая угловая разница current → target (градусы, результат в (-180, 180])
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Wrap угла в [-360, 360], затем clamp в [min, max]
///
/// Для yaw без лимита передаётся (f32::MIN, f32::MAX) — остаётся только wrap.
pub fn clamp_angle(mut angle: f32, min: f32, max: f32) -> f32 {
    if angle < -360.0 {
        angle += 360.0;
    }
    if angle > 360.0 {
        angle -= 360.0;
    }
    angle.clamp(min, max)
}

/// Critically-damped сглаживание скаляра к цели без overshoot
///
/// `velocity` — derivative state, живёт между кадрами (хранится в MotionState).
/// `smooth_time` — время сходимости; 0 клампится к малому epsilon.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    delta_time: f32,
) -> f32 {
    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;

    // Аппроксимация exp(-omega * dt) полиномом 3-й степени
    let x = omega * delta_time;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let original_target = target;
    let target = current - change;

    let temp = (*velocity + omega * change) * delta_time;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Не даём перелететь цель
    if (original_target - current > 0.0) == (output > original_target) {
        output = original_target;
        *velocity = (output - original_target) / delta_time;
    }

    output
}

/// Угловой вариант smooth_damp: цель приводится к кратчайшей дуге от current
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    delta_time: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, delta_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamps_t() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0); // t > 1 клампится
        assert_eq!(lerp(0.0, 10.0, -1.0), 0.0);
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.33333), 0.333);
        assert_eq!(round3(1.9996), 2.0);
        assert_eq!(round3(-0.0004), -0.0);
    }

    #[test]
    fn test_delta_angle_wraps() {
        assert_eq!(delta_angle(350.0, 10.0), 20.0);
        assert_eq!(delta_angle(10.0, 350.0), -20.0);
        assert_eq!(delta_angle(0.0, 180.0), 180.0);
    }

    #[test]
    fn test_clamp_angle_wrap_and_clamp() {
        assert_eq!(clamp_angle(370.0, f32::MIN, f32::MAX), 10.0);
        assert_eq!(clamp_angle(-370.0, f32::MIN, f32::MAX), -10.0);
        assert_eq!(clamp_angle(80.0, -30.0, 70.0), 70.0);
        assert_eq!(clamp_angle(-50.0, -30.0, 70.0), -30.0);
    }

    #[test]
    fn test_smooth_damp_converges() {
        let mut velocity = 0.0;
        let mut current = 0.0;
        let delta = 1.0 / 60.0;

        // 2 секунды при smooth_time 0.12 — должны дойти до цели
        for _ in 0..120 {
            current = smooth_damp(current, 90.0, &mut velocity, 0.12, delta);
        }
        assert!((current - 90.0).abs() < 0.5, "current = {}", current);
    }

    #[test]
    fn test_smooth_damp_no_overshoot() {
        let mut velocity = 0.0;
        let mut current = 0.0;

        for _ in 0..600 {
            current = smooth_damp(current, 45.0, &mut velocity, 0.12, 1.0 / 60.0);
            assert!(current <= 45.0 + 1e-3, "overshoot: {}", current);
        }
    }

    #[test]
    fn test_smooth_damp_angle_takes_short_arc() {
        let mut velocity = 0.0;
        // 350° → 10°: короткая дуга идёт через 360, значение растёт
        let next = smooth_damp_angle(350.0, 10.0, &mut velocity, 0.12, 1.0 / 60.0);
        assert!(next > 350.0, "next = {}", next);
    }
}
