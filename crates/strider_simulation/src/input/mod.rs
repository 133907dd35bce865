//! Per-frame input snapshot от input-коллаборатора
//!
//! Input capture — внешняя подсистема: она заполняет PlayerInput перед
//! FixedUpdate, симуляция только читает. Единственное исключение — поле
//! `jump`: core сбрасывает его каждый airborne-кадр (явный контракт,
//! иначе прыжок «съеденный» в воздухе сработает в момент приземления).

use bevy::prelude::*;

/// Класс активного устройства ввода
///
/// Pointer-дельты (мышь) уже нормализованы по частоте кадров источником —
/// camera rig не умножает их на delta time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum InputDevice {
    #[default]
    MouseKeyboard,
    Gamepad,
}

impl InputDevice {
    pub fn is_pointer(&self) -> bool {
        matches!(self, InputDevice::MouseKeyboard)
    }
}

/// Снимок ввода за кадр
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    /// Планарный вектор движения. Либо точный ноль, либо аналоговый сэмпл —
    /// near-zero шума не бывает по построению input-коллаборатора
    pub move_axis: Vec2,
    /// Look-дельта за кадр
    pub look: Vec2,
    pub sprint: bool,
    /// Запрос прыжка. Core сбрасывает в false каждый airborne-кадр
    pub jump: bool,
    /// true для аналоговых устройств: magnitude move_axis масштабирует разгон
    pub analog_movement: bool,
    pub crouch: bool,
    pub device: InputDevice,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_pointer_class() {
        assert!(InputDevice::MouseKeyboard.is_pointer());
        assert!(!InputDevice::Gamepad.is_pointer());
    }

    #[test]
    fn test_default_snapshot_is_neutral() {
        let input = PlayerInput::default();
        assert_eq!(input.move_axis, Vec2::ZERO);
        assert!(!input.jump && !input.sprint && !input.crouch);
    }
}
