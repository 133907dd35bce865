//! Footstep/landing аудио от animation events
//!
//! События приходят от animation-playback коллаборатора в произвольные
//! моменты клипа (0..n за кадр) — обработчик обязан быть идемпотентным:
//! чистый audio trigger, без мутации locomotion-состояния.
//!
//! Защита: пустой набор footstep-клипов и отсутствующий
//! landing-клип подавляют вызов, кадр никогда не падает.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use rand::Rng;

use crate::config::MotionConfig;
use crate::physics::CharacterBody;
use crate::DeterministicRng;

/// Порог веса клипа: события слабо-влитых клипов (blend < 0.5) не звучат
pub const CLIP_WEIGHT_GATE: f32 = 0.5;

/// One-shot audio playback коллаборатор
pub trait AudioPlayback: Send + Sync {
    fn play_one_shot(&self, clip: &str, position: Vec3, volume: f32);
}

/// Resource-обёртка над playback backend. Отсутствует — звук молча выключен
#[derive(Resource)]
pub struct AudioOutput(pub Box<dyn AudioPlayback>);

impl AudioOutput {
    pub fn new(playback: impl AudioPlayback + 'static) -> Self {
        Self(Box::new(playback))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEventKind {
    Footstep,
    Land,
}

/// Событие из анимационного клипа (тайминг привязан к клипу, не к тику)
#[derive(Event, Debug, Clone)]
pub struct AnimationClipEvent {
    pub entity: Entity,
    pub kind: AnimationEventKind,
    /// Вес клипа в блендере анимаций на момент события
    pub clip_weight: f32,
}

/// Система: animation events → one-shot звуки
///
/// Footstep: равномерно случайный клип из набора (DeterministicRng — реплеи
/// воспроизводимы). Land: единственный сконфигурированный клип.
/// Позиция — центр капсулы в мировых координатах.
pub fn play_animation_audio(
    mut events: EventReader<AnimationClipEvent>,
    audio: Option<Res<AudioOutput>>,
    mut rng: ResMut<DeterministicRng>,
    query: Query<(&MotionConfig, &Transform, &CharacterBody)>,
) {
    let Some(audio) = audio else {
        return;
    };

    for event in events.read() {
        if event.clip_weight <= CLIP_WEIGHT_GATE {
            continue;
        }
        let Ok((config, transform, body)) = query.get(event.entity) else {
            continue;
        };
        let position = transform.transform_point(body.center);

        match event.kind {
            AnimationEventKind::Footstep => {
                if config.footstep_clips.is_empty() {
                    continue;
                }
                let index = rng.rng.gen_range(0..config.footstep_clips.len());
                audio.0.play_one_shot(
                    &config.footstep_clips[index],
                    position,
                    config.footstep_volume,
                );
            }
            AnimationEventKind::Land => {
                if let Some(clip) = &config.landing_clip {
                    audio.0.play_one_shot(clip, position, config.footstep_volume);
                }
            }
        }
    }
}

/// Записанный one-shot (для RecordingAudio)
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedClip {
    pub clip: String,
    pub position: Vec3,
    pub volume: f32,
}

/// Playback-регистратор для headless режима и тестов (shared storage через клон)
#[derive(Default, Clone)]
pub struct RecordingAudio {
    inner: Arc<Mutex<Vec<PlayedClip>>>,
}

impl RecordingAudio {
    pub fn plays(&self) -> Vec<PlayedClip> {
        self.inner.lock().unwrap().clone()
    }
}

impl AudioPlayback for RecordingAudio {
    fn play_one_shot(&self, clip: &str, position: Vec3, volume: f32) {
        self.inner.lock().unwrap().push(PlayedClip {
            clip: clip.to_string(),
            position,
            volume,
        });
    }
}
