//! Audio cue dispatch
//!
//! The simulation only emits events. `AudioManager` turns the ones that make
//! noise into [`SoundEffect`]s, applies volume and mute, and hands them to a
//! [`SoundBackend`] that does the actual synthesis.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundEffect {
    /// Projectile fired - short descending square blip
    Shoot,
    /// Rock or craft destroyed - low rumble, scaled by magnitude
    Explosion { magnitude: f32 },
    /// Engine hum on/off
    Thrust { active: bool },
}

/// Synthesizer behind the manager
pub trait SoundBackend {
    /// Play `effect` at `volume` (0.0 - 1.0, already mixed)
    fn play(&mut self, effect: SoundEffect, volume: f32);

    /// Resume output after a user gesture (no-op where not needed)
    fn resume(&mut self) {}
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend;

impl SoundBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {:?} @ {:.2}", effect, volume);
    }
}

/// Backend that records every cue, for tests and replays
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub played: Vec<(SoundEffect, f32)>,
}

impl SoundBackend for RecordingBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played.push((effect, volume));
    }
}

/// Audio manager for the game
pub struct AudioManager<B: SoundBackend = LogBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Whether the craft is currently thrusting
    thrusting: bool,
    /// Whether the backend hum is currently on
    humming: bool,
}

impl Default for AudioManager<LogBackend> {
    fn default() -> Self {
        Self::new(LogBackend)
    }
}

impl<B: SoundBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            thrusting: false,
            humming: false,
        }
    }

    pub fn from_settings(backend: B, settings: &Settings) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_hum();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
        self.sync_hum();
    }

    /// Mute/unmute all audio
    ///
    /// A running engine hum is stopped on mute and restarted on unmute if the
    /// craft is still thrusting.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_hum();
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.muted);
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn resume(&mut self) {
        self.backend.resume();
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    ///
    /// Silent cues are dropped, except stopping the engine hum, which always
    /// reaches the backend.
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 && effect != (SoundEffect::Thrust { active: false }) {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Bring the backend hum in line with thrust state and volume
    fn sync_hum(&mut self) {
        let want = self.thrusting && self.effective_volume() > 0.0;
        if want != self.humming {
            self.humming = want;
            self.play(SoundEffect::Thrust { active: want });
        }
    }

    /// React to a simulation event
    pub fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Shoot => self.play(SoundEffect::Shoot),
            GameEvent::Explosion { magnitude, .. } => {
                self.play(SoundEffect::Explosion { magnitude })
            }
            GameEvent::Thrust { active } => {
                self.thrusting = active;
                self.sync_hum();
            }
            // Silence the engine when play stops
            GameEvent::SceneChanged { .. } | GameEvent::GameOver { .. } => {
                self.thrusting = false;
                self.sync_hum();
            }
            _ => {}
        }
    }
}
