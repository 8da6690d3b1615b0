//! Frame driver
//!
//! `Game` owns the session and its collaborators and runs one host frame at a
//! time: clamp the delta, apply one-shot actions, tick, then hand the frame's
//! events to audio and persistence.

use crate::audio::{AudioManager, LogBackend, SoundBackend};
use crate::persistence::{HighScoreStore, MemoryStore};
use crate::platform::{Action, InputSource};
use crate::renderer::{DrawCommand, FrameView, build_frame};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState, Scene};
use crate::{Field, clamp_frame_dt};

/// A running game session with its collaborators
pub struct Game<S: HighScoreStore = MemoryStore, B: SoundBackend = LogBackend> {
    state: GameState,
    audio: AudioManager<B>,
    store: S,
    settings: Settings,
}

impl<S: HighScoreStore, B: SoundBackend> Game<S, B> {
    /// Create a game on the start screen, seeded with the stored high score
    pub fn new(store: S, backend: B, settings: Settings, seed: u64, field: Field) -> Self {
        let high_score = store.load_high_score();
        let state =
            GameState::with_particle_capacity(seed, high_score, field, settings.max_particles());
        let audio = AudioManager::from_settings(backend, &settings);
        log::info!(
            "Game created (seed {}, high score {}, quality {})",
            seed,
            high_score,
            settings.quality.as_str()
        );
        Self {
            state,
            audio,
            store,
            settings,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scene(&self) -> Scene {
        self.state.scene
    }

    pub fn audio(&self) -> &AudioManager<B> {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Borrowed view for the presentation layer
    pub fn view(&self) -> FrameView<'_> {
        FrameView::from_state(&self.state)
    }

    /// Draw list for the current state
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        build_frame(&self.view(), &self.settings)
    }

    /// Run one host frame and return the events it produced
    pub fn frame<I: InputSource + ?Sized>(
        &mut self,
        input: &mut I,
        raw_dt: f32,
        field: Field,
    ) -> Vec<GameEvent> {
        let dt = clamp_frame_dt(raw_dt);

        if input.consume_edge(Action::Start) && sim::start(&mut self.state, field) {
            self.audio.resume();
        }
        if input.consume_edge(Action::Pause) {
            sim::toggle_pause(&mut self.state);
        }
        if input.consume_edge(Action::Mute) {
            self.audio.toggle_mute();
        }

        if self.state.scene == Scene::Playing {
            let tick_input = input.tick_input();
            sim::tick(&mut self.state, &tick_input, dt, field);
        } else {
            self.state.field = field;
        }

        let events = self.state.drain_events();
        self.dispatch(&events);
        events
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        let mut best = None;
        for event in events {
            self.audio.on_event(event);
            match *event {
                GameEvent::HighScore { score } => best = Some(score),
                GameEvent::WaveStarted { wave, obstacles } => {
                    log::debug!("Wave {} ({} obstacles)", wave, obstacles);
                }
                GameEvent::GameOver { score, wave } => {
                    log::info!("Game over: score {} on wave {}", score, wave);
                }
                _ => {}
            }
        }
        // One write per frame, however many times the score moved
        if let Some(score) = best {
            self.store.save_high_score(score);
        }
    }
}
