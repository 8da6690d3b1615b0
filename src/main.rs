//! Shardfall entry point
//!
//! The native binary runs a headless session driven by a simple autopilot and
//! logs the HUD once per simulated second. Usage:
//!
//! ```text
//! RUST_LOG=info shardfall [seconds] [seed]
//! ```
//!
//! `SHARDFALL_DATA_DIR` picks where settings and the high score live;
//! `SHARDFALL_QUALITY` (low/medium/high) overrides the saved preset.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use shardfall::audio::LogBackend;
    use shardfall::persistence::JsonFileStore;
    use shardfall::platform::{Action, InputSource};
    use shardfall::renderer::{LogRenderer, Renderer};
    use shardfall::sim::{GameState, Scene};
    use shardfall::{Field, Game, Settings, normalize_angle};

    const FIELD: Field = Field::new(960.0, 640.0);
    const FRAME_DT: f32 = 1.0 / 60.0;
    const DEFAULT_SECONDS: u32 = 120;

    /// Turns toward the nearest rock and keeps the trigger down
    #[derive(Debug, Default)]
    struct Autopilot {
        left: bool,
        right: bool,
        thrust: bool,
        start: bool,
        frame: u64,
    }

    impl Autopilot {
        fn plan(&mut self, state: &GameState) {
            self.frame += 1;
            self.start = matches!(state.scene, Scene::Start | Scene::GameOver);

            let craft = &state.craft;
            let target = state
                .obstacles
                .iter()
                .filter(|o| !o.dead)
                .min_by(|a, b| {
                    a.pos
                        .distance_squared(craft.pos)
                        .total_cmp(&b.pos.distance_squared(craft.pos))
                });

            let Some(target) = target else {
                self.left = false;
                self.right = false;
                self.thrust = false;
                return;
            };

            let to_target = target.pos - craft.pos;
            let wanted = normalize_angle(to_target.y.atan2(to_target.x));
            let mut diff = wanted - craft.angle;
            if diff > std::f32::consts::PI {
                diff -= std::f32::consts::TAU;
            } else if diff < -std::f32::consts::PI {
                diff += std::f32::consts::TAU;
            }
            self.left = diff < -0.05;
            self.right = diff > 0.05;
            // Short bursts to keep drifting
            self.thrust = self.frame % 180 < 20 && to_target.length() > 200.0;
        }
    }

    impl InputSource for Autopilot {
        fn is_held(&self, action: Action) -> bool {
            match action {
                Action::Left => self.left,
                Action::Right => self.right,
                Action::Thrust => self.thrust,
                Action::Shoot => true,
                Action::Pause | Action::Start | Action::Mute => false,
            }
        }

        fn consume_edge(&mut self, action: Action) -> bool {
            match action {
                Action::Start => std::mem::take(&mut self.start),
                _ => false,
            }
        }
    }

    fn data_dir() -> PathBuf {
        std::env::var_os("SHARDFALL_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn arg<T: std::str::FromStr>(index: usize) -> Option<T> {
        std::env::args().nth(index).and_then(|a| a.parse().ok())
    }

    pub fn run() {
        let seconds = arg::<u32>(1).unwrap_or(DEFAULT_SECONDS);
        let seed = arg::<u64>(2).unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        let dir = data_dir();
        let quality = std::env::var("SHARDFALL_QUALITY").ok();
        let settings = Settings::load_or_default(&dir.join("shardfall-settings.json"))
            .with_quality_override(quality.as_deref());
        let store = JsonFileStore::new(dir.join("shardfall-highscore.json"));

        let mut game = Game::new(store, LogBackend, settings, seed, FIELD);
        let mut pilot = Autopilot::default();
        let mut renderer = LogRenderer::default();
        renderer.resize(FIELD);

        let frames_per_second = (1.0 / FRAME_DT).round() as u64;
        let total_frames = u64::from(seconds) * frames_per_second;
        let mut runs = 0u32;

        for frame in 0..total_frames {
            pilot.plan(game.state());
            if pilot.start {
                runs += 1;
            }
            game.frame(&mut pilot, FRAME_DT, FIELD);
            renderer.draw(&game.draw_list());

            if frame % frames_per_second == 0 {
                log::info!("[{:>4}s] {}", frame / frames_per_second, game.view().hud_line());
            }
        }

        let state = game.state();
        log::info!(
            "Finished after {} runs: score {}, best {}, {} frames drawn",
            runs,
            state.score,
            state.high_score,
            renderer.frames
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shardfall (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // A browser host drives `shardfall::Game` directly
}
