//! Presentation layer
//!
//! The renderer reads the simulation through a borrowed [`FrameView`] and
//! turns it into a flat list of [`DrawCommand`]s in field coordinates. A
//! backend (canvas, wgpu, terminal) only has to stroke polylines, fill discs
//! and print text.

pub mod shapes;

use glam::Vec2;

use crate::Field;
use crate::settings::Settings;
use crate::sim::{Craft, GameState, Obstacle, Particle, Projectile, Scene};

/// Colors (linear RGBA)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 0.08];
    pub const CRAFT: [f32; 4] = [0.9, 0.95, 1.0, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.75, 0.78, 0.85, 1.0];
    pub const PROJECTILE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HUD: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.55];
}

/// HUD/overlay text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    Center,
}

/// One backend-agnostic draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole field
    Clear { color: [f32; 4] },
    /// Full-field translucent wash (pause/start/game over screens)
    Dim { color: [f32; 4] },
    /// Stroked closed polygon
    Polygon { points: Vec<Vec2>, color: [f32; 4] },
    /// Filled circle
    Disc {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    Text {
        text: String,
        pos: Vec2,
        anchor: TextAnchor,
        color: [f32; 4],
    },
}

/// Read-only snapshot of everything a frame needs
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub scene: Scene,
    pub craft: &'a Craft,
    pub projectiles: &'a [Projectile],
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
    pub score: u64,
    pub high_score: u64,
    pub wave: u32,
    pub lives: i32,
    pub field: Field,
}

impl<'a> FrameView<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            scene: state.scene,
            craft: &state.craft,
            projectiles: &state.projectiles,
            obstacles: &state.obstacles,
            particles: state.particles.as_slice(),
            score: state.score,
            high_score: state.high_score,
            wave: state.wave,
            lives: state.lives,
            field: state.field,
        }
    }

    /// One-line HUD summary
    pub fn hud_line(&self) -> String {
        format!(
            "Score {}  Best {}  Wave {}  Lives {}",
            self.score,
            self.high_score,
            self.wave,
            self.lives.max(0)
        )
    }

    /// Overlay title and prompt for non-playing scenes
    pub fn overlay(&self) -> Option<(&'static str, &'static str)> {
        match self.scene {
            Scene::Start => Some(("SHARDFALL", "Press Enter to start")),
            Scene::Paused => Some(("PAUSED", "Press Esc to resume")),
            Scene::GameOver => Some(("GAME OVER", "Press Enter to play again")),
            Scene::Playing => None,
        }
    }
}

/// Anything that can present a frame
pub trait Renderer {
    fn draw(&mut self, commands: &[DrawCommand]);

    /// Notify the backend of a new field size
    fn resize(&mut self, _field: Field) {}
}

/// Build the draw list for one frame
pub fn build_frame(view: &FrameView<'_>, settings: &Settings) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(
        8 + view.obstacles.len() + view.projectiles.len() + view.particles.len(),
    );
    commands.push(DrawCommand::Clear {
        color: colors::BACKGROUND,
    });

    if settings.quality.starfield_enabled() {
        commands.extend(shapes::starfield(view.field).into_iter().map(|center| {
            DrawCommand::Disc {
                center,
                radius: 1.0,
                color: colors::STAR,
            }
        }));
    }

    commands.extend(view.obstacles.iter().filter(|o| !o.dead).map(|o| {
        DrawCommand::Polygon {
            points: shapes::obstacle_outline(o),
            color: colors::OBSTACLE,
        }
    }));

    commands.extend(
        view.projectiles
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| DrawCommand::Disc {
                center: p.pos,
                radius: p.radius,
                color: colors::PROJECTILE,
            }),
    );

    if settings.particles {
        commands.extend(view.particles.iter().map(|p| {
            let [r, g, b] = p.color.rgb();
            DrawCommand::Disc {
                center: p.pos,
                radius: p.size,
                color: [r, g, b, p.alpha()],
            }
        }));
    }

    let craft_shown = view.scene != Scene::Start && view.scene != Scene::GameOver;
    if craft_shown && shapes::craft_visible(view.craft, settings.reduced_motion) {
        commands.push(DrawCommand::Polygon {
            points: shapes::craft_outline(view.craft).to_vec(),
            color: colors::CRAFT,
        });
    }

    commands.push(DrawCommand::Text {
        text: view.hud_line(),
        pos: Vec2::new(12.0, 12.0),
        anchor: TextAnchor::TopLeft,
        color: colors::HUD,
    });

    if let Some((title, prompt)) = view.overlay() {
        let center = view.field.center();
        commands.push(DrawCommand::Dim {
            color: colors::OVERLAY,
        });
        commands.push(DrawCommand::Text {
            text: title.to_string(),
            pos: center - Vec2::new(0.0, 20.0),
            anchor: TextAnchor::Center,
            color: colors::HUD,
        });
        commands.push(DrawCommand::Text {
            text: prompt.to_string(),
            pos: center + Vec2::new(0.0, 20.0),
            anchor: TextAnchor::Center,
            color: colors::HUD,
        });
    }

    commands
}

/// Renderer that logs a summary of each frame (headless runs)
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub frames: u64,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, commands: &[DrawCommand]) {
        self.frames += 1;
        log::trace!("frame {}: {} draw commands", self.frames, commands.len());
    }

    fn resize(&mut self, field: Field) {
        log::debug!("Resized to {}x{}", field.width, field.height);
    }
}
