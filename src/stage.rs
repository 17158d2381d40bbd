//! Per-tick orchestration of the build-phase screen.
//!
//! One pass per rendered frame, strictly hierarchical and single-threaded:
//! advance the time-driven blend, push the outer frame, then visit the left
//! region, the right region, and the overlay region in that fixed order.
//! Later regions take interactive priority on overlapping screen space
//! simply by being processed with the current tick's input after the
//! earlier ones have drawn.

use crate::animation::step_toward;
use crate::composer::{Composer, CursorTransform};
use crate::game::{GamePhase, GameQuery, SceneId};
use crate::geometry::{Size, Vec2};
use crate::panel::{
    CanvasConfig, CanvasPanel, ChartConfig, ChartPanel, MinimapConfig, MinimapPanel,
    PaletteConfig, PalettePanel, ResultsPanel,
};
use crate::theme::Theme;
use crate::transform::Transform;

/// Screen layout for the stage.
#[derive(Debug, Clone)]
pub struct StageConfig {
    pub screen: Size,
    /// Origin of the left region (palette and canvas)
    pub left_origin: Vec2,
    /// Right region inset from the right screen edge, and its y origin
    pub right_inset: f32,
    pub right_top: f32,
    /// Shadow offset shared across panels
    pub shadow_offset: Vec2,
    /// Overlay blend approach rate, per second
    pub blend_rate: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            screen: Size::new(1920.0, 1080.0),
            left_origin: Vec2::new(80.0, 100.0),
            right_inset: 480.0,
            right_top: 30.0,
            shadow_offset: Vec2::new(8.0, 8.0),
            blend_rate: 8.0,
        }
    }
}

/// External per-tick inputs, read at the start of the tick and not assumed
/// stable into the next one.
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Elapsed time since the previous tick, in seconds
    pub dt: f32,
    /// Game time scale; the canvas width is driven by it
    pub time_scale: f32,
    /// Battlefield scroll offset
    pub scroll: Vec2,
    /// Current resource total
    pub resources: f32,
}

/// UI actions the embedder may want to act on after the tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageResponse {
    /// The open canvas surface was clicked (placement request)
    pub canvas_clicked: bool,
    /// The spawn button was clicked
    pub spawn_clicked: bool,
}

/// The build-phase screen: owns the panel tree and walks it once per tick.
pub struct Stage {
    config: StageConfig,
    /// Blend toward the end-of-game overlay: 0 during play, 1 otherwise
    blend: f32,
    palette: PalettePanel,
    canvas: CanvasPanel,
    chart: ChartPanel,
    minimap: MinimapPanel,
    results: ResultsPanel,
}

impl Stage {
    pub fn new(config: StageConfig, theme: Theme) -> Self {
        let canvas_config = CanvasConfig {
            shadow_offset: config.shadow_offset,
            ..CanvasConfig::default()
        };
        Self {
            palette: PalettePanel::new(PaletteConfig::default(), theme.clone()),
            canvas: CanvasPanel::new(canvas_config, theme.clone()),
            chart: ChartPanel::new(
                ChartConfig::default(),
                theme.clone(),
                ChartPanel::default_axes(),
            ),
            minimap: MinimapPanel::new(MinimapConfig::default(), theme.clone()),
            results: ResultsPanel::new(theme, config.screen),
            config,
            blend: 0.0,
        }
    }

    /// Current overlay blend factor.
    pub fn blend(&self) -> f32 {
        self.blend
    }

    pub fn palette(&self) -> &PalettePanel {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut PalettePanel {
        &mut self.palette
    }

    pub fn canvas(&self) -> &CanvasPanel {
        &self.canvas
    }

    pub fn results(&self) -> &ResultsPanel {
        &self.results
    }

    pub fn chart_mut(&mut self) -> &mut ChartPanel {
        &mut self.chart
    }

    /// Run one tick: update panel state from this tick's input and record
    /// the frame's draw primitives into `composer`.
    ///
    /// `canvas_open` is shared with the game loop, which uses it to drive
    /// the time scale. `on_change_scene` fires when a UI action requests a
    /// scene transition.
    pub fn update<G: GameQuery>(
        &mut self,
        composer: &mut Composer,
        game: &G,
        input: TickInput,
        canvas_open: &mut bool,
        mut on_change_scene: impl FnMut(SceneId),
    ) -> StageResponse {
        let target = if game.phase() == GamePhase::Playing {
            0.0
        } else {
            1.0
        };
        self.blend = step_toward(&self.blend, &target, input.dt * self.config.blend_rate);

        let screen_height = self.config.screen.height;
        let mut response = StageResponse::default();

        // Everything scrolls down together as the overlay blends in
        composer.with_frame(
            Transform::translate(0.0, self.blend * screen_height),
            CursorTransform::Apply,
            |c| {
                let left = self.config.left_origin;
                c.with_frame(
                    Transform::translate(left.x, left.y),
                    CursorTransform::Apply,
                    |c| {
                        self.palette.shadow(c, self.config.shadow_offset);

                        // The canvas slides out from behind the palette, so
                        // it draws first and the palette covers it
                        let ghost = self
                            .palette
                            .selected()
                            .and_then(|i| game.inventory().get(i))
                            .map(|entry| entry.sprite);
                        let canvas_response = self.canvas.update(
                            c,
                            input.dt,
                            input.time_scale,
                            canvas_open,
                            ghost,
                        );
                        response.canvas_clicked = canvas_response.canvas_clicked;
                        response.spawn_clicked = canvas_response.spawn_clicked;

                        self.palette.update(
                            c,
                            game.inventory(),
                            |entry| entry.spawn_cost >= 0.0,
                            input.resources,
                        );
                    },
                );

                let right = Vec2::new(
                    self.config.screen.width - self.config.right_inset,
                    self.config.right_top,
                );
                c.with_frame(
                    Transform::translate(right.x, right.y),
                    CursorTransform::Apply,
                    |c| {
                        self.chart.update(c);
                        self.minimap
                            .update(c, input.scroll, game.scene_height(), screen_height);
                    },
                );

                // Overlay region, one screen above the play view
                c.with_frame(
                    Transform::translate(0.0, -screen_height),
                    CursorTransform::Apply,
                    |c| {
                        if self.results.update(c, game.phase()).back_clicked {
                            log::debug!("returning to title");
                            on_change_scene(SceneId::Title);
                        }
                    },
                );
            },
        );

        response
    }
}
