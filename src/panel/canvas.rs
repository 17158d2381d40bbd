//! Build canvas: the sliding assembly panel and its fused handle.

use crate::composer::{Composer, CursorTransform};
use crate::draw::{Align, SpriteId};
use crate::geometry::{Circle, CombineOp, Rect, Region, RoundedRect, Vec2};
use crate::theme::Theme;
use crate::transform::Transform;

/// Layout metrics and input rates for the canvas panel.
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    /// Panel origin inside the left region
    pub origin: Vec2,
    /// Canvas width when fully open
    pub max_width: f32,
    pub height: f32,
    /// Extra interior width beyond the animated part
    pub rim: f32,
    /// Height of the top/bottom fade bands
    pub fade_len: f32,
    /// Gap between the canvas edge and the handle
    pub handle_gap: f32,
    /// Handle base bar, fused with the tip at construction
    pub handle_base: RoundedRect,
    /// Handle tip bar
    pub handle_tip: RoundedRect,
    pub handle_frame: f32,
    /// Arrow glyph origin inside the handle frame
    pub arrow_origin: Vec2,
    /// Detail button centers (enlarge, shrink, rotate left, rotate right)
    pub prop_centers: [Vec2; 4],
    pub prop_radius: f32,
    pub spawn_button: RoundedRect,
    pub spawn_frame: f32,
    /// Pending-part growth in pixels per second while a size button is held
    pub part_size_rate: f32,
    /// Valid pending-part size range, enforced by this panel
    pub part_size_range: (f32, f32),
    /// Pending-part rotation in radians per second while a turn button is held
    pub part_turn_rate: f32,
    /// Shadow offset shared with the rest of the stage
    pub shadow_offset: Vec2,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::new(300.0, 25.0),
            max_width: 1000.0,
            height: 850.0,
            rim: 50.0,
            fade_len: 20.0,
            handle_gap: 33.0,
            handle_base: RoundedRect::new(0.0, 0.0, 65.0, 850.0, 15.0),
            handle_tip: RoundedRect::new(50.0, 50.0, 50.0, 750.0, 15.0),
            handle_frame: 15.0,
            arrow_origin: Vec2::new(60.0, 400.0),
            prop_centers: [
                Vec2::new(130.0, 65.0),
                Vec2::new(220.0, 65.0),
                Vec2::new(310.0, 65.0),
                Vec2::new(400.0, 65.0),
            ],
            prop_radius: 36.0,
            spawn_button: RoundedRect::new(650.0, 700.0, 350.0, 125.0, 20.0),
            spawn_frame: 15.0,
            part_size_rate: 100.0,
            part_size_range: (40.0, 400.0),
            part_turn_rate: std::f32::consts::FRAC_PI_2,
            shadow_offset: Vec2::new(8.0, 8.0),
        }
    }
}

/// What the canvas surface reported back to the embedder this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanvasResponse {
    /// The open canvas surface itself was clicked (placement request);
    /// only reported when no button consumed the click first.
    pub canvas_clicked: bool,
    /// The spawn button was clicked; the canvas closed itself.
    pub spawn_clicked: bool,
}

/// Sliding assembly canvas with a fused open/close handle.
///
/// The animated width follows the external time-scale input each tick and
/// is clamped here; the pending part's size accumulates only from held
/// detail buttons, clamped to the configured range.
pub struct CanvasPanel {
    config: CanvasConfig,
    theme: Theme,
    /// Fused handle shape, built once and reused every tick
    handle: Region,
    width: f32,
    part_size: f32,
    part_turn: f32,
}

impl CanvasPanel {
    pub fn new(config: CanvasConfig, theme: Theme) -> Self {
        let handle = Region::combine(
            [config.handle_base.into(), config.handle_tip.into()],
            CombineOp::Union,
        );
        let part_size = config.part_size_range.0;
        Self {
            config,
            theme,
            handle,
            width: 0.0,
            part_size,
            part_turn: 0.0,
        }
    }

    /// Animated canvas width as of the last tick.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn part_size(&self) -> f32 {
        self.part_size
    }

    /// Pending-part rotation in radians, wrapped to one turn.
    pub fn part_turn(&self) -> f32 {
        self.part_turn
    }

    /// The fused handle shape used for both drawing and hit-testing.
    pub fn handle(&self) -> &Region {
        &self.handle
    }

    /// Per-tick update. `open` is shared with the game: the spawn button
    /// closes the canvas, right-click anywhere or a handle click toggles it.
    /// `ghost` is the currently selected unit, previewed under the pointer.
    pub fn update(
        &mut self,
        composer: &mut Composer,
        dt: f32,
        time_scale: f32,
        open: &mut bool,
        ghost: Option<SpriteId>,
    ) -> CanvasResponse {
        // Width follows the game's time scale: paused (0) fully open,
        // running (1) fully closed.
        self.width = ((1.0 - time_scale) * self.config.max_width).clamp(0.0, self.config.max_width);

        let mut response = CanvasResponse::default();
        let origin = self.config.origin;
        composer.with_frame(
            Transform::translate(origin.x, origin.y),
            CursorTransform::Apply,
            |c| {
                let interior = Rect::new(
                    0.0,
                    0.0,
                    self.width + self.config.rim,
                    self.config.height,
                );
                c.draw_rect(interior, self.theme.canvas);
                c.draw_gradient_rect(
                    Rect::new(0.0, 0.0, interior.width, self.config.fade_len),
                    self.theme.canvas_fade_out,
                    self.theme.canvas_fade_in,
                );
                c.draw_gradient_rect(
                    Rect::new(
                        0.0,
                        interior.height - self.config.fade_len,
                        interior.width,
                        self.config.fade_len,
                    ),
                    self.theme.canvas_fade_in,
                    self.theme.canvas_fade_out,
                );

                let mut any_input = false;
                c.with_viewport(interior, |c| {
                    self.draw_ghost(c, ghost);
                    any_input |= self.update_prop_buttons(c, dt);
                    any_input |= self.update_spawn_button(c, open, &mut response);
                    self.draw_readouts(c, interior);

                    // Lowest priority: a click on the surface itself only
                    // counts when no control consumed this tick's input.
                    let surface = c.hit(&interior);
                    if !any_input && surface.left_clicked {
                        log::debug!("canvas placement click");
                        response.canvas_clicked = true;
                    }
                });

                self.update_handle(c, open);
            },
        );
        response
    }

    fn draw_ghost(&self, composer: &mut Composer, ghost: Option<SpriteId>) {
        let Some(id) = ghost else { return };
        let Some(pos) = composer.local_pointer() else {
            return;
        };
        let size = self.part_size;
        composer.with_frame(
            Transform::translate(pos.x, pos.y).then(&Transform::rotate(self.part_turn)),
            CursorTransform::Ignore,
            |c| {
                c.draw_sprite(id, Rect::new(-size / 2.0, -size / 2.0, size, size));
            },
        );
    }

    /// Detail buttons: enlarge, shrink, rotate left, rotate right. Held
    /// buttons accumulate into the pending part each tick.
    fn update_prop_buttons(&mut self, composer: &mut Composer, dt: f32) -> bool {
        let face_offset = self.config.shadow_offset * 0.125;
        let mut any_input = false;

        for (i, center) in self.config.prop_centers.into_iter().enumerate() {
            let button = Circle::new(center, self.config.prop_radius);
            let hit = composer.hit(&button);
            if hit.left_pressed {
                any_input = true;
                let (min_size, max_size) = self.config.part_size_range;
                match i {
                    0 => {
                        self.part_size = (self.part_size + dt * self.config.part_size_rate)
                            .clamp(min_size, max_size);
                    }
                    1 => {
                        self.part_size = (self.part_size - dt * self.config.part_size_rate)
                            .clamp(min_size, max_size);
                    }
                    2 => {
                        self.part_turn = (self.part_turn - dt * self.config.part_turn_rate)
                            .rem_euclid(std::f32::consts::TAU);
                    }
                    _ => {
                        self.part_turn = (self.part_turn + dt * self.config.part_turn_rate)
                            .rem_euclid(std::f32::consts::TAU);
                    }
                }
            }

            composer.draw_circle(button, self.theme.shadow);
            let face = Circle::new(center - face_offset, self.config.prop_radius);
            composer.draw_circle(face, self.theme.main);
            let glyph = ["+", "-", "<", ">"][i];
            composer.draw_text(glyph, face.center, 32.0, self.theme.sub, Align::Center);
        }
        any_input
    }

    fn update_spawn_button(
        &self,
        composer: &mut Composer,
        open: &mut bool,
        response: &mut CanvasResponse,
    ) -> bool {
        let hit = composer.hit(&self.config.spawn_button);
        let mut any_input = false;
        if hit.left_clicked {
            log::debug!("spawn requested, closing canvas");
            *open = false;
            response.spawn_clicked = true;
            any_input = true;
        }

        let face_offset = self.config.shadow_offset * 0.25;
        composer.draw_rounded_rect(
            self.config.spawn_button.rect,
            self.theme.shadow,
            self.config.spawn_button.radius,
        );
        let face = self
            .config
            .spawn_button
            .rect
            .offset(-face_offset.x, -face_offset.y);
        composer.draw_rounded_rect_with_border(
            face,
            self.theme.accent,
            self.config.spawn_button.radius,
            self.config.spawn_frame,
            self.theme.sub,
        );
        composer.draw_text(
            "Summon",
            face.center(),
            40.0,
            self.theme.sub,
            Align::Center,
        );
        any_input
    }

    fn draw_readouts(&self, composer: &mut Composer, interior: Rect) {
        composer.draw_text(
            format!("part size {:.0}", self.part_size),
            Vec2::new(680.0, 25.0),
            24.0,
            self.theme.sub,
            Align::TopLeft,
        );
        composer.draw_text(
            format!("part angle {:.0}", self.part_turn.to_degrees()),
            Vec2::new(680.0, 75.0),
            24.0,
            self.theme.sub,
            Align::TopLeft,
        );
        composer.draw_text(
            "Cost exceeded",
            interior.center(),
            48.0,
            self.theme.enemy.with_alpha(0.75),
            Align::Center,
        );
    }

    /// Handle bar past the canvas edge: hit-tested as one fused shape,
    /// then drawn reflecting the (possibly just toggled) open flag.
    fn update_handle(&self, composer: &mut Composer, open: &mut bool) {
        composer.with_frame(
            Transform::translate(self.width + self.config.handle_gap, 0.0),
            CursorTransform::Apply,
            |c| {
                let toggled = c.pointer().just_pressed(crate::pointer::PointerButtons::RIGHT)
                    || c.hit(&self.handle).left_clicked;
                if toggled {
                    *open = !*open;
                    log::debug!("canvas {}", if *open { "opened" } else { "closed" });
                }

                let offset = self.config.shadow_offset;
                c.with_frame(
                    Transform::translate(offset.x, offset.y),
                    CursorTransform::Ignore,
                    |c| c.draw_region(&self.handle, self.theme.shadow),
                );
                c.draw_region(&self.handle, self.theme.base);
                c.draw_region_frame(&self.handle, self.config.handle_frame, self.theme.sub);

                self.draw_arrows(c, *open);
            },
        );
    }

    fn draw_arrows(&self, composer: &mut Composer, open: bool) {
        let origin = self.config.arrow_origin;
        composer.with_frame(
            Transform::translate(origin.x, origin.y),
            CursorTransform::Apply,
            |c| {
                // Vertical trim above and below the arrows
                c.draw_line(
                    Vec2::new(0.0, 120.0),
                    Vec2::new(0.0, 300.0),
                    10.0,
                    self.theme.shadow,
                    true,
                );
                c.draw_line(
                    Vec2::new(0.0, -120.0),
                    Vec2::new(0.0, -300.0),
                    10.0,
                    self.theme.shadow,
                    true,
                );

                // Both chevron pairs muted, then the active pair on top
                let chevrons = [
                    // pointing left (close direction)
                    [
                        (Vec2::new(-15.0, 60.0), Vec2::new(15.0, 0.0)),
                        (Vec2::new(-15.0, -60.0), Vec2::new(15.0, 0.0)),
                    ],
                    // pointing right (open direction)
                    [
                        (Vec2::new(-15.0, 0.0), Vec2::new(15.0, 60.0)),
                        (Vec2::new(-15.0, 0.0), Vec2::new(15.0, -60.0)),
                    ],
                ];
                for pair in &chevrons {
                    for (from, to) in pair {
                        c.draw_line(*from, *to, 10.0, self.theme.main, true);
                    }
                }
                let active = if open { &chevrons[1] } else { &chevrons[0] };
                for (from, to) in active {
                    c.draw_line(*from, *to, 10.0, self.theme.accent, true);
                }
            },
        );
    }
}
