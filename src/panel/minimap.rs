//! Minimap: battlefield overview with a scroll-position indicator.
//!
//! The view indicator is a pure projection of this tick's scroll input; the
//! panel keeps no scroll state of its own. The frame ring, inner shadow
//! ring, and base-marker outlines are boolean-combination geometry computed
//! once at construction and reused every tick.

use crate::composer::{Composer, CursorTransform};
use crate::geometry::{CombineOp, Polygon, Rect, Region, RoundedRect, Size, Vec2};
use crate::theme::Theme;
use crate::transform::Transform;

/// Layout metrics for the minimap panel.
#[derive(Debug, Clone)]
pub struct MinimapConfig {
    /// Panel origin inside the right region
    pub origin: Vec2,
    /// Scrollable map window
    pub main_size: Size,
    pub main_corner_radius: f32,
    /// Distance from the panel edge to the map window
    pub frame_size: f32,
    /// Outer border width
    pub out_frame_size: f32,
    /// Outer border corner radius
    pub frame_corner_radius: f32,
    /// Inner shadow band width
    pub inner_shadow: f32,
    /// View indicator height
    pub indicator_height: f32,
    pub indicator_margin: f32,
    /// Screen fraction mixed into the scroll ratio as a fixed base offset
    pub scroll_base_factor: f32,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::new(100.0, 430.0),
            main_size: Size::new(280.0, 380.0),
            main_corner_radius: 25.0,
            frame_size: 40.0,
            out_frame_size: 15.0,
            frame_corner_radius: 30.0,
            inner_shadow: 12.0,
            indicator_height: 120.0,
            indicator_margin: 15.0,
            scroll_base_factor: 0.05,
        }
    }
}

/// Scroll-position overview panel. Draw-only: it consumes the external
/// scroll signal and extents, and never mutates state across ticks.
pub struct MinimapPanel {
    config: MinimapConfig,
    theme: Theme,
    /// Panel frame with the map window cut out
    frame_ring: Region,
    /// Inner shadow band around the map window
    shadow_ring: Region,
    /// Enemy base outline, clipped to the map window (centered coords)
    enemy_base: Region,
    /// Allied base outline, clipped to the map window (centered coords)
    ally_base: Region,
}

impl MinimapPanel {
    pub fn new(config: MinimapConfig, theme: Theme) -> Self {
        let main_rect = Rect::new(
            config.frame_size,
            config.frame_size,
            config.main_size.width,
            config.main_size.height,
        );
        let frame_rect = Rect::new(
            config.out_frame_size,
            config.out_frame_size,
            config.main_size.width + (config.frame_size - config.out_frame_size) * 2.0,
            config.main_size.height + (config.frame_size - config.out_frame_size) * 2.0,
        );

        let frame_ring = Region::ring(
            Polygon::from_rounded_rect(frame_rect, config.frame_corner_radius),
            Polygon::from_rounded_rect(main_rect, config.main_corner_radius),
        );
        let shadow_ring = Region::ring(
            Polygon::from_rounded_rect(main_rect, config.main_corner_radius),
            Polygon::from_rounded_rect(
                main_rect.inset(config.inner_shadow),
                (config.main_corner_radius - config.inner_shadow).max(0.0),
            ),
        );

        // Base markers live in the map-centered frame; clip them to the
        // window so they never poke past the rounded corners.
        let half_w = config.main_size.width / 2.0;
        let half_h = config.main_size.height / 2.0;
        let window: Region = RoundedRect::new(
            -half_w,
            -half_h,
            config.main_size.width,
            config.main_size.height,
            config.main_corner_radius,
        )
        .into();

        let enemy_line_y = -half_h + 115.0;
        let enemy_base = Region::combine(
            [Rect::new(-30.0, enemy_line_y - 70.0, 60.0, 70.0).into(), window.clone()],
            CombineOp::Intersection,
        );
        let ally_line_y = half_h - 20.0;
        let ally_base = Region::combine(
            [Rect::new(-35.0, ally_line_y - 40.0, 70.0, 40.0).into(), window],
            CombineOp::Intersection,
        );

        Self {
            config,
            theme,
            frame_ring,
            shadow_ring,
            enemy_base,
            ally_base,
        }
    }

    /// Fraction of the battlefield the current scroll looks at.
    ///
    /// Mixes the external scroll offset with a fixed screen-fraction base:
    /// `(-scroll_y + base) / (base + scene_height)`. The formula is kept
    /// exactly as the game defined it. Returns `None` when the denominator
    /// is not strictly positive.
    pub fn view_ratio(&self, scroll_y: f32, scene_height: f32, screen_height: f32) -> Option<f32> {
        let base = screen_height * self.config.scroll_base_factor;
        let denom = base + scene_height;
        if denom <= 0.0 {
            log::warn!("non-positive minimap extent {denom}, skipping indicator");
            return None;
        }
        Some((-scroll_y + base) / denom)
    }

    /// Per-tick draw pass.
    pub fn update(
        &self,
        composer: &mut Composer,
        scroll: Vec2,
        scene_height: f32,
        screen_height: f32,
    ) {
        let cfg = &self.config;
        composer.with_frame(
            Transform::translate(cfg.origin.x, cfg.origin.y),
            CursorTransform::Apply,
            |c| {
                let main_rect = Rect::new(
                    cfg.frame_size,
                    cfg.frame_size,
                    cfg.main_size.width,
                    cfg.main_size.height,
                );
                let frame_rect = Rect::new(
                    cfg.out_frame_size,
                    cfg.out_frame_size,
                    cfg.main_size.width + (cfg.frame_size - cfg.out_frame_size) * 2.0,
                    cfg.main_size.height + (cfg.frame_size - cfg.out_frame_size) * 2.0,
                );

                c.draw_border_frame(
                    frame_rect,
                    cfg.frame_corner_radius,
                    cfg.out_frame_size,
                    self.theme.sub,
                );
                c.draw_region(&self.frame_ring, self.theme.base);
                c.draw_rounded_rect(main_rect, self.theme.canvas, cfg.main_corner_radius);
                c.draw_region(&self.shadow_ring, self.theme.shadow);

                // Everything else is positioned from the window center
                let center = main_rect.center();
                c.with_frame(
                    Transform::translate(center.x, center.y),
                    CursorTransform::Apply,
                    |c| self.draw_map(c, scroll, scene_height, screen_height),
                );
            },
        );
    }

    fn draw_map(
        &self,
        composer: &mut Composer,
        scroll: Vec2,
        scene_height: f32,
        screen_height: f32,
    ) {
        let cfg = &self.config;
        let half_w = cfg.main_size.width / 2.0;
        let half_h = cfg.main_size.height / 2.0;

        // Front lines
        let line_x = half_w - 8.0;
        let ally_y = half_h - 20.0;
        let enemy_y = -half_h + 115.0;
        composer.draw_line(
            Vec2::new(-line_x, ally_y),
            Vec2::new(line_x, ally_y),
            5.0,
            self.theme.ally,
            false,
        );
        composer.draw_line(
            Vec2::new(-line_x, enemy_y),
            Vec2::new(line_x, enemy_y),
            5.0,
            self.theme.enemy,
            false,
        );

        // Base markers
        composer.draw_region_frame(&self.enemy_base, 5.0, self.theme.enemy);
        composer.draw_circle_frame(
            crate::geometry::Circle::new(Vec2::new(8.0, enemy_y - 70.0), 5.0),
            5.0,
            self.theme.enemy,
        );
        composer.draw_circle_frame(
            crate::geometry::Circle::new(Vec2::new(15.0, enemy_y - 90.0), 7.0),
            5.0,
            self.theme.enemy,
        );
        composer.draw_region_frame(&self.ally_base, 5.0, self.theme.ally);

        // Top fade into the window
        composer.draw_gradient_rect(
            Rect::new(
                -half_w + cfg.main_corner_radius,
                -half_h,
                cfg.main_size.width - cfg.main_corner_radius * 2.0,
                cfg.main_corner_radius,
            ),
            self.theme.canvas_fade_out,
            self.theme.canvas_fade_in,
        );

        // View indicator, proportionally placed along the track
        let Some(ratio) = self.view_ratio(scroll.y, scene_height, screen_height) else {
            return;
        };
        let indicator = Size::new(
            cfg.main_size.width - cfg.indicator_margin,
            cfg.indicator_height,
        );
        let travel = cfg.main_size.height - indicator.height - cfg.indicator_margin;
        composer.with_frame(
            Transform::translate(0.0, travel * (ratio - 0.5)),
            CursorTransform::Apply,
            |c| {
                c.draw_border_frame(
                    Rect::new(
                        -indicator.width / 2.0,
                        -indicator.height / 2.0,
                        indicator.width,
                        indicator.height,
                    ),
                    cfg.main_corner_radius - 4.0,
                    5.0,
                    self.theme.accent,
                );
                c.draw_line(
                    Vec2::new(-10.0, 0.0),
                    Vec2::new(10.0, 0.0),
                    5.0,
                    self.theme.accent,
                    false,
                );
                c.draw_line(
                    Vec2::new(0.0, -10.0),
                    Vec2::new(0.0, 10.0),
                    5.0,
                    self.theme.accent,
                    false,
                );
            },
        );
    }
}
