//! Unit palette: the selection-list panel on the left side of the screen.

use crate::composer::{Composer, CursorTransform};
use crate::draw::{Align, Color, Shadow};
use crate::game::InventoryEntry;
use crate::geometry::{CombineOp, Rect, Region, RoundedRect, Size, Vec2};
use crate::pointer::HitResult;
use crate::theme::Theme;
use crate::transform::Transform;

/// Layout metrics for the palette panel.
#[derive(Debug, Clone)]
pub struct PaletteConfig {
    /// Backdrop size
    pub size: Size,
    /// Backdrop corner radius
    pub corner_radius: f32,
    /// Backdrop border width
    pub frame_width: f32,
    /// Resource readout plate
    pub cost_plate: RoundedRect,
    /// Resource readout plate border width
    pub cost_plate_frame: f32,
    /// Square unit buttons, laid out in a grid
    pub button_size: f32,
    pub button_corner_radius: f32,
    pub button_frame: f32,
    pub grid_origin: Vec2,
    /// Horizontal and vertical step between grid slots
    pub grid_step: Vec2,
    pub columns: usize,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            size: Size::new(350.0, 900.0),
            corner_radius: 50.0,
            frame_width: 15.0,
            cost_plate: RoundedRect::new(30.0, 800.0, 290.0, 75.0, 20.0),
            cost_plate_frame: 10.0,
            button_size: 140.0,
            button_corner_radius: 20.0,
            button_frame: 10.0,
            grid_origin: Vec2::new(25.0, 30.0),
            grid_step: Vec2::new(160.0, 155.0),
            columns: 2,
        }
    }
}

/// Selection-list panel over the unit inventory.
///
/// Selection only moves when a clicked item passes the eligibility
/// predicate; clicking an ineligible item neither selects it nor clears a
/// prior selection.
pub struct PalettePanel {
    config: PaletteConfig,
    theme: Theme,
    selected: Option<usize>,
}

impl PalettePanel {
    pub fn new(config: PaletteConfig, theme: Theme) -> Self {
        Self {
            config,
            theme,
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn set_selected(&mut self, selected: Option<usize>) {
        self.selected = selected;
    }

    /// Backdrop rectangle in panel-local coordinates.
    fn backdrop(&self) -> Rect {
        Rect::from_size(self.config.size)
    }

    /// Grid slot rectangle for item `index`, in panel-local coordinates.
    pub fn button_rect(&self, index: usize) -> RoundedRect {
        let col = (index % self.config.columns) as f32;
        let row = (index / self.config.columns) as f32;
        RoundedRect::new(
            self.config.grid_origin.x + col * self.config.grid_step.x,
            self.config.grid_origin.y + row * self.config.grid_step.y,
            self.config.button_size,
            self.config.button_size,
            self.config.button_corner_radius,
        )
    }

    /// Backdrop shadow, drawn before the canvas panel slides out from
    /// behind the palette. The offset frame moves rendering only.
    pub fn shadow(&self, composer: &mut Composer, shadow_offset: Vec2) {
        composer.with_frame(
            Transform::translate(shadow_offset.x, shadow_offset.y),
            CursorTransform::Ignore,
            |c| {
                c.draw_rounded_rect(
                    Rect::from_size(self.config.size),
                    self.theme.shadow,
                    self.config.corner_radius,
                );
            },
        );
    }

    /// Per-tick update: backdrop, resource readout, and one hit-test →
    /// state-transition → draw pass per unit button.
    pub fn update<F>(
        &mut self,
        composer: &mut Composer,
        items: &[InventoryEntry],
        eligible: F,
        resources: f32,
    ) where
        F: Fn(&InventoryEntry) -> bool,
    {
        if self.selected.is_some_and(|s| s >= items.len()) {
            self.selected = None;
        }

        // Backdrop and resource plate
        composer.draw_rounded_rect_with_border(
            self.backdrop(),
            self.theme.base,
            self.config.corner_radius,
            self.config.frame_width,
            self.theme.sub,
        );
        composer.draw_rounded_rect_with_border(
            self.config.cost_plate.rect,
            self.theme.base,
            self.config.cost_plate.radius,
            self.config.cost_plate_frame,
            self.theme.sub,
        );
        composer.draw_text(
            format!("{:09}", resources.max(0.0) as i64),
            self.config.cost_plate.center(),
            40.0,
            self.theme.sub,
            Align::Center,
        );

        for (i, entry) in items.iter().enumerate() {
            let slot = self.button_rect(i);
            composer.with_frame(
                Transform::translate(slot.rect.x, slot.rect.y),
                CursorTransform::Apply,
                |c| {
                    let local = RoundedRect::new(
                        0.0,
                        0.0,
                        slot.rect.width,
                        slot.rect.height,
                        slot.radius,
                    );
                    let hit = c.hit(&local);
                    if hit.left_clicked {
                        if eligible(entry) {
                            log::debug!("palette slot {i} selected");
                            self.selected = Some(i);
                        } else {
                            // Ineligible click: keep the prior selection
                            log::trace!("palette slot {i} ineligible, selection unchanged");
                        }
                    }
                    self.draw_button(c, local, entry, self.selected == Some(i), hit, resources);
                },
            );
        }
    }

    /// Draw one unit button in its own frame, reflecting this tick's state.
    fn draw_button(
        &self,
        composer: &mut Composer,
        button: RoundedRect,
        entry: &InventoryEntry,
        selected: bool,
        hit: HitResult,
        resources: f32,
    ) {
        let icon_rect = button.rect.inset(10.0);

        // Unavailable units get the muted presentation and nothing else
        if entry.spawn_cost < 0.0 {
            composer.draw_rounded_rect_with_border(
                button.rect,
                self.theme.base,
                button.radius,
                self.config.button_frame,
                self.theme.sub,
            );
            composer.draw_sprite(entry.sprite, icon_rect);
            return;
        }

        let fill = if selected {
            self.theme.accent
        } else if hit.hover {
            self.theme.base
        } else {
            self.theme.main
        };
        composer.draw_rounded_rect(button.rect, fill, button.radius);

        // Progress toward the next affordable unit, clipped to the rounded
        // outline so the fill never escapes the corners
        if entry.spawn_cost > 0.0 {
            let ratio = (resources.rem_euclid(entry.spawn_cost)) / entry.spawn_cost;
            let fill_height = button.rect.height * ratio;
            let fill_rect = Rect::new(
                button.rect.x,
                button.rect.y + (button.rect.height - fill_height),
                button.rect.width,
                fill_height,
            );
            let cutout = Region::combine(
                [button.into(), fill_rect.into()],
                CombineOp::Intersection,
            );
            composer.draw_region(&cutout, Color::WHITE.with_alpha(0.2));
        } else {
            log::warn!("unit with non-positive spawn cost {}", entry.spawn_cost);
        }

        composer.draw_border_frame(
            button.rect,
            button.radius,
            self.config.button_frame,
            self.theme.sub,
        );
        composer.draw_sprite(entry.sprite, icon_rect);

        composer.draw_text(
            format!("{:.0}", entry.spawn_cost),
            Vec2::new(button.rect.center().x, button.rect.bottom()),
            48.0,
            self.theme.sub,
            Align::BottomCenter,
        );
        if entry.spawn_cost > 0.0 {
            let placeable = (resources / entry.spawn_cost).floor() as i64;
            composer.draw_text(
                format!("x{placeable}"),
                Vec2::new(button.rect.right() - 10.0, button.rect.y + 3.0),
                32.0,
                self.theme.sub,
                Align::TopRight,
            );
        }

        if hit.hover {
            composer.draw_rounded_rect_with_shadow(
                button.rect,
                Color::TRANSPARENT,
                button.radius,
                Shadow::new(Vec2::new(0.0, 2.0), 8.0, Color::BLACK.with_alpha(0.15)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::SpriteId;
    use crate::pointer::PointerButtons;

    fn items() -> Vec<InventoryEntry> {
        (0..4)
            .map(|i| InventoryEntry {
                sprite: SpriteId(i),
                spawn_cost: 10.0,
            })
            .collect()
    }

    fn click_at(composer: &mut Composer, pos: Vec2) {
        composer.begin_tick(Some(pos), PointerButtons::empty());
        composer.begin_tick(Some(pos), PointerButtons::LEFT);
    }

    #[test]
    fn test_click_selects_eligible_item() {
        let mut panel = PalettePanel::new(PaletteConfig::default(), Theme::default());
        let mut composer = Composer::new();

        let center = panel.button_rect(1).center();
        click_at(&mut composer, center);
        panel.update(&mut composer, &items(), |e| e.spawn_cost >= 0.0, 25.0);

        assert_eq!(panel.selected(), Some(1));
    }

    #[test]
    fn test_ineligible_click_keeps_selection() {
        let mut panel = PalettePanel::new(PaletteConfig::default(), Theme::default());
        let mut composer = Composer::new();
        panel.set_selected(Some(2));

        let center = panel.button_rect(0).center();
        click_at(&mut composer, center);
        panel.update(&mut composer, &items(), |_| false, 25.0);

        assert_eq!(panel.selected(), Some(2));
    }

    #[test]
    fn test_selection_survives_miss_click() {
        let mut panel = PalettePanel::new(PaletteConfig::default(), Theme::default());
        let mut composer = Composer::new();
        panel.set_selected(Some(1));

        // Click the backdrop between buttons
        click_at(&mut composer, Vec2::new(175.0, 780.0));
        panel.update(&mut composer, &items(), |e| e.spawn_cost >= 0.0, 25.0);

        assert_eq!(panel.selected(), Some(1));
    }

    #[test]
    fn test_selection_cleared_when_items_shrink() {
        let mut panel = PalettePanel::new(PaletteConfig::default(), Theme::default());
        let mut composer = Composer::new();
        panel.set_selected(Some(3));

        composer.begin_tick(None, PointerButtons::empty());
        panel.update(&mut composer, &items()[..2], |e| e.spawn_cost >= 0.0, 25.0);

        assert_eq!(panel.selected(), None);
    }

    #[test]
    fn test_cost_fill_cutout_dimensions() {
        // resources 25, cost 10 -> ratio 0.5, fill anchored at the bottom
        let panel = PalettePanel::new(PaletteConfig::default(), Theme::default());
        let button = panel.button_rect(0);

        let ratio = 25.0_f32.rem_euclid(10.0) / 10.0;
        assert!((ratio - 0.5).abs() < 1e-6);

        let fill_height = button.rect.height * ratio;
        let fill_rect = Rect::new(
            button.rect.x,
            button.rect.y + (button.rect.height - fill_height),
            button.rect.width,
            fill_height,
        );
        assert_eq!(fill_rect.bottom(), button.rect.bottom());
        assert_eq!(fill_rect.height, button.rect.height / 2.0);

        let cutout = Region::combine(
            [button.into(), fill_rect.into()],
            CombineOp::Intersection,
        );
        assert!(!cutout.is_empty());
        // Inside the fill band
        assert!(cutout.contains(Vec2::new(
            button.rect.center().x,
            button.rect.bottom() - 10.0
        )));
        // Above the fill line
        assert!(!cutout.contains(Vec2::new(
            button.rect.center().x,
            button.rect.y + 10.0
        )));
        // Fill respects the rounded corner
        assert!(!cutout.contains(Vec2::new(
            button.rect.x + 1.0,
            button.rect.bottom() - 1.0
        )));
    }
}
