//! End-of-game overlay: dimmed screen, verdict headline, back-to-title.
//!
//! Drawn one screen above the play view; the orchestrator's blend factor
//! scrolls it into view when the game leaves the `Playing` phase.

use crate::composer::Composer;
use crate::draw::Align;
use crate::game::GamePhase;
use crate::geometry::{Rect, RoundedRect, Size, Vec2};
use crate::theme::Theme;

/// What the overlay reported back this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultsResponse {
    /// The back-to-title button was clicked.
    pub back_clicked: bool,
}

/// End-of-game overlay panel.
pub struct ResultsPanel {
    theme: Theme,
    screen: Size,
    back_button: RoundedRect,
}

impl ResultsPanel {
    pub fn new(theme: Theme, screen: Size) -> Self {
        let back_button = RoundedRect::new(
            screen.width / 2.0 - 175.0,
            screen.height * 0.65,
            350.0,
            125.0,
            20.0,
        );
        Self {
            theme,
            screen,
            back_button,
        }
    }

    pub fn back_button(&self) -> RoundedRect {
        self.back_button
    }

    /// Per-tick update: hit-test the back button, then draw the overlay.
    pub fn update(&self, composer: &mut Composer, phase: GamePhase) -> ResultsResponse {
        let hit = composer.hit(&self.back_button);

        composer.draw_rect(
            Rect::from_size(self.screen),
            self.theme.sub.with_alpha(0.4),
        );

        let headline = match phase {
            GamePhase::GameClear => "Stage Clear",
            _ => "Game Over",
        };
        composer.draw_text(
            headline,
            Vec2::new(self.screen.width / 2.0, self.screen.height * 0.35),
            96.0,
            self.theme.accent,
            Align::Center,
        );

        let fill = if hit.hover {
            self.theme.accent
        } else {
            self.theme.main
        };
        composer.draw_rounded_rect_with_border(
            self.back_button.rect,
            fill,
            self.back_button.radius,
            10.0,
            self.theme.sub,
        );
        composer.draw_text(
            "Return to Title",
            self.back_button.center(),
            40.0,
            self.theme.sub,
            Align::Center,
        );

        ResultsResponse {
            back_clicked: hit.left_clicked,
        }
    }
}
