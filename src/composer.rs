//! Per-tick composition context: the frame stack, the viewport scope,
//! hit-testing, and draw recording.
//!
//! The composer is the single object panels talk to during a tick. It owns
//! two parallel transform compositions (one for rendering, one for pointer
//! projection) because some frames, such as a cosmetic shadow offset, move
//! what is drawn without moving what the pointer can hit.
//!
//! Frame and viewport scopes are stack-discipline resources: the closure
//! based [`Composer::with_frame`]/[`Composer::with_viewport`] helpers restore
//! the prior state on every exit path, including early returns from inside
//! the closure. An unbalanced stack would corrupt every sibling scope for
//! the rest of the tick, so the low-level push/pop pair is only exposed for
//! callers that cannot express their scope as a closure.

use crate::draw::{Align, Border, Color, DrawCommand, Primitive, Shadow, SpriteId};
use crate::geometry::{Circle, Rect, Region, Vec2};
use crate::pointer::{HitResult, HitShape, Pointer, PointerButtons};
use crate::transform::Transform;

/// Whether a pushed frame also re-projects pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorTransform {
    /// The frame moves rendering and hit-testing together.
    Apply,
    /// The frame moves rendering only; hit-testing keeps the parent frame.
    Ignore,
}

#[derive(Clone, Copy)]
struct FrameEntry {
    render: Transform,
    cursor: Transform,
}

impl FrameEntry {
    const ROOT: FrameEntry = FrameEntry {
        render: Transform::IDENTITY,
        cursor: Transform::IDENTITY,
    };
}

/// Composition context for one frame tick.
///
/// Reused across ticks: [`Composer::begin_tick`] clears the recorded
/// primitives and stacks while keeping their allocations.
pub struct Composer {
    frames: Vec<FrameEntry>,
    viewport: Option<Rect>,
    pointer: Pointer,
    primitives: Vec<Primitive>,
}

impl Composer {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(8),
            viewport: None,
            pointer: Pointer::new(),
            primitives: Vec::with_capacity(128),
        }
    }

    /// Start a tick: feed the pointer device state and clear the recorded
    /// output of the previous tick.
    pub fn begin_tick(&mut self, pointer_pos: Option<Vec2>, held: PointerButtons) {
        debug_assert!(self.frames.is_empty(), "unbalanced frame stack");
        debug_assert!(self.viewport.is_none(), "unbalanced viewport scope");
        self.frames.clear();
        self.viewport = None;
        self.primitives.clear();
        self.pointer.begin_tick(pointer_pos, held);
    }

    /// The tracked pointer, for global (shape-independent) queries such as
    /// "right button went down anywhere this tick".
    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    /// Primitives recorded so far this tick, for the external renderer.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Current composed local→device render transform.
    pub fn render_transform(&self) -> Transform {
        self.frames.last().unwrap_or(&FrameEntry::ROOT).render
    }

    /// Current composed local→device cursor transform.
    pub fn cursor_transform(&self) -> Transform {
        self.frames.last().unwrap_or(&FrameEntry::ROOT).cursor
    }

    /// Push a frame composing with the current one.
    ///
    /// Prefer [`Composer::with_frame`]; a manual push must be matched by a
    /// [`Composer::pop_frame`] on every exit path.
    pub fn push_frame(&mut self, transform: Transform, cursor: CursorTransform) {
        let parent = *self.frames.last().unwrap_or(&FrameEntry::ROOT);
        self.frames.push(FrameEntry {
            render: parent.render.then(&transform),
            cursor: match cursor {
                CursorTransform::Apply => parent.cursor.then(&transform),
                CursorTransform::Ignore => parent.cursor,
            },
        });
    }

    pub fn pop_frame(&mut self) {
        debug_assert!(!self.frames.is_empty(), "pop_frame without a push");
        self.frames.pop();
    }

    /// Run `f` inside a nested frame. The prior composition is restored
    /// when `f` returns, on every exit path.
    pub fn with_frame<R>(
        &mut self,
        transform: Transform,
        cursor: CursorTransform,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.push_frame(transform, cursor);
        let result = f(self);
        self.pop_frame();
        result
    }

    /// Run `f` inside a viewport: `rect` (in the current local frame) is
    /// flattened to an absolute device rectangle, installed as the active
    /// clip for both drawing and hit-testing, and the local origin is reset
    /// to the rectangle's top-left corner. The outer frame and clip are
    /// restored when `f` returns.
    ///
    /// Only one viewport can be active at a time.
    pub fn with_viewport<R>(&mut self, rect: Rect, f: impl FnOnce(&mut Self) -> R) -> R {
        debug_assert!(self.viewport.is_none(), "nested viewports are unsupported");

        let device = self.flatten_rect(rect);
        let depth = self.frames.len();
        let origin = Transform::translate(device.x, device.y);
        self.frames.push(FrameEntry {
            render: origin,
            cursor: origin,
        });
        self.viewport = Some(device);

        let result = f(self);

        self.viewport = None;
        self.frames.pop();
        debug_assert_eq!(self.frames.len(), depth, "unbalanced frames in viewport");
        result
    }

    /// Map a local rectangle to its device-space bounding rectangle under
    /// the current render transform.
    fn flatten_rect(&self, rect: Rect) -> Rect {
        let t = self.render_transform();
        let corners = [
            t.apply(rect.pos()),
            t.apply(Vec2::new(rect.right(), rect.y)),
            t.apply(Vec2::new(rect.right(), rect.bottom())),
            t.apply(Vec2::new(rect.x, rect.bottom())),
        ];
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Pointer position projected into the current local frame, if the
    /// pointer is on the surface.
    pub fn local_pointer(&self) -> Option<Vec2> {
        let pos = self.pointer.position()?;
        Some(self.cursor_transform().inverse().apply(pos))
    }

    /// Test a shape, expressed in the current local frame, against this
    /// tick's pointer state.
    ///
    /// Must be called freshly every tick: the result depends on the shape's
    /// position under the active transform, which may change between ticks.
    /// Overlapping shapes are not arbitrated here; callers decide which
    /// reaction wins.
    pub fn hit<S: HitShape>(&self, shape: &S) -> HitResult {
        let Some(pos) = self.pointer.position() else {
            return HitResult::NONE;
        };
        if let Some(clip) = self.viewport {
            if !clip.contains(pos) {
                return HitResult::NONE;
            }
        }
        let local = self.cursor_transform().inverse().apply(pos);
        if !shape.contains(local) {
            return HitResult::NONE;
        }
        HitResult {
            hover: true,
            left_pressed: self.pointer.is_down(PointerButtons::LEFT),
            left_clicked: self.pointer.just_pressed(PointerButtons::LEFT),
            right_clicked: self.pointer.just_pressed(PointerButtons::RIGHT),
        }
    }

    /// Record a draw command under the active transform and clip.
    pub fn draw(&mut self, command: DrawCommand) {
        self.primitives.push(Primitive {
            command,
            transform: self.render_transform(),
            clip: self.viewport,
        });
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.draw(DrawCommand::rounded_rect(rect, color, 0.0));
    }

    pub fn draw_rounded_rect(&mut self, rect: Rect, color: Color, radius: f32) {
        self.draw(DrawCommand::rounded_rect(rect, color, radius));
    }

    pub fn draw_rounded_rect_with_border(
        &mut self,
        rect: Rect,
        color: Color,
        radius: f32,
        border_width: f32,
        border_color: Color,
    ) {
        self.draw(DrawCommand::RoundedRect {
            rect,
            color,
            radius,
            border: Some(Border::new(border_width, border_color)),
            shadow: None,
        });
    }

    /// Border outline only (hollow rounded rectangle).
    pub fn draw_border_frame(
        &mut self,
        rect: Rect,
        radius: f32,
        border_width: f32,
        border_color: Color,
    ) {
        self.draw(DrawCommand::RoundedRect {
            rect,
            color: Color::TRANSPARENT,
            radius,
            border: Some(Border::new(border_width, border_color)),
            shadow: None,
        });
    }

    pub fn draw_rounded_rect_with_shadow(
        &mut self,
        rect: Rect,
        color: Color,
        radius: f32,
        shadow: Shadow,
    ) {
        self.draw(DrawCommand::RoundedRect {
            rect,
            color,
            radius,
            border: None,
            shadow: Some(shadow),
        });
    }

    pub fn draw_gradient_rect(&mut self, rect: Rect, top: Color, bottom: Color) {
        self.draw(DrawCommand::GradientRect { rect, top, bottom });
    }

    pub fn draw_circle(&mut self, circle: Circle, color: Color) {
        self.draw(DrawCommand::circle(circle, color));
    }

    pub fn draw_circle_frame(&mut self, circle: Circle, border_width: f32, border_color: Color) {
        self.draw(DrawCommand::Circle {
            circle,
            color: Color::TRANSPARENT,
            border: Some(Border::new(border_width, border_color)),
        });
    }

    pub fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color, round_cap: bool) {
        self.draw(DrawCommand::Line {
            from,
            to,
            width,
            color,
            round_cap,
        });
    }

    /// Fill a boolean-combination shape. The empty region records nothing.
    pub fn draw_region(&mut self, region: &Region, color: Color) {
        if region.is_empty() {
            return;
        }
        self.draw(DrawCommand::Region {
            region: region.clone(),
            color,
        });
    }

    /// Outline a boolean-combination shape. The empty region records nothing.
    pub fn draw_region_frame(&mut self, region: &Region, width: f32, color: Color) {
        if region.is_empty() {
            return;
        }
        self.draw(DrawCommand::RegionFrame {
            region: region.clone(),
            width,
            color,
        });
    }

    pub fn draw_text(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        size: f32,
        color: Color,
        align: Align,
    ) {
        self.draw(DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            color,
            align,
        });
    }

    pub fn draw_sprite(&mut self, id: SpriteId, rect: Rect) {
        self.draw(DrawCommand::Sprite { id, rect });
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_frame_restoration() {
        let mut composer = Composer::new();
        composer.begin_tick(None, PointerButtons::empty());

        let before = composer.render_transform();
        composer.with_frame(
            Transform::translate(10.0, 20.0),
            CursorTransform::Apply,
            |c| {
                let p = c.render_transform().apply(Vec2::ZERO);
                assert!(approx_eq(p.x, 10.0));
                assert!(approx_eq(p.y, 20.0));
            },
        );
        assert_eq!(composer.render_transform(), before);
    }

    #[test]
    fn test_frame_restoration_on_early_return() {
        fn scope(c: &mut Composer, bail: bool) -> i32 {
            c.with_frame(
                Transform::translate(5.0, 0.0),
                CursorTransform::Apply,
                |c| {
                    if bail {
                        // Early return out of the scope body
                        return -1;
                    }
                    c.with_frame(
                        Transform::translate(0.0, 5.0),
                        CursorTransform::Apply,
                        |_| 1,
                    )
                },
            )
        }

        let mut composer = Composer::new();
        composer.begin_tick(None, PointerButtons::empty());
        let before = composer.render_transform();

        assert_eq!(scope(&mut composer, true), -1);
        assert_eq!(composer.render_transform(), before);

        assert_eq!(scope(&mut composer, false), 1);
        assert_eq!(composer.render_transform(), before);
    }

    #[test]
    fn test_sibling_scopes_do_not_leak() {
        let mut composer = Composer::new();
        composer.begin_tick(None, PointerButtons::empty());

        composer.with_frame(
            Transform::translate(100.0, 0.0),
            CursorTransform::Apply,
            |_| {},
        );
        composer.with_frame(
            Transform::translate(0.0, 50.0),
            CursorTransform::Apply,
            |c| {
                let p = c.render_transform().apply(Vec2::ZERO);
                assert!(approx_eq(p.x, 0.0));
                assert!(approx_eq(p.y, 50.0));
            },
        );
    }

    #[test]
    fn test_cursor_ignore_frame() {
        let mut composer = Composer::new();
        composer.begin_tick(Some(Vec2::new(5.0, 5.0)), PointerButtons::empty());

        composer.with_frame(
            Transform::translate(1000.0, 1000.0),
            CursorTransform::Ignore,
            |c| {
                // Rendering moved, hit-testing did not
                let p = c.render_transform().apply(Vec2::ZERO);
                assert!(approx_eq(p.x, 1000.0));
                let hit = c.hit(&Rect::new(0.0, 0.0, 10.0, 10.0));
                assert!(hit.hover);
            },
        );
    }

    #[test]
    fn test_hit_in_translated_frame() {
        let mut composer = Composer::new();
        composer.begin_tick(Some(Vec2::new(105.0, 105.0)), PointerButtons::LEFT);

        composer.with_frame(
            Transform::translate(100.0, 100.0),
            CursorTransform::Apply,
            |c| {
                let hit = c.hit(&Rect::new(0.0, 0.0, 10.0, 10.0));
                assert!(hit.hover);
                assert!(hit.left_pressed);
                assert!(hit.left_clicked);
            },
        );

        // Same shape in the root frame misses
        let hit = composer.hit(&Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(!hit.hover);
    }

    #[test]
    fn test_viewport_flattens_and_resets_origin() {
        let mut composer = Composer::new();
        composer.begin_tick(None, PointerButtons::empty());

        composer.with_frame(
            Transform::translate(300.0, 25.0),
            CursorTransform::Apply,
            |c| {
                c.with_viewport(Rect::new(0.0, 0.0, 950.0, 850.0), |c| {
                    c.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
                });
            },
        );

        let prim = &composer.primitives()[0];
        let origin = prim.transform.apply(Vec2::ZERO);
        assert!(approx_eq(origin.x, 300.0));
        assert!(approx_eq(origin.y, 25.0));
        let clip = prim.clip.unwrap();
        assert!(approx_eq(clip.right(), 1250.0));
        assert!(approx_eq(clip.bottom(), 875.0));
    }

    #[test]
    fn test_viewport_restores_outer_frame() {
        let mut composer = Composer::new();
        composer.begin_tick(None, PointerButtons::empty());

        composer.with_frame(
            Transform::translate(50.0, 0.0),
            CursorTransform::Apply,
            |c| {
                let before = c.render_transform();
                c.with_viewport(Rect::new(0.0, 0.0, 100.0, 100.0), |_| {});
                assert_eq!(c.render_transform(), before);
            },
        );
        assert!(composer.primitives().is_empty());
    }

    #[test]
    fn test_viewport_rejects_outside_pointer() {
        let mut composer = Composer::new();
        // Pointer outside the viewport rect in device space
        composer.begin_tick(Some(Vec2::new(500.0, 500.0)), PointerButtons::LEFT);

        composer.with_viewport(Rect::new(0.0, 0.0, 100.0, 100.0), |c| {
            // Huge shape that would otherwise contain the pointer
            let hit = c.hit(&Rect::new(0.0, 0.0, 10000.0, 10000.0));
            assert_eq!(hit, HitResult::NONE);
        });
    }

    #[test]
    fn test_draws_snapshot_active_transform() {
        let mut composer = Composer::new();
        composer.begin_tick(None, PointerButtons::empty());

        composer.with_frame(
            Transform::translate(80.0, 100.0),
            CursorTransform::Apply,
            |c| c.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE),
        );
        composer.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);

        let inner = composer.primitives()[0].transform.apply(Vec2::ZERO);
        let outer = composer.primitives()[1].transform.apply(Vec2::ZERO);
        assert!(approx_eq(inner.x, 80.0));
        assert!(approx_eq(inner.y, 100.0));
        assert!(approx_eq(outer.x, 0.0));
        assert!(approx_eq(outer.y, 0.0));
    }

    #[test]
    fn test_empty_region_draw_is_noop() {
        let mut composer = Composer::new();
        composer.begin_tick(None, PointerButtons::empty());
        composer.draw_region(&Region::empty(), Color::WHITE);
        composer.draw_region_frame(&Region::empty(), 2.0, Color::WHITE);
        assert!(composer.primitives().is_empty());
    }

    #[test]
    fn test_begin_tick_clears_previous_output() {
        let mut composer = Composer::new();
        composer.begin_tick(None, PointerButtons::empty());
        composer.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        assert_eq!(composer.primitives().len(), 1);

        composer.begin_tick(None, PointerButtons::empty());
        assert!(composer.primitives().is_empty());
    }
}
