//! End-to-end tick scenarios for the build-phase stage.

use stagecraft::prelude::*;

struct FakeGame {
    phase: GamePhase,
    inventory: Vec<InventoryEntry>,
    scene_height: f32,
}

impl GameQuery for FakeGame {
    fn phase(&self) -> GamePhase {
        self.phase
    }
    fn scene_height(&self) -> f32 {
        self.scene_height
    }
    fn inventory(&self) -> &[InventoryEntry] {
        &self.inventory
    }
}

fn playing_game() -> FakeGame {
    FakeGame {
        phase: GamePhase::Playing,
        inventory: vec![
            InventoryEntry {
                sprite: SpriteId(1),
                spawn_cost: 10.0,
            },
            InventoryEntry {
                sprite: SpriteId(2),
                spawn_cost: 40.0,
            },
            // Not yet unlocked
            InventoryEntry {
                sprite: SpriteId(3),
                spawn_cost: -1.0,
            },
        ],
        scene_height: 5000.0,
    }
}

fn tick_input() -> TickInput {
    TickInput {
        dt: 0.016,
        time_scale: 1.0,
        scroll: Vec2::ZERO,
        resources: 25.0,
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Device-space position of a point in the left region while the overlay
/// blend is zero.
fn left_region(p: Vec2) -> Vec2 {
    Vec2::new(80.0, 100.0) + p
}

#[test]
fn stack_balanced_after_full_tick_with_interactions() {
    init_logging();
    let mut stage = Stage::new(StageConfig::default(), Theme::default());
    let mut composer = Composer::new();
    let mut open = true;

    // Click somewhere over the palette while everything is animating
    let pos = left_region(Vec2::new(95.0, 100.0));
    composer.begin_tick(Some(pos), PointerButtons::LEFT);
    stage.update(
        &mut composer,
        &playing_game(),
        tick_input(),
        &mut open,
        |_| {},
    );

    assert!(composer.render_transform().is_identity());
    assert!(composer.cursor_transform().is_identity());
}

#[test]
fn disabled_item_early_return_leaves_stack_and_selection_intact() {
    init_logging();
    let mut stage = Stage::new(StageConfig::default(), Theme::default());
    let mut composer = Composer::new();
    let mut open = false;
    stage.palette_mut().set_selected(Some(1));

    // The third slot holds the locked (negative-cost) unit; its draw path
    // returns early out of the button's frame scope
    let slot = stage.palette().button_rect(2).center();
    let pos = left_region(slot);

    composer.begin_tick(Some(pos), PointerButtons::empty());
    stage.update(
        &mut composer,
        &playing_game(),
        tick_input(),
        &mut open,
        |_| {},
    );
    composer.begin_tick(Some(pos), PointerButtons::LEFT);
    stage.update(
        &mut composer,
        &playing_game(),
        tick_input(),
        &mut open,
        |_| {},
    );

    // Ineligible click: prior selection preserved, stack balanced
    assert_eq!(stage.palette().selected(), Some(1));
    assert!(composer.render_transform().is_identity());
}

#[test]
fn held_press_clicks_once_and_hovers_every_tick() {
    init_logging();
    let mut stage = Stage::new(StageConfig::default(), Theme::default());
    let mut composer = Composer::new();
    let mut open = false;

    // Hold the left button on the canvas handle: the edge toggles the
    // canvas exactly once, the held level does not retrigger it
    let handle = left_region(Vec2::new(300.0 + 33.0 + 30.0, 25.0 + 400.0));
    for _ in 0..3 {
        composer.begin_tick(Some(handle), PointerButtons::LEFT);
        stage.update(
            &mut composer,
            &playing_game(),
            tick_input(),
            &mut open,
            |_| {},
        );
    }
    assert!(open, "one click-edge, not three toggles");

    // Release and press again: a fresh edge toggles back
    composer.begin_tick(Some(handle), PointerButtons::empty());
    stage.update(
        &mut composer,
        &playing_game(),
        tick_input(),
        &mut open,
        |_| {},
    );
    composer.begin_tick(Some(handle), PointerButtons::LEFT);
    stage.update(
        &mut composer,
        &playing_game(),
        tick_input(),
        &mut open,
        |_| {},
    );
    assert!(!open);
}

#[test]
fn selection_updates_only_through_eligibility() {
    init_logging();
    let mut stage = Stage::new(StageConfig::default(), Theme::default());
    let mut composer = Composer::new();
    let mut open = false;
    let game = playing_game();

    // Click the first (eligible) slot
    let slot0 = left_region(stage.palette().button_rect(0).center());
    composer.begin_tick(Some(slot0), PointerButtons::empty());
    stage.update(&mut composer, &game, tick_input(), &mut open, |_| {});
    composer.begin_tick(Some(slot0), PointerButtons::LEFT);
    stage.update(&mut composer, &game, tick_input(), &mut open, |_| {});
    assert_eq!(stage.palette().selected(), Some(0));

    // Click the locked slot: selection must not move or clear
    let slot2 = left_region(stage.palette().button_rect(2).center());
    composer.begin_tick(Some(slot2), PointerButtons::empty());
    stage.update(&mut composer, &game, tick_input(), &mut open, |_| {});
    composer.begin_tick(Some(slot2), PointerButtons::LEFT);
    stage.update(&mut composer, &game, tick_input(), &mut open, |_| {});
    assert_eq!(stage.palette().selected(), Some(0));
}

#[test]
fn cost_fill_cutout_recorded_with_half_height() {
    init_logging();
    let mut stage = Stage::new(StageConfig::default(), Theme::default());
    let mut composer = Composer::new();
    let mut open = false;

    // resources 25, cost 10 -> fill ratio 0.5 on the first button
    composer.begin_tick(None, PointerButtons::empty());
    stage.update(
        &mut composer,
        &playing_game(),
        tick_input(),
        &mut open,
        |_| {},
    );

    let button = stage.palette().button_rect(0);
    let fill = composer
        .primitives()
        .iter()
        .filter_map(|p| match &p.command {
            DrawCommand::Region { region, .. } => Some(region.bounds()),
            _ => None,
        })
        .find(|bounds| (bounds.height - button.rect.height / 2.0).abs() < 1.0)
        .expect("cost fill cutout not recorded");

    // Anchored at the bottom edge of the button
    assert!((fill.bottom() - button.rect.height).abs() < 1.0);
}

#[test]
fn canvas_interior_clip_follows_left_region_offset() {
    init_logging();
    let mut stage = Stage::new(StageConfig::default(), Theme::default());
    let mut composer = Composer::new();
    let mut open = true;

    // time scale 0.1 -> canvas width 900 -> interior 950x850
    let mut input = tick_input();
    input.time_scale = 0.1;
    composer.begin_tick(None, PointerButtons::empty());
    stage.update(
        &mut composer,
        &playing_game(),
        input,
        &mut open,
        |_| {},
    );

    let clip = composer
        .primitives()
        .iter()
        .find_map(|p| p.clip)
        .expect("no clipped primitives recorded");
    // Canvas origin (300, 25) inside the left region at (80, 100)
    assert!((clip.x - 380.0).abs() < 1e-3);
    assert!((clip.y - 125.0).abs() < 1e-3);
    assert!((clip.width - 950.0).abs() < 1e-3);
    assert!((clip.height - 850.0).abs() < 1e-3);
}

#[test]
fn game_over_blend_reaches_overlay_and_back_button_fires() {
    init_logging();
    let mut stage = Stage::new(StageConfig::default(), Theme::default());
    let mut composer = Composer::new();
    let mut open = false;
    let game = FakeGame {
        phase: GamePhase::GameOver,
        ..playing_game()
    };

    // First game-over tick: lerp(0, 1, 0.1 * 8) = 0.8
    let mut input = tick_input();
    input.dt = 0.1;
    composer.begin_tick(None, PointerButtons::empty());
    stage.update(&mut composer, &game, input, &mut open, |_| {});
    assert!((stage.blend() - 0.8).abs() < 1e-6);

    // Let the blend settle on the overlay
    for _ in 0..20 {
        composer.begin_tick(None, PointerButtons::empty());
        stage.update(&mut composer, &game, input, &mut open, |_| {});
    }
    assert!((stage.blend() - 1.0).abs() < 1e-4);

    // With blend 1 the overlay sits exactly on screen: outer frame moves
    // down one screen, the overlay frame moves back up one
    let center = stage.results().back_button().center();

    let mut changed = None;
    composer.begin_tick(Some(center), PointerButtons::empty());
    stage.update(&mut composer, &game, input, &mut open, |_| {});
    composer.begin_tick(Some(center), PointerButtons::LEFT);
    stage.update(&mut composer, &game, input, &mut open, |scene| {
        changed = Some(scene);
    });

    assert_eq!(changed, Some(SceneId::Title));
}
