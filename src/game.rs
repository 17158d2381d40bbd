//! Read-only game-state queries and the scene-transition contract.
//!
//! The engine never owns gameplay data. Everything it needs from the game is
//! pulled through [`GameQuery`] at the point in the tick where it is used,
//! and nothing read in one tick is assumed stable into the next.

use crate::draw::SpriteId;

/// High-level game mode, as far as the UI cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver,
    GameClear,
}

/// Target of a scene transition requested by the UI.
///
/// A closed enumeration: the scene-change callback receives one of these
/// instead of a runtime type identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneId {
    Title,
    Stage,
}

/// One placeable unit in the build palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryEntry {
    /// Icon/animation handle resolved by the external renderer
    pub sprite: SpriteId,
    /// Resource cost to place one unit. Negative means not yet available.
    pub spawn_cost: f32,
}

/// Read-only queries the stage pulls from the game each tick.
pub trait GameQuery {
    fn phase(&self) -> GamePhase;

    /// Total scrollable height of the battlefield in world units.
    /// Collaborators must keep this strictly positive; the minimap skips
    /// its position indicator otherwise.
    fn scene_height(&self) -> f32;

    fn inventory(&self) -> &[InventoryEntry];
}
