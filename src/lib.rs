pub mod animation;
pub mod composer;
pub mod draw;
pub mod game;
pub mod geometry;
pub mod panel;
pub mod pointer;
pub mod stage;
pub mod theme;
pub mod transform;

pub mod prelude {
    pub use crate::animation::{step_toward, Animatable};
    pub use crate::composer::{Composer, CursorTransform};
    pub use crate::draw::{
        Align, Border, Color, DrawCommand, Primitive, Shadow, SpriteId,
    };
    pub use crate::game::{GamePhase, GameQuery, InventoryEntry, SceneId};
    pub use crate::geometry::{
        Circle, CombineOp, Polygon, Rect, Region, RoundedRect, Size, Vec2,
    };
    pub use crate::panel::{
        CanvasConfig, CanvasPanel, CanvasResponse, ChartAxis, ChartConfig, ChartPanel,
        MinimapConfig, MinimapPanel, PaletteConfig, PalettePanel, ResultsPanel,
        ResultsResponse,
    };
    pub use crate::pointer::{HitResult, HitShape, Pointer, PointerButtons};
    pub use crate::stage::{Stage, StageConfig, StageResponse, TickInput};
    pub use crate::theme::Theme;
    pub use crate::transform::Transform;
}
