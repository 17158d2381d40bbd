//! Panels of the build-phase screen, each with its own local state machine.

mod canvas;
mod chart;
mod minimap;
mod palette;
mod results;

pub use canvas::{CanvasConfig, CanvasPanel, CanvasResponse};
pub use chart::{ChartAxis, ChartConfig, ChartPanel};
pub use minimap::{MinimapConfig, MinimapPanel};
pub use palette::{PaletteConfig, PalettePanel};
pub use results::{ResultsPanel, ResultsResponse};
