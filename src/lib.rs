//! spectrum_chart crate: interaction engine for annotated fragment spectrum viewers

pub mod axis_renderer;
pub mod chart_pane;
pub mod chart_view;
pub mod data_types;
pub mod error_graph;
pub mod highlight;
pub mod utils;
pub mod view_controller;

pub use chart_pane::{ChartPane, PaneInput};
pub use chart_view::{GestureOutcome, KeyEvent, PointerEvent, ViewerAction, ViewerSession, WheelEvent};
pub use data_types::{PaneId, Peak, ViewerConfig, Viewport, ViewportBounds};
pub use error_graph::{DensityEstimator, DensityOverlay, DensityRequest, ErrorGraph};
pub use highlight::{HighlightEngine, HighlightTarget};
