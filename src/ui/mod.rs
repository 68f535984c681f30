pub mod controls;
pub mod layer_control;
pub mod legend;
pub mod popup;
pub mod scale;
pub mod search;

pub use controls::{ControlManager, ControlPosition, Overlay};
pub use layer_control::LayerControl;
pub use legend::{LegendControl, LegendEntry};
pub use popup::{Popup, PopupOptions};
pub use scale::{ScaleControl, ScaleReading};
pub use search::{SearchControl, SearchHit};
