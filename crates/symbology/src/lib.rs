pub mod layer;
pub mod legend;
pub mod style;
pub mod technique;

pub use layer::*;
pub use legend::{Legend, LegendEntry, LayoutHint};
pub use style::*;
pub use technique::*;
