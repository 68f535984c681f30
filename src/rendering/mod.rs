pub mod renderer;
pub mod style;

// Re-export main types
pub use renderer::{category_equals, render, FeatureFilter, FeatureRenderer};
pub use style::{StyleConfig, StyleDescriptor, StyleVariant};
