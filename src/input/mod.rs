pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{Effect, FeatureEvent, MapEvent, MapInput};
pub use handler::{
    coordinates_text, handle_feature_event, EventManager, InteractionContext, InteractionState,
    Transition,
};
