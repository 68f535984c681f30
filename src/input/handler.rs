use crate::{
    core::geo::LatLng,
    input::events::{Effect, FeatureEvent, MapEvent},
    layers::animation::EasingType,
    prelude::{HashMap, VecDeque},
    rendering::style::{StyleConfig, StyleVariant},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Interaction state owned by one rendered element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    pub style: StyleVariant,
    pub popup_open: bool,
}

/// Everything the state machine needs to know besides the current state
#[derive(Debug, Clone, Copy)]
pub struct InteractionContext<'a> {
    pub styles: &'a StyleConfig,
    /// Whether the element has a popup to open
    pub has_popup: bool,
    /// Whether the element is styled (icon markers are not)
    pub styleable: bool,
    /// Location of the element, the target of a click
    pub anchor: LatLng,
    pub fly_zoom: f64,
    pub fly_duration: Duration,
    pub fly_easing: EasingType,
}

/// Next state plus the effects needed to get there
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: InteractionState,
    pub effects: Vec<Effect>,
}

/// Pure interaction function: hover highlights and opens the popup, hover end
/// restores the default look, click flies the map to the element itself.
pub fn handle_feature_event(
    state: InteractionState,
    event: FeatureEvent,
    ctx: &InteractionContext<'_>,
) -> Transition {
    let mut next = state;
    let mut effects = Vec::new();

    match event {
        FeatureEvent::HoverStart => {
            next.style = StyleVariant::Highlight;
            if ctx.styleable {
                effects.push(Effect::SetStyle(ctx.styles.highlight.clone()));
                effects.push(Effect::BringToFront);
            }
            if ctx.has_popup && !state.popup_open {
                next.popup_open = true;
                effects.push(Effect::OpenPopup);
            }
        }
        FeatureEvent::HoverEnd => {
            next.style = StyleVariant::Default;
            if ctx.styleable {
                effects.push(Effect::SetStyle(ctx.styles.default.clone()));
            }
            if state.popup_open {
                next.popup_open = false;
                effects.push(Effect::ClosePopup);
            }
        }
        FeatureEvent::Click => effects.push(Effect::FlyTo {
            center: ctx.anchor,
            zoom: ctx.fly_zoom,
            duration: ctx.fly_duration,
            easing: ctx.fly_easing,
        }),
    }

    Transition {
        state: next,
        effects,
    }
}

/// Listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Queues map events and fans them out to listeners by kind
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event kind
    listeners: HashMap<String, Vec<EventCallback>>,
    /// Events not yet processed
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_kind: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_kind.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Drain the queue, invoking listeners, and return the drained events
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.kind()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}

/// Text shown for a double click on the map, five decimals like the demo page
pub fn coordinates_text(at: LatLng) -> String {
    format!("Coordinates: {:.5}, {:.5}", at.lat, at.lng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn ctx(styles: &StyleConfig) -> InteractionContext<'_> {
        InteractionContext {
            styles,
            has_popup: true,
            styleable: true,
            anchor: LatLng::new(47.8005, 13.0438),
            fly_zoom: 16.0,
            fly_duration: Duration::from_millis(1500),
            fly_easing: EasingType::EaseInOut,
        }
    }

    #[test]
    fn test_hover_round_trip_restores_default() {
        let styles = StyleConfig::default();
        let start = InteractionState::default();

        let hovered = handle_feature_event(start, FeatureEvent::HoverStart, &ctx(&styles));
        assert_eq!(hovered.state.style, StyleVariant::Highlight);
        assert!(hovered.state.popup_open);
        assert_eq!(
            hovered.effects,
            vec![
                Effect::SetStyle(styles.highlight.clone()),
                Effect::BringToFront,
                Effect::OpenPopup
            ]
        );

        let left = handle_feature_event(hovered.state, FeatureEvent::HoverEnd, &ctx(&styles));
        assert_eq!(left.state, start);
        assert_eq!(
            left.effects,
            vec![Effect::SetStyle(styles.default.clone()), Effect::ClosePopup]
        );
    }

    #[test]
    fn test_hover_without_popup_only_restyles() {
        let styles = StyleConfig::default();
        let mut context = ctx(&styles);
        context.has_popup = false;

        let hovered =
            handle_feature_event(InteractionState::default(), FeatureEvent::HoverStart, &context);
        assert!(!hovered.state.popup_open);
        assert!(!hovered.effects.contains(&Effect::OpenPopup));
    }

    #[test]
    fn test_icon_markers_only_toggle_popup() {
        let styles = StyleConfig::default();
        let mut context = ctx(&styles);
        context.styleable = false;

        let hovered =
            handle_feature_event(InteractionState::default(), FeatureEvent::HoverStart, &context);
        assert_eq!(hovered.effects, vec![Effect::OpenPopup]);
    }

    #[test]
    fn test_click_flies_to_element_anchor() {
        let styles = StyleConfig::default();
        let transition =
            handle_feature_event(InteractionState::default(), FeatureEvent::Click, &ctx(&styles));

        assert_eq!(transition.state, InteractionState::default());
        assert_eq!(
            transition.effects,
            vec![Effect::FlyTo {
                center: LatLng::new(47.8005, 13.0438),
                zoom: 16.0,
                duration: Duration::from_millis(1500),
                easing: EasingType::EaseInOut,
            }]
        );
    }

    #[test]
    fn test_event_manager_dispatches_by_kind() {
        let mut manager = EventManager::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        manager.on("layeradd", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        manager.emit(MapEvent::LayerAdd {
            layer_id: "shops".to_string(),
        });
        manager.emit(MapEvent::LayerRemove {
            layer_id: "shops".to_string(),
        });
        assert_eq!(manager.pending_events(), 2);

        let events = manager.process_events();
        assert_eq!(events.len(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(manager.pending_events(), 0);
    }

    #[test]
    fn test_coordinates_text() {
        assert_eq!(
            coordinates_text(LatLng::new(47.8095, 13.055)),
            "Coordinates: 47.80950, 13.05500"
        );
    }
}
