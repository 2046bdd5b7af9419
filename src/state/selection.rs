//! The item backing the detail screen.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Kind of calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Coffee,
    Workout,
    Meal,
    Swim,
    Fueling,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Coffee => "coffee",
            EventKind::Workout => "workout",
            EventKind::Meal => "meal",
            EventKind::Swim => "swim",
            EventKind::Fueling => "fueling",
        }
    }

    /// Parse a kind name as written by collaborators.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "coffee" => Some(EventKind::Coffee),
            "workout" => Some(EventKind::Workout),
            "meal" => Some(EventKind::Meal),
            "swim" => Some(EventKind::Swim),
            "fueling" => Some(EventKind::Fueling),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

/// Sport-specific payload attached to workout entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_count: Option<u32>,
}

/// A calendar entry the user can open in the detail screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Display time, e.g. "7:30 AM".
    pub time: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    /// Workout this fueling entry belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_details: Option<WorkoutDetails>,
}

impl Event {
    /// Create an event with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        time: impl Into<String>,
        kind: EventKind,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: String::new(),
            time: time.into(),
            kind,
            description: None,
            duration_minutes: None,
            intensity: None,
            workout_id: None,
            workout_details: None,
        }
    }
}

/// Selection Context: the single item shown by the detail screen.
///
/// `current` is set exactly while `itemDetail` is the active screen. When
/// another screen is pushed on top of a detail screen its item is parked and
/// restored once back-navigation reveals that detail screen again, so
/// `parked.len()` always equals the number of buried `itemDetail` entries.
#[derive(Debug, Clone, Default)]
pub struct SelectionContext {
    current: Option<Event>,
    parked: Vec<Event>,
}

impl SelectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The item currently backing the detail screen.
    pub fn current(&self) -> Option<&Event> {
        self.current.as_ref()
    }

    pub fn is_selected(&self) -> bool {
        self.current.is_some()
    }

    /// Number of items parked under other screens.
    pub fn parked_len(&self) -> usize {
        self.parked.len()
    }

    pub(crate) fn select(&mut self, item: Event) {
        debug!("selection set to {}", item.id);
        self.current = Some(item);
    }

    /// Drop the active item (its detail screen left the stack).
    pub(crate) fn clear(&mut self) {
        if let Some(item) = self.current.take() {
            debug!("selection cleared ({})", item.id);
        }
    }

    /// Another screen covers the detail screen; keep its item for later.
    pub(crate) fn park(&mut self) {
        if let Some(item) = self.current.take() {
            self.parked.push(item);
        }
    }

    /// The most recently covered detail screen is active again.
    pub(crate) fn restore(&mut self) {
        self.current = self.parked.pop();
    }

    /// History was discarded.
    pub(crate) fn reset(&mut self) {
        self.current = None;
        self.parked.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee() -> Event {
        Event::new("evt-1", "Morning coffee", "7:00 AM", EventKind::Coffee)
    }

    #[test]
    fn test_select_and_clear() {
        let mut ctx = SelectionContext::new();
        assert!(!ctx.is_selected());
        ctx.select(coffee());
        assert_eq!(ctx.current().map(|e| e.id.as_str()), Some("evt-1"));
        ctx.clear();
        assert!(ctx.current().is_none());
    }

    #[test]
    fn test_park_and_restore() {
        let mut ctx = SelectionContext::new();
        ctx.select(coffee());
        ctx.park();
        assert!(!ctx.is_selected());
        assert_eq!(ctx.parked_len(), 1);
        ctx.restore();
        assert_eq!(ctx.current().map(|e| e.id.as_str()), Some("evt-1"));
        assert_eq!(ctx.parked_len(), 0);
    }

    #[test]
    fn test_event_json_shape() {
        let mut event = Event::new("w1", "Tempo run", "6:00 AM", EventKind::Workout);
        event.intensity = Some(Intensity::High);
        event.workout_details = Some(WorkoutDetails {
            distance: Some(10.0),
            workout_type: Some("run".to_string()),
            ..WorkoutDetails::default()
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "workout");
        assert_eq!(json["intensity"], "HIGH");
        assert_eq!(json["workoutDetails"]["workoutType"], "run");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_event_kind_parse() {
        assert_eq!(EventKind::parse("swim"), Some(EventKind::Swim));
        assert_eq!(EventKind::parse("nap"), None);
    }
}
