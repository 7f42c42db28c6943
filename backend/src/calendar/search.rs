//! Case-insensitive substring search over an event set.

use shared::Event;

/// Keep events whose title or description contains `query`,
/// case-insensitively. An empty query keeps everything. Order-preserving;
/// an absent or empty description never matches a non-empty query.
pub fn filter_events(events: Vec<Event>, query: &str) -> Vec<Event> {
    if query.is_empty() {
        return events;
    }
    let needle = query.to_lowercase();
    events
        .into_iter()
        .filter(|event| {
            event.title.to_lowercase().contains(&needle)
                || event
                    .description
                    .as_ref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{EventCategory, EventId};

    fn event(id: u64, title: &str, description: Option<&str>) -> Event {
        Event {
            id: EventId::new(EventCategory::Task, id),
            title: title.to_string(),
            start: chrono::DateTime::UNIX_EPOCH,
            end: chrono::DateTime::UNIX_EPOCH,
            all_day: true,
            category: EventCategory::Task,
            description: description.map(String::from),
        }
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let events = vec![event(1, "Pay rent", Some(""))];
        let kept = filter_events(events, "RENT");
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_empty_query_returns_input_unchanged() {
        let events = vec![event(1, "a", None), event(2, "b", Some("c"))];
        let kept = filter_events(events.clone(), "");
        assert_eq!(kept, events);
    }

    #[test]
    fn test_title_match_suffices_without_description() {
        let events = vec![event(1, "x", None)];
        assert_eq!(filter_events(events, "x").len(), 1);
    }

    #[test]
    fn test_description_match() {
        let events = vec![event(1, "agenda", Some("Quarterly Budget"))];
        assert_eq!(filter_events(events, "budget").len(), 1);
    }

    #[test]
    fn test_non_matching_events_are_dropped() {
        let events = vec![event(1, "alpha", Some("beta"))];
        assert!(filter_events(events, "gamma").is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let events = vec![
            event(1, "team sync", None),
            event(2, "solo work", None),
            event(3, "team retro", None),
        ];
        let kept = filter_events(events, "team");
        let ids: Vec<&str> = kept.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["task-1", "task-3"]);
    }
}
