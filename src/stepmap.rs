use crate::message::{Message, MessageKind};
use std::collections::BTreeSet;

/// Ordered, densely indexed store of one track's performance messages.
/// Index order is chronological order with excluded entries removed, so the
/// indices form a gapless range `0..len`.
#[derive(Debug, Clone, Default)]
pub struct StepMap {
    steps: Vec<Message>,
}

impl StepMap {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Bounds-checked lookup; running off the end of the map is a normal
    /// `None`, not an error.
    pub fn get(&self, index: usize) -> Option<&Message> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.steps.iter()
    }

    /// Parameter keys this converter does not know about, deduplicated
    /// across all steps.
    pub fn unknown_param_keys(&self) -> Vec<&str> {
        let keys: BTreeSet<&str> = self
            .steps
            .iter()
            .flat_map(|msg| msg.params().unknown_keys())
            .collect();
        keys.into_iter().collect()
    }
}

/// Folds a track's raw events into a `StepMap`, dropping meta events and
/// assigning the survivors sequential indices starting at 0.
pub fn build_stepmap(events: &[String]) -> StepMap {
    const EXCLUDED: &[MessageKind] = &[MessageKind::Meta];
    let steps = events
        .iter()
        .map(|raw| Message::parse(raw, EXCLUDED))
        .filter(|msg| !msg.is_excluded())
        .collect();
    StepMap { steps }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(raws: &[&str]) -> Vec<String> {
        raws.iter().map(|raw| raw.to_string()).collect()
    }

    #[test]
    fn test_meta_events_are_dropped() {
        let events = track(&[
            "<meta message track_name name='lead' time=0>",
            "note_on channel=0 note=72 velocity=100 time=0",
            "note_off channel=0 note=72 velocity=100 time=480",
            "<meta message end_of_track time=0>",
        ]);
        let map = build_stepmap(&events);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(0).unwrap().kind(), MessageKind::NoteOn);
        assert_eq!(map.get(1).unwrap().kind(), MessageKind::NoteOff);
    }

    #[test]
    fn test_indices_are_dense_and_ordered() {
        let events = track(&[
            "note_on channel=0 note=60 velocity=100 time=0",
            "<meta message set_tempo tempo=500000 time=0>",
            "note_off channel=0 note=60 velocity=100 time=480",
            "note_on channel=0 note=62 velocity=100 time=0",
            "note_off channel=0 note=62 velocity=100 time=480",
        ]);
        let map = build_stepmap(&events);
        assert_eq!(map.len(), 4);
        for index in 0..map.len() {
            assert!(map.get(index).is_some());
        }
        assert!(map.get(map.len()).is_none());
        assert_eq!(map.get(2).unwrap().params().note(), Ok(62));
    }

    #[test]
    fn test_other_messages_survive() {
        let events = track(&[
            "program_change channel=0 program=12 time=0",
            "note_on channel=0 note=72 velocity=100 time=0",
        ]);
        let map = build_stepmap(&events);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(0).unwrap().kind(), MessageKind::Other);
    }

    #[test]
    fn test_unknown_param_keys_are_collected() {
        let events = track(&[
            "control_change channel=0 control=64 value=127 time=0",
            "note_on channel=0 note=72 velocity=100 time=0",
        ]);
        let map = build_stepmap(&events);
        assert_eq!(map.unknown_param_keys(), vec!["control", "value"]);
    }

    #[test]
    fn test_empty_track() {
        let map = build_stepmap(&[]);
        assert_eq!(map.len(), 0);
        assert!(map.get(0).is_none());
    }
}
