/// Number of note slots on one physical row of the steppophone.
pub const NOTES_PER_ROW: usize = 8;

/// Conversion knobs for one run. `one_beat` is the delta-time value, in the
/// source file's native ticks, that spans exactly one beat; it varies with
/// the file's resolution and is always injected, never assumed.
#[derive(Debug, Clone)]
pub struct Settings {
    pub one_beat: u32,
    pub notes_per_row: usize,
    pub header: String,
}

impl Settings {
    pub fn new(one_beat: u32) -> Settings {
        Settings {
            one_beat,
            notes_per_row: NOTES_PER_ROW,
            header: String::new(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new(480)
    }
}

/// MIDI note number to steppophone key slot. A4 is the lowest playable key
/// on the device; one octave of chromatic slots above it.
#[allow(dead_code)]
pub const NOTE_MAP: [(u8, u8); 12] = [
    (81, 0),  // A4
    (82, 1),  // A#4
    (83, 2),  // B4
    (84, 3),  // C5
    (85, 4),  // C#5
    (86, 5),  // D5
    (87, 6),  // D#5
    (88, 7),  // E5
    (89, 8),  // F5
    (90, 9),  // F#5
    (91, 10), // G5
    (92, 11), // G#5
];

#[allow(dead_code)]
pub fn device_index(note: u8) -> Option<u8> {
    NOTE_MAP
        .iter()
        .find(|(key, _)| *key == note)
        .map(|(_, slot)| *slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_index_covers_one_octave() {
        assert_eq!(device_index(81), Some(0));
        assert_eq!(device_index(92), Some(11));
        assert_eq!(device_index(60), None);
        assert_eq!(device_index(93), None);
    }
}
