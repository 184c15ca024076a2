use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

/// A decoded source file: per-track raw event descriptions plus the timing
/// resolution from the header, when the file carries a metrical one.
pub struct DecodedFile {
    pub tracks: Vec<Vec<String>>,
    pub ticks_per_beat: Option<u32>,
}

pub fn decode(bytes: &[u8]) -> Result<DecodedFile, midly::Error> {
    let smf = Smf::parse(bytes)?;
    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(ticks) => Some(u32::from(ticks.as_int())),
        Timing::Timecode(..) => None,
    };
    let tracks = smf
        .tracks
        .iter()
        .map(|track| track.iter().map(describe_event).collect())
        .collect();
    Ok(DecodedFile {
        tracks,
        ticks_per_beat,
    })
}

/// Renders one track event into the textual convention the converter
/// parses: the event name followed by `key=value` pairs, with the delta
/// time always last.
pub fn describe_event(event: &TrackEvent) -> String {
    let delta = event.delta.as_int();
    match &event.kind {
        TrackEventKind::Midi { channel, message } => {
            describe_midi(channel.as_int(), message, delta)
        }
        TrackEventKind::Meta(meta) => format!("<meta message {} time={}>", meta_name(meta), delta),
        TrackEventKind::SysEx(_) => format!("sysex time={}", delta),
        TrackEventKind::Escape(_) => format!("escape time={}", delta),
    }
}

fn describe_midi(channel: u8, message: &MidiMessage, delta: u32) -> String {
    match message {
        MidiMessage::NoteOn { key, vel } => format!(
            "note_on channel={} note={} velocity={} time={}",
            channel,
            key.as_int(),
            vel.as_int(),
            delta
        ),
        MidiMessage::NoteOff { key, vel } => format!(
            "note_off channel={} note={} velocity={} time={}",
            channel,
            key.as_int(),
            vel.as_int(),
            delta
        ),
        MidiMessage::Aftertouch { key, vel } => format!(
            "polytouch channel={} note={} value={} time={}",
            channel,
            key.as_int(),
            vel.as_int(),
            delta
        ),
        MidiMessage::Controller { controller, value } => format!(
            "control_change channel={} control={} value={} time={}",
            channel,
            controller.as_int(),
            value.as_int(),
            delta
        ),
        MidiMessage::ProgramChange { program } => format!(
            "program_change channel={} program={} time={}",
            channel,
            program.as_int(),
            delta
        ),
        MidiMessage::ChannelAftertouch { vel } => format!(
            "aftertouch channel={} value={} time={}",
            channel,
            vel.as_int(),
            delta
        ),
        MidiMessage::PitchBend { bend } => format!(
            "pitchwheel channel={} pitch={} time={}",
            channel,
            i32::from(bend.0.as_int()) - 8192,
            delta
        ),
    }
}

fn meta_name(meta: &MetaMessage) -> String {
    match meta {
        MetaMessage::TrackName(name) => {
            format!("track_name name='{}'", String::from_utf8_lossy(name))
        }
        MetaMessage::Tempo(tempo) => format!("set_tempo tempo={}", tempo.as_int()),
        MetaMessage::TimeSignature(..) => "time_signature".to_owned(),
        MetaMessage::KeySignature(..) => "key_signature".to_owned(),
        MetaMessage::EndOfTrack => "end_of_track".to_owned(),
        MetaMessage::Text(_) => "text".to_owned(),
        MetaMessage::Copyright(_) => "copyright".to_owned(),
        MetaMessage::InstrumentName(_) => "instrument_name".to_owned(),
        MetaMessage::Lyric(_) => "lyric".to_owned(),
        MetaMessage::Marker(_) => "marker".to_owned(),
        MetaMessage::CuePoint(_) => "cue_point".to_owned(),
        MetaMessage::MidiChannel(_) => "channel_prefix".to_owned(),
        MetaMessage::MidiPort(_) => "midi_port".to_owned(),
        MetaMessage::TrackNumber(_) => "sequence_number".to_owned(),
        MetaMessage::SmpteOffset(_) => "smpte_offset".to_owned(),
        _ => "meta".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midly::num::{u24, u28, u4, u7};

    fn midi_event(delta: u32, message: MidiMessage) -> TrackEvent<'static> {
        TrackEvent {
            delta: u28::new(delta),
            kind: TrackEventKind::Midi {
                channel: u4::new(0),
                message,
            },
        }
    }

    #[test]
    fn test_note_events_match_the_parsed_convention() {
        let on = midi_event(
            480,
            MidiMessage::NoteOn {
                key: u7::new(72),
                vel: u7::new(100),
            },
        );
        assert_eq!(
            describe_event(&on),
            "note_on channel=0 note=72 velocity=100 time=480"
        );

        let off = midi_event(
            0,
            MidiMessage::NoteOff {
                key: u7::new(72),
                vel: u7::new(64),
            },
        );
        assert_eq!(
            describe_event(&off),
            "note_off channel=0 note=72 velocity=64 time=0"
        );
    }

    #[test]
    fn test_meta_events_carry_the_meta_marker() {
        let tempo = TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(500000))),
        };
        assert_eq!(
            describe_event(&tempo),
            "<meta message set_tempo tempo=500000 time=0>"
        );

        let eot = TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        };
        assert_eq!(describe_event(&eot), "<meta message end_of_track time=0>");
    }

    #[test]
    fn test_other_channel_events() {
        let program = midi_event(0, MidiMessage::ProgramChange { program: u7::new(12) });
        assert_eq!(
            describe_event(&program),
            "program_change channel=0 program=12 time=0"
        );
    }
}
