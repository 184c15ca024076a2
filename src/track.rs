/// Substrings that identify a transport track: the tempo/time-signature
/// bookkeeping track most exporters put first, which carries no performance.
const TRANSPORT_MARKERS: &[&str] = &["set_tempo", "time_signature"];

pub fn is_transport_track(events: &[String]) -> bool {
    events
        .iter()
        .any(|raw| TRANSPORT_MARKERS.iter().any(|marker| raw.contains(marker)))
}

/// Keeps every performance track, in file order. Events inside each track
/// are untouched; message-level filtering happens later, at step-map build.
pub fn select_tracks(tracks: Vec<Vec<String>>) -> Vec<Vec<String>> {
    tracks
        .into_iter()
        .filter(|events| !is_transport_track(events))
        .collect()
}
