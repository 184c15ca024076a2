use crate::message::{MessageKind, ParamError};
use crate::settings::Settings;
use crate::stepmap::StepMap;
use thiserror::*;

pub const SEPARATOR: char = ',';
pub const BLANK_TOKEN: &str = "0";

#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("step {step}: {source}")]
pub struct StepError {
    pub step: usize,
    #[source]
    pub source: ParamError,
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("voice {voice}: {source}")]
pub struct RenderError {
    pub voice: usize,
    #[source]
    pub source: StepError,
}

fn push_token(row: &mut String, token: &str) {
    row.push_str(token);
    row.push(SEPARATOR);
}

/// Token count of a partial row: trailing separator stripped, then split on
/// the separator. Note that an empty row still counts as one token, since
/// splitting an empty string yields one empty chunk.
fn token_count(row: &str) -> usize {
    row.trim_end_matches(SEPARATOR).split(SEPARATOR).count()
}

/// Renders one voice's step map into its comma-separated row.
///
/// One pass over the indices with a single-step lookahead:
/// - no successor: the terminal step. A row exactly one token short of
///   `notes_per_row` is padded with one blank; shorter rows are left as-is.
/// - successor is a NoteOn whose delta equals the one-beat value: the
///   current slot is a rest, regardless of the current message's own kind.
/// - otherwise a NoteOn at the current index emits its note number; NoteOff
///   and other messages emit nothing themselves.
pub fn render_track(map: &StepMap, settings: &Settings) -> Result<String, StepError> {
    let mut row = String::new();
    for (step, msg) in map.iter().enumerate() {
        if msg.is_excluded() {
            continue;
        }
        match map.get(step + 1) {
            None => {
                if token_count(&row) + 1 == settings.notes_per_row {
                    push_token(&mut row, BLANK_TOKEN);
                }
                break;
            }
            Some(next) => {
                let rest = next.kind() == MessageKind::NoteOn
                    && next.params().time().map_err(|source| StepError {
                        step: step + 1,
                        source,
                    })? == settings.one_beat;
                if rest {
                    push_token(&mut row, BLANK_TOKEN);
                } else if msg.kind() == MessageKind::NoteOn {
                    let note = msg
                        .params()
                        .note()
                        .map_err(|source| StepError { step, source })?;
                    push_token(&mut row, &note.to_string());
                }
            }
        }
    }
    Ok(row)
}

/// Accumulates the rendered rows of a whole composition, one voice at a
/// time. Exactly one owner per run; voices are appended strictly
/// sequentially.
#[derive(Debug, Default)]
pub struct Output {
    text: String,
    voice_count: usize,
}

impl Output {
    pub fn append_voice(&mut self, row: &str) {
        self.voice_count += 1;
        if self.voice_count > 1 {
            self.text.push('\n');
        }
        self.text.push_str(&format!("voice {}\n", self.voice_count));
        self.text.push_str(row);
    }

    #[allow(dead_code)]
    pub fn voice_count(&self) -> usize {
        self.voice_count
    }

    /// The single whole-text trailing-separator trim. Rows before the last
    /// keep their trailing separator; only the document tail is cleaned.
    pub fn finish(mut self) -> String {
        let kept = self.text.trim_end_matches(SEPARATOR).len();
        self.text.truncate(kept);
        self.text
    }
}

/// Renders every voice in order into one output document.
pub fn render_composition(voices: &[StepMap], settings: &Settings) -> Result<String, RenderError> {
    let mut output = Output::default();
    for (index, map) in voices.iter().enumerate() {
        let row = render_track(map, settings).map_err(|source| RenderError {
            voice: index + 1,
            source,
        })?;
        output.append_voice(&row);
    }
    Ok(output.finish())
}
