use thiserror::*;

mod parser;
use parser::Token;

/// Closed classification of a raw event description.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MessageKind {
    NoteOn,
    NoteOff,
    Meta,
    Other,
}

impl MessageKind {
    /// Lexical classification, checked in order: prefix rules first, then
    /// the meta marker anywhere in the text.
    pub fn classify(raw: &str) -> Self {
        if raw.starts_with("note_on") {
            MessageKind::NoteOn
        } else if raw.starts_with("note_off") {
            MessageKind::NoteOff
        } else if raw.contains("meta") {
            MessageKind::Meta
        } else {
            MessageKind::Other
        }
    }
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ParamError {
    #[error("missing required parameter `{key}`")]
    Missing { key: &'static str },
    #[error("parameter `{key}` is not an integer: found {value:?}")]
    NotInteger { key: &'static str, value: String },
}

/// Parameter bag of one event. Known keys get named fields; anything else
/// lands in `unknown` so upstream format drift can be reported rather than
/// silently swallowed. Values stay textual here; integer interpretation
/// happens in the accessors, at the point a value is actually needed.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Params {
    channel: Option<String>,
    note: Option<String>,
    velocity: Option<String>,
    time: Option<String>,
    unknown: Vec<(String, String)>,
}

fn int_field(key: &'static str, value: Option<&str>) -> Result<u32, ParamError> {
    let raw = value.ok_or(ParamError::Missing { key })?;
    raw.parse::<u32>().map_err(|_| ParamError::NotInteger {
        key,
        value: raw.to_owned(),
    })
}

impl Params {
    fn insert(&mut self, key: &str, value: &str) {
        let slot = match key {
            "channel" => &mut self.channel,
            "note" => &mut self.note,
            "velocity" => &mut self.velocity,
            "time" => &mut self.time,
            _ => {
                self.unknown.push((key.to_owned(), value.to_owned()));
                return;
            }
        };
        *slot = Some(value.to_owned());
    }

    pub fn note(&self) -> Result<u32, ParamError> {
        int_field("note", self.note.as_deref())
    }

    pub fn time(&self) -> Result<u32, ParamError> {
        int_field("time", self.time.as_deref())
    }

    #[allow(dead_code)]
    pub fn channel(&self) -> Result<u32, ParamError> {
        int_field("channel", self.channel.as_deref())
    }

    #[allow(dead_code)]
    pub fn velocity(&self) -> Result<u32, ParamError> {
        int_field("velocity", self.velocity.as_deref())
    }

    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.unknown.iter().map(|(key, _)| key.as_str())
    }
}

/// Structured view of one raw event description.
#[derive(Debug, Clone)]
pub struct Message {
    kind: MessageKind,
    params: Params,
    excluded: bool,
}

impl Message {
    /// Parses one raw event description. Never fails: unclassifiable text
    /// becomes `Other`, and numeric interpretation is deferred to the
    /// `Params` accessors.
    pub fn parse(raw: &str, excluded_kinds: &[MessageKind]) -> Message {
        let kind = MessageKind::classify(raw);
        let tokens = parser::parse_tokens(raw)
            .map(|(_, tokens)| tokens)
            .unwrap_or_default();
        let mut params = Params::default();
        for token in tokens {
            if let Token::Param(key, value) = token {
                params.insert(key, value);
            }
        }
        Message {
            kind,
            params,
            excluded: excluded_kinds.contains(&kind),
        }
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded
    }
}
