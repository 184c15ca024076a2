use std::env::args;
use std::fs;
use thiserror::*;

mod message;
mod midi;
mod render;
mod settings;
mod stepmap;
mod track;

use render::render_composition;
use settings::Settings;
use stepmap::{build_stepmap, StepMap};

#[derive(Debug, Error)]
pub enum SteppoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("could not decode midi file: {0}")]
    Midi(#[from] midly::Error),
    #[error(transparent)]
    Render(#[from] render::RenderError),
    #[error("usage: steppo <input.mid> [output.txt] [one-beat-ticks]")]
    Usage,
    #[error("one-beat value {0:?} is not an integer")]
    BadOneBeat(String),
    #[error("{0:?} has no metrical timing header; pass an explicit one-beat tick value")]
    NoTiming(String),
}

fn run() -> Result<(), SteppoError> {
    let argv: Vec<String> = args().skip(1).collect();
    let input_path = argv.get(0).ok_or(SteppoError::Usage)?;
    let output_path = argv.get(1);
    let one_beat_arg = match argv.get(2) {
        Some(raw) => Some(
            raw.parse::<u32>()
                .map_err(|_| SteppoError::BadOneBeat(raw.clone()))?,
        ),
        None => None,
    };

    let bytes = fs::read(input_path)?;
    let decoded = midi::decode(&bytes)?;
    let one_beat = one_beat_arg
        .or(decoded.ticks_per_beat)
        .ok_or_else(|| SteppoError::NoTiming(input_path.clone()))?;
    let settings = Settings::new(one_beat);

    let voices = track::select_tracks(decoded.tracks);
    let maps: Vec<StepMap> = voices.iter().map(|events| build_stepmap(events)).collect();
    for (index, map) in maps.iter().enumerate() {
        for key in map.unknown_param_keys() {
            eprintln!("voice {}: unrecognized event parameter {:?}", index + 1, key);
        }
    }

    let text = render_composition(&maps, &settings)?;
    match output_path {
        Some(path) => fs::write(path, format!("{}{}\n", settings.header, text))?,
        None => println!("{}", text),
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
