use clap::Parser;
use songbake::SongError;
use songbake::{parse_song_xml, SongRecord, TableBuilder};
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::{Path, PathBuf};

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("songbake=info"))
        .init();

    // args
    let mut args = CliArgs::parse();
    let song_path = PathBuf::from(&args.song_path);
    let output_file = args.output_file.take().map(PathBuf::from);
    let input_file = args.input_file.take().map(PathBuf::from);

    // check if input file exists
    if let Some(input_file) = &input_file {
        if !input_file.exists() {
            let err = AppError::ConfigError(format!("Song file not found {input_file:?}"));
            return Err(err);
        }
        log::info!("Reading song from {input_file:?}");
    }

    // the song path only names the record; the document itself comes from
    // stdin unless --input-file points elsewhere
    let name = record_name(&song_path)?;

    let xml = match &input_file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let song = parse_song_xml(&xml)?;
    let line_masks = TableBuilder::new().build_for_song(&song)?;
    log::info!(
        "converted {} sequence entries into {} line masks",
        song.pattern_sequence.len(),
        line_masks.len()
    );
    let record = SongRecord::new(name, song.tempo, line_masks);

    match &output_file {
        Some(path) => {
            log::info!("Writing song record to {path:?}");
            let mut file = File::create(path)?;
            record.write_to(&mut file)?;
        }
        None => {
            let stdout = io::stdout();
            record.write_to(&mut stdout.lock())?;
        }
    }
    Ok(())
}

/// C identifier for the record, derived from the basename without extension.
fn record_name(path: &Path) -> Result<String, AppError> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| AppError::ConfigError(format!("Cannot derive a record name from {path:?}")))?;
    let mut name = String::with_capacity(stem.len());
    for c in stem.chars() {
        name.push(if c.is_ascii_alphanumeric() { c } else { '_' });
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    Ok(name)
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Path of the song being converted; its basename names the record.
    song_path: String,
    /// Output file for the record. Prints to standard output when omitted.
    output_file: Option<String>,
    /// Read the song XML from a file instead of standard input.
    #[arg(long)]
    input_file: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("parsing error: {0}")]
    ParsingError(String),
    #[error("other error: {0}")]
    OtherError(String),
}

impl From<SongError> for AppError {
    fn from(error: SongError) -> Self {
        match error {
            SongError::MalformedInput(s) => Self::ParsingError(s),
            err @ SongError::PatternIndexOutOfRange { .. } => Self::ParsingError(err.to_string()),
            SongError::IoError(s) => Self::OtherError(s),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::OtherError(error.to_string())
    }
}
