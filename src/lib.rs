//! Songbake - tracker song to C data table converter
//!
//! This library provides:
//! - Parsing of tracker-style XML song exports
//! - Flattening of the sequenced patterns into per-line instrument bitmasks
//! - Rendering of the embeddable `static struct song` record
//!
//! # Example
//!
//! ```no_run
//! use songbake::{parse_song_xml, SongRecord, TableBuilder};
//!
//! let xml = std::fs::read_to_string("song.xml").unwrap();
//! let song = parse_song_xml(&xml).unwrap();
//! let line_masks = TableBuilder::new().build_for_song(&song).unwrap();
//! let record = SongRecord::new("song".to_string(), song.tempo, line_masks);
//! let mut out = Vec::new();
//! record.write_to(&mut out).unwrap();
//! ```

pub mod error;
pub mod parser;
pub mod table;

// Re-export main types for convenience
pub use error::SongError;
pub use parser::song_parser::{
    parse_song_xml, LineEntry, Pattern, Song, Tempo, Track, MAX_INSTRUMENT,
};
pub use table::{song_record::SongRecord, table_builder::TableBuilder};
