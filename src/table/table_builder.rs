use crate::parser::song_parser::{Pattern, Song, MAX_INSTRUMENT};
use crate::SongError;

/// Flattens a song's pattern sequence into one instrument bitmask per line.
///
/// Bit `n` of a mask is set when instrument `n` triggers on that line in any
/// track of the owning pattern occurrence.
pub struct TableBuilder {
    line_masks: Vec<u32>, // masks accumulated during build
}

impl TableBuilder {
    pub const fn new() -> Self {
        Self {
            line_masks: Vec::new(),
        }
    }

    /// Walk the pattern sequence in order and record one mask per line.
    ///
    /// A pattern referenced several times is expanded once per occurrence;
    /// the expansion is pure, so the blocks come out identical.
    pub fn build_for_song(mut self, song: &Song) -> Result<Vec<u32>, SongError> {
        for (seq_position, &pattern_index) in song.pattern_sequence.iter().enumerate() {
            log::debug!("building masks for sequence position {seq_position} (pattern {pattern_index})");
            let pattern =
                song.patterns
                    .get(pattern_index)
                    .ok_or(SongError::PatternIndexOutOfRange {
                        index: pattern_index,
                        pool_len: song.patterns.len(),
                    })?;
            self.add_pattern_masks(seq_position, pattern_index, pattern);
        }
        Ok(self.line_masks)
    }

    fn add_pattern_masks(&mut self, seq_position: usize, pattern_index: usize, pattern: &Pattern) {
        let start = self.line_masks.len();
        self.line_masks.resize(start + pattern.number_of_lines, 0);
        for track in &pattern.tracks {
            for entry in &track.lines {
                if entry.index >= pattern.number_of_lines {
                    log::warn!(
                        "dropping line {} of pattern {pattern_index} at sequence position {seq_position}: pattern has {} lines",
                        entry.index,
                        pattern.number_of_lines
                    );
                    continue;
                }
                // upheld by the parser; hand-built songs must respect it too
                debug_assert!(entry.instrument <= MAX_INSTRUMENT);
                self.line_masks[start + entry.index] |= 1 << entry.instrument;
            }
        }
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
