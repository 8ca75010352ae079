use crate::parser::song_parser::Tempo;
use std::io;
use std::io::Write;

/// A converted song, ready to be embedded in a C build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRecord {
    name: String,
    tempo: Tempo,
    line_masks: Vec<u32>,
}

impl SongRecord {
    pub const fn new(name: String, tempo: Tempo, line_masks: Vec<u32>) -> Self {
        Self {
            name,
            tempo,
            line_masks,
        }
    }

    pub fn total_lines(&self) -> usize {
        self.line_masks.len()
    }

    pub fn line_masks(&self) -> &[u32] {
        &self.line_masks
    }

    /// Write the record as a `static struct song` literal.
    ///
    /// Field order is fixed: tempo, lines per beat, signature numerator,
    /// total line count, mask list. The consuming sound engine indexes the
    /// struct positionally, so the order must not change.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "static struct song song_data_{} = {{", self.name)?;
        write!(out, "\t{},", self.tempo.beats_per_min)?;
        write!(out, "\t{},", self.tempo.lines_per_beat)?;
        write!(out, "\t{},", self.tempo.signature_numerator)?;
        write!(out, "\t{},", self.line_masks.len())?;
        let masks = self
            .line_masks
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        write!(out, "\t{{{masks}}}")?;
        write!(out, "}};")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fixed_field_order() {
        let tempo = Tempo {
            beats_per_min: 125,
            lines_per_beat: 4,
            signature_numerator: 4,
        };
        let record = SongRecord::new("demo".to_string(), tempo, vec![2, 8]);
        let mut out = Vec::new();
        record.write_to(&mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert_eq!(
            rendered,
            "static struct song song_data_demo = {\t125,\t4,\t4,\t2,\t{2,8}};"
        );
    }

    #[test]
    fn renders_empty_mask_list() {
        let record = SongRecord::new("empty".to_string(), Tempo::default(), vec![]);
        let mut out = Vec::new();
        record.write_to(&mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert_eq!(
            rendered,
            "static struct song song_data_empty = {\t0,\t0,\t0,\t0,\t{}};"
        );
    }
}
