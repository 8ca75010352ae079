use crate::SongError;
use roxmltree::{Document, Node};

// Element shape follows the tracker's XML song export: lookups are by tag
// name from the document root, the root tag name itself does not matter.

/// Largest instrument index that still fits in a 32 bit line mask.
///
/// Instruments above this would shift out of the mask; such documents are
/// rejected during parsing instead of wrapping.
pub const MAX_INSTRUMENT: u32 = 31;

#[derive(Debug, PartialEq, Eq, Default)]
pub struct Song {
    pub tempo: Tempo,
    /// Pattern pool indices in playback order, duplicates allowed.
    pub pattern_sequence: Vec<usize>,
    /// The pattern pool, document order = pool index.
    pub patterns: Vec<Pattern>,
}

impl Song {
    /// Number of output lines of the fully expanded sequence.
    pub fn total_lines(&self) -> usize {
        self.pattern_sequence
            .iter()
            .filter_map(|&pattern_index| self.patterns.get(pattern_index))
            .map(|pattern| pattern.number_of_lines)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tempo {
    pub beats_per_min: u32,
    pub lines_per_beat: u32,
    pub signature_numerator: u32, // always 4 in the exports seen so far
}

#[derive(Debug, PartialEq, Eq, Default)]
pub struct Pattern {
    pub number_of_lines: usize,
    pub tracks: Vec<Track>,
}

#[derive(Debug, PartialEq, Eq, Default)]
pub struct Track {
    /// Sparse: one entry per populated line, keyed by `LineEntry::index`.
    pub lines: Vec<LineEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEntry {
    /// 0-based line within the owning pattern.
    pub index: usize,
    pub instrument: u32,
}

/// Find a direct child element by tag name.
fn child<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> Result<Node<'a, 'input>, SongError> {
    node.children().find(|n| n.has_tag_name(name)).ok_or_else(|| {
        SongError::MalformedInput(format!(
            "missing element <{name}> under <{}>",
            node.tag_name().name()
        ))
    })
}

/// Integer text content of a direct child element.
fn child_int<T: std::str::FromStr>(node: Node, name: &'static str) -> Result<T, SongError> {
    let text = child(node, name)?.text().unwrap_or_default().trim();
    text.parse().map_err(|_| {
        SongError::MalformedInput(format!("non-numeric text {text:?} in element <{name}>"))
    })
}

pub fn parse_song_xml(xml: &str) -> Result<Song, SongError> {
    let doc = Document::parse(xml).map_err(|err| {
        log::error!("Failed to parse song document: {err}");
        SongError::MalformedInput(format!("invalid XML: {err}"))
    })?;
    let root = doc.root_element();

    let song_data = child(root, "GlobalSongData")?;
    let tempo = Tempo {
        beats_per_min: child_int(song_data, "BeatsPerMin")?,
        lines_per_beat: child_int(song_data, "LinesPerBeat")?,
        signature_numerator: child_int(song_data, "SignatureNumerator")?,
    };

    // every element child of <SequenceEntries> is one sequence entry
    let entries = child(child(root, "PatternSequence")?, "SequenceEntries")?;
    let pattern_sequence = entries
        .children()
        .filter(Node::is_element)
        .map(|entry| child_int(entry, "Pattern"))
        .collect::<Result<Vec<usize>, _>>()?;

    let pool = child(child(root, "PatternPool")?, "Patterns")?;
    let patterns = pool
        .children()
        .filter(Node::is_element)
        .map(parse_pattern)
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "parsed song: {} sequence entries over a pool of {} patterns",
        pattern_sequence.len(),
        patterns.len()
    );

    Ok(Song {
        tempo,
        pattern_sequence,
        patterns,
    })
}

fn parse_pattern(node: Node) -> Result<Pattern, SongError> {
    let number_of_lines = child_int(node, "NumberOfLines")?;
    let tracks = child(node, "Tracks")?
        .children()
        .filter(|n| n.has_tag_name("PatternTrack"))
        .map(parse_track)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Pattern {
        number_of_lines,
        tracks,
    })
}

fn parse_track(node: Node) -> Result<Track, SongError> {
    // <Lines> is absent entirely for tracks without triggers
    let lines = match node.children().find(|n| n.has_tag_name("Lines")) {
        Some(lines) => lines
            .children()
            .filter(|n| n.has_tag_name("Line"))
            .map(parse_line_entry)
            .collect::<Result<Vec<_>, _>>()?,
        None => vec![],
    };
    Ok(Track { lines })
}

fn parse_line_entry(node: Node) -> Result<LineEntry, SongError> {
    let index = node
        .attribute("index")
        .ok_or_else(|| SongError::MalformedInput("missing index attribute on <Line>".to_string()))?;
    let index = index.parse().map_err(|_| {
        SongError::MalformedInput(format!("non-numeric index attribute {index:?} on <Line>"))
    })?;

    // only the first note column of a line triggers an instrument
    let column = child(child(node, "NoteColumns")?, "NoteColumn")?;
    let instrument = child_int(column, "Instrument")?;
    if instrument > MAX_INSTRUMENT {
        return Err(SongError::MalformedInput(format!(
            "instrument {instrument} does not fit in a 32 bit line mask (max {MAX_INSTRUMENT})"
        )));
    }

    Ok(LineEntry { index, instrument })
}
