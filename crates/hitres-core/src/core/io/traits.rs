use crate::core::models::collection::HitCollection;
use crate::core::models::hit::Hit;
use crate::core::models::segment::Segment;
use crate::core::scoring::score_type::ScoreType;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// One line of resolution output for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputLine<'a> {
    /// A hit kept in the final architecture, with its boundary-resolved segments.
    Selected {
        hit: &'a Hit,
        resolved_segments: &'a [Segment],
    },
    /// A hit left out of the architecture, with the reason it was dropped.
    Rejected { hit: &'a Hit, reason: &'a str },
}

/// Defines the interface for reading and writing hit-list formats.
///
/// This trait provides a common API for hit-list I/O, supporting reading the candidate
/// hits of any number of queries and writing the resolved architecture of one query.
pub trait HitsFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads all hits from a buffered reader, grouped by query.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `score_type` - The interpretation of the scores in the input.
    ///
    /// # Return
    ///
    /// Returns one collection per query, in order of first appearance.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(
        reader: &mut impl BufRead,
        score_type: ScoreType,
    ) -> Result<Vec<HitCollection>, Self::Error>;

    /// Writes the resolution output lines of one query.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_lines<'a>(
        query_id: &str,
        lines: impl IntoIterator<Item = OutputLine<'a>>,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Reads all hits from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        score_type: ScoreType,
    ) -> Result<Vec<HitCollection>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, score_type)
    }
}
