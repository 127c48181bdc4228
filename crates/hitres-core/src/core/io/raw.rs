use crate::core::io::traits::{HitsFile, OutputLine};
use crate::core::models::collection::HitCollection;
use crate::core::models::hit::Hit;
use crate::core::models::segment::{ResIdx, Segment, format_segments};
use crate::core::scoring::score_type::ScoreType;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HitsFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: HitsFileParseErrorKind,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HitsFileParseErrorKind {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),
    #[error("Unexpected trailing field '{0}'")]
    TrailingField(String),
    #[error("Invalid score '{0}'")]
    InvalidScore(String),
    #[error("Invalid segment '{0}' (expected '<start>-<stop>')")]
    InvalidSegment(String),
}

/// The whitespace-delimited raw hit-list format.
///
/// Each non-blank line describes one hit:
///
/// ```text
/// <query-id> <match-id> <score> <start>-<stop>[,<start>-<stop>...]
/// ```
///
/// Lines starting with `#` are comments. The format does not record how scores are to be
/// read, so readers are told the [`ScoreType`] by the caller.
pub struct RawHitsFile;

impl HitsFile for RawHitsFile {
    type Error = HitsFileError;

    fn read_from(
        reader: &mut impl BufRead,
        score_type: ScoreType,
    ) -> Result<Vec<HitCollection>, Self::Error> {
        let mut collections: Vec<HitCollection> = Vec::new();
        let mut query_positions: HashMap<String, usize> = HashMap::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (query_id, hit) =
                parse_hit_line(trimmed, score_type).map_err(|kind| HitsFileError::Parse {
                    line: line_num + 1,
                    kind,
                })?;

            let position = *query_positions
                .entry(query_id.to_string())
                .or_insert_with(|| {
                    collections.push(HitCollection::new(query_id));
                    collections.len() - 1
                });
            collections[position].push(hit);
        }

        Ok(collections)
    }

    fn write_lines<'a>(
        query_id: &str,
        lines: impl IntoIterator<Item = OutputLine<'a>>,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        for line in lines {
            match line {
                OutputLine::Selected {
                    hit,
                    resolved_segments,
                } => writeln!(
                    writer,
                    "{} {} {} {} {}",
                    query_id,
                    hit.label,
                    format_score(hit.score),
                    format_segments(&hit.segments),
                    format_segments(resolved_segments)
                )?,
                OutputLine::Rejected { hit, reason } => {
                    writeln!(writer, "# rejected {} {} {}", query_id, hit.label, reason)?
                }
            }
        }
        Ok(())
    }
}

fn parse_hit_line(
    line: &str,
    score_type: ScoreType,
) -> Result<(&str, Hit), HitsFileParseErrorKind> {
    let mut fields = line.split_whitespace();
    let query_id = fields
        .next()
        .ok_or(HitsFileParseErrorKind::MissingField("query-id"))?;
    let match_id = fields
        .next()
        .ok_or(HitsFileParseErrorKind::MissingField("match-id"))?;
    let score_str = fields
        .next()
        .ok_or(HitsFileParseErrorKind::MissingField("score"))?;
    let segments_str = fields
        .next()
        .ok_or(HitsFileParseErrorKind::MissingField("segments"))?;
    if let Some(extra) = fields.next() {
        return Err(HitsFileParseErrorKind::TrailingField(extra.to_string()));
    }

    let score = score_str
        .parse::<f64>()
        .map_err(|_| HitsFileParseErrorKind::InvalidScore(score_str.to_string()))?;
    let segments = segments_str
        .split(',')
        .map(parse_segment)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((query_id, Hit::new(match_id, segments, score, score_type)))
}

/// Parses `<start>-<stop>`. Inverted ranges are accepted here and reported by validation.
fn parse_segment(text: &str) -> Result<Segment, HitsFileParseErrorKind> {
    let invalid = || HitsFileParseErrorKind::InvalidSegment(text.to_string());
    let (start, stop) = text.split_once('-').ok_or_else(invalid)?;
    let start = start.parse::<ResIdx>().map_err(|_| invalid())?;
    let stop = stop.parse::<ResIdx>().map_err(|_| invalid())?;
    Ok(Segment::new(start, stop))
}

/// Formats a score compactly, switching to exponent notation for very small or large values.
fn format_score(score: f64) -> String {
    let magnitude = score.abs();
    if score != 0.0 && !(1e-4..1e9).contains(&magnitude) {
        format!("{score:e}")
    } else {
        format!("{score}")
    }
}
