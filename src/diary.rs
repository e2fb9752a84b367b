use crate::errors::{DiaryError, LineError};
use crate::parser::{parse_line, safe_to_f64};
use serde::Serialize;
use std::fmt;
use std::fmt::Formatter;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::str::FromStr;

/// The smallest number of fields a line needs to become a record: the
/// diary date and the movie name.
const MIN_FIELDS: usize = 2;

/// The rewatch flag value that explicitly marks a first viewing.
const NOT_A_REWATCH: &str = "No";

/// A single watched-movie entry from a Letterboxd diary export.
///
/// Columns follow the export's fixed order. Any column missing from the
/// source line is an empty string.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MovieRecord {
    /// The date the diary entry was logged.
    #[serde(rename = "Date")]
    date: String,

    #[serde(rename = "Name")]
    name: String,

    /// Release year of the movie.
    #[serde(rename = "Year")]
    year: String,

    #[serde(rename = "Letterboxd URI")]
    source_uri: String,

    /// Rating text on a 0-5 scale in half-point steps, or empty if unrated.
    #[serde(rename = "Rating")]
    rating: String,

    /// "Yes", "No" or empty.
    #[serde(rename = "Rewatch")]
    rewatch: String,

    #[serde(rename = "Tags")]
    tags: String,

    /// The day the movie was actually watched, which may differ from the
    /// day it was logged.
    #[serde(rename = "Watched Date")]
    watched_date: String,
}

impl MovieRecord {
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn source_uri(&self) -> &str {
        &self.source_uri
    }

    pub fn rating(&self) -> &str {
        &self.rating
    }

    pub fn rewatch(&self) -> &str {
        &self.rewatch
    }

    pub fn tags(&self) -> &str {
        &self.tags
    }

    pub fn watched_date(&self) -> &str {
        &self.watched_date
    }

    /// The numeric rating, with unrated and malformed ratings reading as 0.
    pub fn rating_value(&self) -> f64 {
        safe_to_f64(&self.rating)
    }

    /// Whether the entry carries a rating that counts towards statistics.
    pub fn is_rated(&self) -> bool {
        !self.rating.is_empty() && self.rating_value() != 0.0
    }

    /// Whether the entry is flagged as a repeat viewing. Any non-empty flag
    /// other than "No" counts.
    pub fn is_rewatch(&self) -> bool {
        !self.rewatch.is_empty() && self.rewatch != NOT_A_REWATCH
    }

    /// The best known viewing date: the watched date when present, the
    /// diary date otherwise.
    pub fn watched_on(&self) -> &str {
        if self.watched_date.is_empty() {
            &self.date
        } else {
            &self.watched_date
        }
    }
}

impl TryFrom<Vec<String>> for MovieRecord {
    type Error = LineError;

    /// Maps parsed fields onto the diary columns by position. Fields past
    /// the eighth column are ignored.
    fn try_from(fields: Vec<String>) -> Result<Self, Self::Error> {
        if fields.len() < MIN_FIELDS {
            return Err(LineError::TooFewFields(fields.len()));
        }

        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        let record = MovieRecord {
            date: next(),
            name: next(),
            year: next(),
            source_uri: next(),
            rating: next(),
            rewatch: next(),
            tags: next(),
            watched_date: next(),
        };

        if record.name.is_empty() {
            return Err(LineError::MissingName);
        }

        Ok(record)
    }
}

impl FromStr for MovieRecord {
    type Err = LineError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        MovieRecord::try_from(parse_line(line))
    }
}

/// A diary line that was dropped during ingestion, kept for diagnostics.
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based physical line number; the header is line 1.
    pub line: usize,
    pub error: LineError,
}

impl fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// The records read from a diary export, in file order, along with any lines
/// that had to be skipped.
#[derive(Debug, Default)]
pub struct Diary {
    entries: Vec<MovieRecord>,
    skipped: Vec<SkippedLine>,
}

impl Diary {
    /// Reads a diary export line by line.
    ///
    /// The first line is the header and is discarded without validation.
    /// Blank lines are ignored. Lines that can not be turned into a record
    /// are collected in [`Diary::skipped`] and reading carries on with the
    /// next line.
    ///
    /// Only a failure on the very first read is returned as an error, since
    /// that means the source could not be read at all. A read failure later
    /// on is recorded as a skipped line and ends ingestion with whatever was
    /// read up to that point.
    pub fn from_reader<R: BufRead>(mut reader: R) -> io::Result<Self> {
        let mut diary = Diary::default();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => line_number += 1,
                Err(err) if line_number == 0 => return Err(err),
                Err(err) => {
                    diary.skip(line_number + 1, LineError::from(err));
                    break;
                }
            }

            let line = strip_line_ending(&buf);
            if line_number == 1 {
                log::debug!("diary header: {}", String::from_utf8_lossy(line));
                continue;
            }

            if line.is_empty() {
                continue;
            }

            let entry = String::from_utf8(line.to_vec())
                .map_err(LineError::from)
                .and_then(|text| text.parse::<MovieRecord>());

            match entry {
                Ok(record) => diary.entries.push(record),
                Err(err) => diary.skip(line_number, err),
            }
        }

        log::info!(
            "read {} movies from diary ({} line(s) skipped)",
            diary.entries.len(),
            diary.skipped.len()
        );

        Ok(diary)
    }

    pub fn entries(&self) -> &[MovieRecord] {
        &self.entries
    }

    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Splits the diary into its records and its skipped-line diagnostics.
    pub fn into_parts(self) -> (Vec<MovieRecord>, Vec<SkippedLine>) {
        (self.entries, self.skipped)
    }

    fn skip(&mut self, line: usize, error: LineError) {
        log::warn!("skipping diary line {}: {}", line, error);
        self.skipped.push(SkippedLine { line, error });
    }
}

impl TryFrom<PathBuf> for Diary {
    type Error = DiaryError;

    /// Opens the diary export at the provided path and reads it.
    ///
    /// Malformed lines never fail the whole read; only a source that can
    /// not be opened or read returns an error.
    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(source) => return Err(DiaryError::SourceUnavailable { path, source }),
        };

        Diary::from_reader(BufReader::new(file))
            .map_err(|source| DiaryError::SourceUnavailable { path, source })
    }
}

/// Drops the trailing line feed and, if present, one carriage return.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
