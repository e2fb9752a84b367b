use std::error::Error;
use std::fmt;
use std::fmt::Formatter;
use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

/// Returned when a diary source can not be opened or read at all. An empty
/// diary is not an error.
#[derive(Debug)]
pub enum DiaryError {
    SourceUnavailable { path: PathBuf, source: io::Error },
}

/// The reason a single diary line was dropped during ingestion.
#[derive(Debug)]
pub enum LineError {
    /// The line produced fewer than the two fields (date and name) needed
    /// for a record.
    TooFewFields(usize),

    /// The line had enough fields but the name column was blank.
    MissingName,

    /// The line was not valid UTF-8.
    InvalidEncoding(FromUtf8Error),

    /// Reading the line from the underlying source failed. Ingestion stops
    /// after this, keeping what was read so far.
    Read(io::Error),
}

#[derive(Debug)]
pub enum ExportError {
    SerializeError(csv::Error),
    EncodingError(FromUtf8Error),
    WriteError(PathBuf, io::Error),
}

#[derive(Debug, PartialEq)]
pub struct ParseSortModeError {
    input: String,
}

impl ParseSortModeError {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

impl fmt::Display for DiaryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DiaryError::SourceUnavailable { path, source } => write!(
                f,
                "could not open diary file '{}': {}",
                path.display(),
                source
            ),
        }
    }
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LineError::TooFewFields(found) => write!(
                f,
                "diary entries MUST have at least a date and a name, but only {} field(s) were found",
                found
            ),
            LineError::MissingName => write!(f, "diary entry has an empty name"),
            LineError::InvalidEncoding(err) => write!(f, "line is not valid UTF-8: {}", err),
            LineError::Read(err) => write!(f, "failed to read line: {}", err),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::SerializeError(err) => {
                write!(f, "failed to serialize diary record: {}", err)
            }
            ExportError::EncodingError(err) => write!(f, "failed to encode csv export: {}", err),
            ExportError::WriteError(path, err) => {
                write!(f, "failed to write export to '{}': {}", path.display(), err)
            }
        }
    }
}

impl fmt::Display for ParseSortModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sort mode '{}', expected one of recent, oldest, title, rating (or 1-4)",
            self.input
        )
    }
}

impl From<FromUtf8Error> for LineError {
    fn from(err: FromUtf8Error) -> Self {
        LineError::InvalidEncoding(err)
    }
}

impl From<io::Error> for LineError {
    fn from(err: io::Error) -> Self {
        LineError::Read(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::SerializeError(err)
    }
}

impl From<FromUtf8Error> for ExportError {
    fn from(err: FromUtf8Error) -> Self {
        ExportError::EncodingError(err)
    }
}

impl Error for DiaryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DiaryError::SourceUnavailable { source, .. } => Some(source),
        }
    }
}

impl Error for LineError {}
impl Error for ExportError {}
impl Error for ParseSortModeError {}
