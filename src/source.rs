use crate::parser::trim_field;
use std::io;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Supplies the path of the diary export to read.
///
/// Keeping this behind a trait lets the rest of the program run without a
/// terminal attached.
pub trait SourceResolver {
    /// Returns the chosen path, or `None` if no file was selected.
    fn resolve(&mut self) -> io::Result<Option<PathBuf>>;
}

/// Uses a path that was already provided, e.g. on the command line.
pub struct ArgumentResolver {
    path: PathBuf,
}

impl ArgumentResolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SourceResolver for ArgumentResolver {
    fn resolve(&mut self) -> io::Result<Option<PathBuf>> {
        Ok(Some(self.path.clone()))
    }
}

/// Asks for the path on `output` and reads a single line from `input`.
///
/// Paths dropped onto a terminal are often wrapped in quotes, so the answer
/// is trimmed of surrounding whitespace and quotes. A blank answer means no
/// file was selected.
pub struct PromptResolver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> SourceResolver for PromptResolver<R, W> {
    fn resolve(&mut self) -> io::Result<Option<PathBuf>> {
        writeln!(self.output, "Enter the full path to diary.csv")?;
        writeln!(
            self.output,
            "(Tip: you can drag and drop the file into this window)"
        )?;
        write!(self.output, "Path: ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        let path = trim_field(&answer);
        if path.is_empty() {
            return Ok(None);
        }

        Ok(Some(PathBuf::from(path)))
    }
}
