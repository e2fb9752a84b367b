use crate::diary::MovieRecord;
use crate::errors::{ExportError, ParseSortModeError};
use crate::parser::safe_to_f64;
use std::fmt;
use std::fmt::Formatter;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const STAR: &str = "*";
const HALF_STAR: &str = "½";

/// Upper bound on whole stars drawn for a single rating, so an absurd value
/// such as "1e300" can't exhaust memory.
const MAX_STARS: f64 = 100.0;

/// The order in which diary entries are displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortMode {
    /// File order. Letterboxd exports list the most recent entry first.
    #[default]
    Recent,

    /// Reverse file order.
    Oldest,

    /// Ascending by title, compared byte-wise so upper case sorts first.
    Title,

    /// Highest rated first. Unrated entries sort last.
    Rating,
}

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    /// Accepts the mode names as well as the digits of the original
    /// interactive menu. An empty string selects the default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "1" | "recent" => Ok(SortMode::Recent),
            "2" | "oldest" => Ok(SortMode::Oldest),
            "3" | "title" => Ok(SortMode::Title),
            "4" | "rating" => Ok(SortMode::Rating),
            _ => Err(ParseSortModeError::new(s)),
        }
    }
}

/// Aggregate figures over a set of diary entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statistics {
    pub total: usize,

    /// Entries with a non-zero rating. A rating of exactly 0 can't be told
    /// apart from "unrated" and is left out.
    pub rated: usize,

    /// Sum of all counted ratings.
    pub rating_sum: f64,

    pub rewatches: usize,
}

impl Statistics {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a MovieRecord>,
    {
        let mut stats = Statistics::default();

        for record in records {
            stats.total += 1;

            if record.is_rated() {
                stats.rated += 1;
                stats.rating_sum += record.rating_value();
            }

            if record.is_rewatch() {
                stats.rewatches += 1;
            }
        }

        stats
    }

    /// The mean of all counted ratings, if any entry was rated.
    pub fn average_rating(&self) -> Option<f64> {
        if self.rated == 0 {
            return None;
        }

        Some(self.rating_sum / self.rated as f64)
    }
}

/// Renders rating text as stars, e.g. "4.5" becomes "**** ½ (4.5/5)".
///
/// Ratings that are empty, zero or unparsable render as an empty string.
/// The 0-5 range is not enforced: "7" renders seven stars.
pub fn rating_to_stars(rating: &str) -> String {
    let value = safe_to_f64(rating);
    if value == 0.0 {
        return String::new();
    }

    let whole = value.trunc();
    let mut stars = STAR.repeat(whole.clamp(0.0, MAX_STARS) as usize);

    if value - whole >= 0.5 {
        if !stars.is_empty() {
            stars.push(' ');
        }
        stars.push_str(HALF_STAR);
    }

    if stars.is_empty() {
        return format!("({}/5)", rating);
    }

    format!("{} ({}/5)", stars, rating)
}

/// A display-ordered view over the diary entries plus their statistics.
///
/// The report owns the entries in file order and only keeps an index order
/// for display, so re-sorting never changes the canonical sequence.
#[derive(Debug)]
pub struct Report {
    records: Vec<MovieRecord>,
    order: Vec<usize>,
    mode: SortMode,
    statistics: Statistics,
}

impl Report {
    pub fn new(records: Vec<MovieRecord>, mode: SortMode) -> Self {
        let statistics = Statistics::from_records(&records);
        let order = display_order(&records, mode);

        Self {
            records,
            order,
            mode,
            statistics,
        }
    }

    /// Switches to a different display order.
    pub fn sort_by(&mut self, mode: SortMode) {
        self.order = display_order(&self.records, mode);
        self.mode = mode;
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    /// The entries in file order, regardless of the display order.
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// The entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = &MovieRecord> + '_ {
        self.order.iter().map(move |&i| &self.records[i])
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Serializes the entries, in display order, as a Letterboxd-style CSV
    /// document.
    pub fn to_csv(&self) -> Result<String, ExportError> {
        let mut buf = Vec::new();
        {
            let mut wtr = csv::Writer::from_writer(&mut buf);

            for record in self.entries() {
                wtr.serialize(record)?;
            }

            wtr.flush().map_err(csv::Error::from)?;
        }

        Ok(String::from_utf8(buf)?)
    }

    /// Writes the CSV export to the provided path, replacing any existing
    /// file.
    pub fn export(&self, path: &Path) -> Result<(), ExportError> {
        let contents = self.to_csv()?;
        fs::write(path, contents).map_err(|err| ExportError::WriteError(path.to_path_buf(), err))
    }
}

/// The human-readable listing followed by the summary lines.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, record) in self.entries().enumerate() {
            write!(f, "{}. {}", i + 1, record.name())?;
            if !record.year().is_empty() {
                write!(f, " ({})", record.year())?;
            }
            writeln!(f)?;

            if !record.watched_on().is_empty() {
                writeln!(f, "   Watched: {}", record.watched_on())?;
            }

            let stars = rating_to_stars(record.rating());
            if !stars.is_empty() {
                writeln!(f, "   Rating: {}", stars)?;
            }

            if record.is_rewatch() {
                writeln!(f, "   [REWATCH]")?;
            }

            if !record.tags().is_empty() {
                writeln!(f, "   Tags: {}", record.tags())?;
            }

            writeln!(f)?;
        }

        writeln!(f, "Total movies watched: {}", self.statistics.total)?;

        if let Some(average) = self.statistics.average_rating() {
            writeln!(
                f,
                "Average rating: {:.2}/5 (based on {} rated films)",
                average, self.statistics.rated
            )?;
        }

        if self.statistics.rewatches > 0 {
            writeln!(f, "Rewatches: {}", self.statistics.rewatches)?;
        }

        Ok(())
    }
}

/// Computes display indices for the given mode. All sorts are stable, so
/// entries with equal keys keep their file order.
fn display_order(records: &[MovieRecord], mode: SortMode) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();

    match mode {
        SortMode::Recent => {}
        SortMode::Oldest => order.reverse(),
        SortMode::Title => order.sort_by(|&a, &b| records[a].name().cmp(records[b].name())),
        SortMode::Rating => order.sort_by(|&a, &b| {
            records[b]
                .rating_value()
                .total_cmp(&records[a].rating_value())
        }),
    }

    order
}
