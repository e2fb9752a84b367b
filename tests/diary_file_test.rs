use letterboxd_diary::diary::Diary;
use letterboxd_diary::errors::{DiaryError, LineError};
use letterboxd_diary::report::{Report, SortMode};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const DIARY: &str = "\
Date,Name,Year,Letterboxd URI,Rating,Rewatch,Tags,Watched Date\r
2024-03-04,\"Good, the Bad and the Ugly, The\",1966,https://boxd.it/a,5,Yes,western,2024-03-03\r
2024-03-02,Heat,1995,https://boxd.it/b,4,,,\r
\r
2024-03-01\r
2024-02-28,Brazil,1985,https://boxd.it/c,4,No,\"dystopia, gilliam\",\r
2024-02-20,Alien,1979,https://boxd.it/d\r
";

fn write_diary(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn should_read_diary_export_from_disk() {
    let file = write_diary(DIARY);

    let diary = Diary::try_from(file.path().to_path_buf()).unwrap();

    let names: Vec<&str> = diary.entries().iter().map(|r| r.name()).collect();
    assert_eq!(
        names,
        vec!["Good, the Bad and the Ugly, The", "Heat", "Brazil", "Alien"]
    );
    assert_eq!(diary.entries()[2].tags(), "dystopia, gilliam");

    // Only the single-field line is reported; the blank line is not.
    assert_eq!(diary.skipped().len(), 1);
    assert_eq!(diary.skipped()[0].line, 5);
    assert!(matches!(diary.skipped()[0].error, LineError::TooFewFields(1)));
}

#[test]
fn should_build_report_from_diary() {
    let file = write_diary(DIARY);
    let (records, _) = Diary::try_from(file.path().to_path_buf())
        .unwrap()
        .into_parts();

    let report = Report::new(records, SortMode::Rating);

    let names: Vec<&str> = report.entries().map(|r| r.name()).collect();
    assert_eq!(
        names,
        vec!["Good, the Bad and the Ugly, The", "Heat", "Brazil", "Alien"]
    );

    let stats = report.statistics();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.rated, 3);
    assert_eq!(stats.average_rating(), Some(13.0 / 3.0));
    assert_eq!(stats.rewatches, 1);

    let rendered = report.to_string();
    assert!(rendered.contains("1. Good, the Bad and the Ugly, The (1966)\n   Watched: 2024-03-03\n"));
    assert!(rendered.contains("Average rating: 4.33/5 (based on 3 rated films)\n"));
}

#[test]
fn should_distinguish_header_only_diary_from_missing_file() {
    let file = write_diary("Date,Name,Year,Letterboxd URI,Rating,Rewatch,Tags,Watched Date\n");
    let diary = Diary::try_from(file.path().to_path_buf()).unwrap();
    assert!(diary.is_empty());

    let missing = PathBuf::from(file.path()).with_extension("missing");
    let err = Diary::try_from(missing).unwrap_err();
    assert!(matches!(err, DiaryError::SourceUnavailable { .. }));
}

#[test]
fn should_report_directory_as_unavailable_source() {
    let dir = tempfile::tempdir().unwrap();

    let err = Diary::try_from(dir.path().to_path_buf()).unwrap_err();
    assert!(matches!(err, DiaryError::SourceUnavailable { .. }));
}
