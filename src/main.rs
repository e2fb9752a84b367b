use letterboxd_diary::args::Args;
use letterboxd_diary::diary::{Diary, SkippedLine};
use letterboxd_diary::errors::DiaryError;
use letterboxd_diary::logging;
use letterboxd_diary::report::{Report, SortMode};
use letterboxd_diary::source::{ArgumentResolver, PromptResolver, SourceResolver};
use std::error::Error;
use std::io;
use std::panic;
use std::path::Path;
use std::process;

const RULE: &str = "========================================";

fn main() {
    logging::setup_logging();
    let args = Args::parse();

    // Any error or panic from here on ends in a message and a clean exit.
    let code = match panic::catch_unwind(|| run(args)) {
        Ok(Ok(())) => 0,
        Ok(Err(err)) => {
            eprintln!("\nERROR: {}", err);
            if err.downcast_ref::<DiaryError>().is_some() {
                eprintln!("Please check that:");
                eprintln!("  - The file path is correct");
                eprintln!("  - The file exists");
                eprintln!("  - You have permission to read the file");
            }
            1
        }
        Err(_) => {
            eprintln!("\nERROR: an unknown error occurred");
            1
        }
    };

    process::exit(code);
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mode: SortMode = args.sort.parse()?;

    let mut resolver: Box<dyn SourceResolver> = match &args.csv_file {
        Some(path) => Box::new(ArgumentResolver::new(path)),
        None => Box::new(PromptResolver::new(io::stdin().lock(), io::stdout())),
    };

    let path = match resolver.resolve()? {
        Some(path) => path,
        None => {
            println!("No file selected.");
            return Ok(());
        }
    };

    println!("\nReading file: {}\n", path.display());
    let (records, skipped) = Diary::try_from(path)?.into_parts();

    if records.is_empty() {
        println!("{}", RULE);
        println!("No movies found in the diary.");
        println!("{}", RULE);
        println!();
        println!("Troubleshooting tips:");
        println!("- Make sure you selected 'diary.csv' (not 'watched.csv' or other files)");
        println!("- Check that the file isn't empty");
        println!("- Try extracting the ZIP export again");
        print_skipped(&skipped);
        return Ok(());
    }

    println!("{}", RULE);
    println!("Found {} watched movies!", records.len());
    println!("{}\n", RULE);

    let report = Report::new(records, mode);
    print!("{}", report);
    print_skipped(&skipped);

    if let Some(export) = &args.export {
        report.export(Path::new(export))?;
        log::info!("wrote sorted diary to {}", export);
    }

    Ok(())
}

fn print_skipped(skipped: &[SkippedLine]) {
    if skipped.is_empty() {
        return;
    }

    println!("\nSkipped {} malformed line(s):", skipped.len());
    for line in skipped {
        println!("  {}", line);
    }
}
