use clap::{App, Arg};

pub struct Args {
    /// Diary export to read; prompted for when absent.
    pub csv_file: Option<String>,
    pub sort: String,
    pub export: Option<String>,
}

impl Args {
    pub fn parse() -> Self {
        let matches = App::new("letterboxd_diary")
            .version("0.1.0")
            .about("Reads a Letterboxd diary.csv export and prints your watched movies")
            .arg(Arg::with_name("csv_file")
                .takes_value(true).help("path of the diary.csv file to read from"))
            .arg(Arg::with_name("sort")
                .short("s").long("sort").takes_value(true).default_value("recent")
                .possible_values(&["recent", "oldest", "title", "rating", "1", "2", "3", "4"])
                .help("order to display movies in"))
            .arg(Arg::with_name("export")
                .short("o").long("export").takes_value(true)
                .help("also write the sorted diary to this CSV file"))
            .get_matches();

        Self {
            csv_file: matches.value_of("csv_file").map(String::from),
            sort: matches.value_of("sort").unwrap_or_default().to_string(),
            export: matches.value_of("export").map(String::from),
        }
    }
}
