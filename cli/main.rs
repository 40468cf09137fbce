//! This module contains the main entrypoint to the datasight cli.

use anyhow::Result;
use clap::Clap;
use colored::Colorize;
use datasight_core::progress::{Progress, StatsProgress};
use datasight_core::report::SkippedStatistic;
use std::path::PathBuf;

mod format;

#[derive(Clap)]
#[clap(
	about = "Profile the quality of a tabular dataset.",
	setting = clap::AppSettings::DisableHelpSubcommand,
)]
enum Options {
	#[clap(name = "profile")]
	Profile(Box<ProfileOptions>),
}

#[derive(Clap, Debug)]
#[clap(about = "profile a dataset")]
#[clap(long_about = "profile a csv file and print a data quality report")]
struct ProfileOptions {
	#[clap(short, long, about = "the path to your .csv file")]
	file: PathBuf,
	#[clap(short, long, about = "the path to a config file")]
	config: Option<PathBuf>,
	#[clap(long, about = "the name of a column to treat as categorical")]
	categorical: Vec<String>,
	#[clap(long, about = "the name of a column to treat as numeric")]
	numeric: Vec<String>,
	#[clap(long, about = "print the report as json")]
	json: bool,
	#[clap(short, long, about = "the path to write the report to")]
	output: Option<PathBuf>,
	#[clap(long = "no-progress", about = "disable progress messages", parse(from_flag = std::ops::Not::not))]
	progress: bool,
}

fn main() {
	let options = Options::parse();
	let result = match options {
		Options::Profile(options) => cli_profile(*options),
	};
	if let Err(error) = result {
		eprintln!("{}: {}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn cli_profile(options: ProfileOptions) -> Result<()> {
	let profile_options = datasight_core::ProfileOptions {
		categorical_columns: if options.categorical.is_empty() {
			None
		} else {
			Some(options.categorical.clone())
		},
		numeric_columns: if options.numeric.is_empty() {
			None
		} else {
			Some(options.numeric.clone())
		},
	};
	let show_progress = options.progress;
	let report = datasight_core::profile(
		&options.file,
		options.config.as_deref(),
		profile_options,
		&mut |progress| {
			if show_progress {
				eprintln!("{}", progress_message(&progress));
			}
		},
	)?;

	for skipped in report.skipped_columns.iter() {
		let statistic = match skipped.statistic {
			SkippedStatistic::FrequencyTable => "the frequency table",
			SkippedStatistic::NumericSummary => "the numeric summary",
		};
		eprintln!(
			"{}: skipped {} for column \"{}\", which is missing from the dataset or is not the right kind of column",
			"warning".yellow().bold(),
			statistic,
			skipped.column_name,
		);
	}

	let output_text = if options.json {
		serde_json::to_string_pretty(&report)?
	} else {
		format::format_report(&report)
	};
	match &options.output {
		Some(output_path) => {
			std::fs::write(output_path, output_text)?;
			eprintln!("Your report was written to {}.", output_path.display());
		}
		None => print!("{}", output_text),
	}

	Ok(())
}

fn progress_message(progress: &Progress) -> &'static str {
	match progress {
		Progress::Loading(_) => "loading the dataset",
		Progress::Stats(StatsProgress::NullCounts(_)) => "counting null values",
		Progress::Stats(StatsProgress::UniqueCounts(_)) => "counting unique values",
		Progress::Stats(StatsProgress::FrequencyTables(_)) => "tabulating value frequencies",
		Progress::Stats(StatsProgress::NumericSummaries(_)) => "computing numeric summaries",
	}
}
