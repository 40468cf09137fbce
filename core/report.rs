use crate::{
	classify::{classify, ColumnClassification},
	config::{self, Config},
	counts::{count_nulls, count_unique},
	frequency::{tabulate, FrequencyTable},
	progress::{Progress, StatsProgress},
	summary::{summarize, NumericSummary},
};
use anyhow::{Context, Result};
use datasight_table::{ColumnType, FromCsvOptions, InferOptions, Table, TableView};
use datasight_util::progress_counter::ProgressCounter;
use num_traits::ToPrimitive;
use std::{collections::BTreeMap, path::Path};

/// The assembled output of one profiling run. A report is created once per run and never modified afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Report {
	/// The classification the statistic computers ran with, whether inferred or supplied by the caller.
	pub classification: ColumnClassification,
	/// The number of missing cells in every column.
	pub null_counts: BTreeMap<String, u64>,
	/// The number of distinct non-missing values in every column.
	pub unique_counts: BTreeMap<String, u64>,
	/// A frequency table for each categorical column.
	pub frequency_tables: BTreeMap<String, FrequencyTable>,
	/// Descriptive statistics for each numeric column.
	pub numeric_summaries: BTreeMap<String, NumericSummary>,
	/// Requested columns that a statistic computer skipped instead of computing.
	pub skipped_columns: Vec<SkippedColumn>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SkippedColumn {
	pub column_name: String,
	pub statistic: SkippedStatistic,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum SkippedStatistic {
	FrequencyTable,
	NumericSummary,
}

/// Caller-supplied classification. When either list is present, the classifier does not run and both lists are taken from here, absent one meaning empty. Names that do not match a column of the right kind are skipped by the statistic computers and recorded in the report.
#[derive(Clone, Debug, Default)]
pub struct ProfileOptions {
	pub categorical_columns: Option<Vec<String>>,
	pub numeric_columns: Option<Vec<String>>,
}

/// Run the whole profiling pipeline: load the table from a csv file, classify its columns, and assemble the report. Loading is the only step that can fail, and a load failure aborts the run before any statistic is computed.
pub fn profile(
	file_path: &Path,
	config_path: Option<&Path>,
	options: ProfileOptions,
	update_progress: &mut dyn FnMut(Progress),
) -> Result<Report> {
	let config = config::load_config(config_path)?;
	let table = load_table(file_path, &config, update_progress)?;
	let table = table.view();
	let classification = choose_classification(&table, &options, &config);
	Ok(profile_table(&table, classification, update_progress))
}

/// Assemble a report for a table that is already loaded. The statistic computers run in a fixed order, nulls, uniques, frequency tables, numeric summaries, so two runs over the same table produce identical reports. This function cannot fail: problems with individual columns degrade that column's output instead.
pub fn profile_table(
	table: &TableView,
	classification: ColumnClassification,
	update_progress: &mut dyn FnMut(Progress),
) -> Report {
	let n_columns = table.ncols().to_u64().unwrap();
	let progress_counter = ProgressCounter::new(n_columns);
	update_progress(Progress::Stats(StatsProgress::NullCounts(
		progress_counter.clone(),
	)));
	let null_counts = count_nulls(table, || progress_counter.inc(1));
	let progress_counter = ProgressCounter::new(n_columns);
	update_progress(Progress::Stats(StatsProgress::UniqueCounts(
		progress_counter.clone(),
	)));
	let unique_counts = count_unique(table, || progress_counter.inc(1));
	let progress_counter =
		ProgressCounter::new(classification.categorical.len().to_u64().unwrap());
	update_progress(Progress::Stats(StatsProgress::FrequencyTables(
		progress_counter.clone(),
	)));
	let frequency = tabulate(table, &classification.categorical, || {
		progress_counter.inc(1)
	});
	let progress_counter = ProgressCounter::new(classification.numeric.len().to_u64().unwrap());
	update_progress(Progress::Stats(StatsProgress::NumericSummaries(
		progress_counter.clone(),
	)));
	let numeric = summarize(table, &classification.numeric, || progress_counter.inc(1));
	let mut skipped_columns = Vec::new();
	for column_name in frequency.skipped {
		skipped_columns.push(SkippedColumn {
			column_name,
			statistic: SkippedStatistic::FrequencyTable,
		});
	}
	for column_name in numeric.skipped {
		skipped_columns.push(SkippedColumn {
			column_name,
			statistic: SkippedStatistic::NumericSummary,
		});
	}
	Report {
		classification,
		null_counts,
		unique_counts,
		frequency_tables: frequency.tables,
		numeric_summaries: numeric.summaries,
		skipped_columns,
	}
}

/// A classification supplied by the caller takes precedence over one from the config file, which takes precedence over running the classifier.
fn choose_classification(
	table: &TableView,
	options: &ProfileOptions,
	config: &Option<Config>,
) -> ColumnClassification {
	if options.categorical_columns.is_some() || options.numeric_columns.is_some() {
		return ColumnClassification {
			categorical: options.categorical_columns.clone().unwrap_or_default(),
			numeric: options.numeric_columns.clone().unwrap_or_default(),
		};
	}
	if let Some(config) = config {
		if config.categorical_columns.is_some() || config.numeric_columns.is_some() {
			return ColumnClassification {
				categorical: config.categorical_columns.clone().unwrap_or_default(),
				numeric: config.numeric_columns.clone().unwrap_or_default(),
			};
		}
	}
	classify(table)
}

fn load_table(
	file_path: &Path,
	config: &Option<Config>,
	update_progress: &mut dyn FnMut(Progress),
) -> Result<Table> {
	let len = std::fs::metadata(file_path)
		.with_context(|| format!("failed to read the metadata of {}", file_path.display()))?
		.len();
	let progress_counter = ProgressCounter::new(len);
	update_progress(Progress::Loading(progress_counter.clone()));
	let column_types: Option<BTreeMap<String, ColumnType>> = config
		.as_ref()
		.and_then(|config| config.column_types.as_ref())
		.map(|column_types| {
			column_types
				.iter()
				.map(|(column_name, column_type)| {
					let column_type = match column_type {
						config::ColumnType::Unknown => ColumnType::Unknown,
						config::ColumnType::Number => ColumnType::Number,
						config::ColumnType::Boolean => ColumnType::Boolean,
						config::ColumnType::Enum { options } => ColumnType::Enum {
							options: options.clone(),
						},
						config::ColumnType::Text => ColumnType::Text,
					};
					(column_name.clone(), column_type)
				})
				.collect()
		});
	let infer_options = config
		.as_ref()
		.and_then(|config| config.enum_max_unique_values)
		.map(|enum_max_unique_values| InferOptions {
			enum_max_unique_values,
		})
		.unwrap_or_default();
	let invalid_values: Option<Vec<&str>> = config
		.as_ref()
		.and_then(|config| config.invalid_values.as_ref())
		.map(|invalid_values| {
			invalid_values
				.iter()
				.map(|invalid_value| invalid_value.as_str())
				.collect()
		});
	let table = Table::from_path(
		file_path,
		FromCsvOptions {
			column_types,
			infer_options,
			invalid_values: invalid_values
				.as_deref()
				.unwrap_or(datasight_table::DEFAULT_INVALID_VALUES),
		},
		|byte| progress_counter.set(byte),
	)
	.with_context(|| format!("failed to load the dataset from {}", file_path.display()))?;
	Ok(table)
}

#[cfg(test)]
use datasight_table::{Column, NumberColumn, TextColumn};

#[cfg(test)]
fn example_table() -> Table {
	Table {
		columns: vec![
			Column::Text(TextColumn {
				name: "name".to_owned(),
				data: vec![Some("alice".to_owned()), Some("bob".to_owned()), None],
			}),
			Column::Number(NumberColumn {
				name: "age".to_owned(),
				data: vec![30.0, 25.0, 40.0],
			}),
		],
	}
}

#[test]
fn test_profile_table() {
	let table = example_table();
	let table = table.view();
	let classification = classify(&table);
	assert_eq!(classification.categorical, vec!["name".to_owned()]);
	assert_eq!(classification.numeric, vec!["age".to_owned()]);
	let report = profile_table(&table, classification, &mut |_| {});
	assert_eq!(report.null_counts["name"], 1);
	assert_eq!(report.null_counts["age"], 0);
	assert_eq!(report.unique_counts["name"], 2);
	assert_eq!(report.unique_counts["age"], 3);
	assert_eq!(
		report.frequency_tables["name"].entries,
		vec![("alice".to_owned(), 1), ("bob".to_owned(), 1)],
	);
	let age = &report.numeric_summaries["age"];
	assert_eq!(age.count, 3);
	assert!((age.mean.unwrap() - 31.666666).abs() < 1e-4);
	assert_eq!(age.min, Some(25.0));
	assert_eq!(age.max, Some(40.0));
	assert!(report.skipped_columns.is_empty());
}

#[test]
fn test_profile_empty_table() {
	let table = Table::new(Vec::new(), Vec::new());
	let table = table.view();
	let classification = classify(&table);
	let report = profile_table(&table, classification, &mut |_| {});
	assert!(report.null_counts.is_empty());
	assert!(report.unique_counts.is_empty());
	assert!(report.frequency_tables.is_empty());
	assert!(report.numeric_summaries.is_empty());
	assert!(report.skipped_columns.is_empty());
}

#[test]
fn test_profile_table_with_absent_requested_column() {
	let table = example_table();
	let table = table.view();
	let classification = ColumnClassification {
		categorical: vec!["name".to_owned(), "bogus".to_owned()],
		numeric: vec!["age".to_owned()],
	};
	let report = profile_table(&table, classification, &mut |_| {});
	// the absent column is recorded as skipped and the rest of the report is still assembled
	assert!(report.frequency_tables.contains_key("name"));
	assert!(report.numeric_summaries.contains_key("age"));
	assert_eq!(
		report.skipped_columns,
		vec![SkippedColumn {
			column_name: "bogus".to_owned(),
			statistic: SkippedStatistic::FrequencyTable,
		}],
	);
}

#[test]
fn test_profile_table_is_deterministic() {
	let table = example_table();
	let table = table.view();
	let report_a = profile_table(&table, classify(&table), &mut |_| {});
	let report_b = profile_table(&table, classify(&table), &mut |_| {});
	assert_eq!(report_a, report_b);
}

#[test]
fn test_profile_load_failure() {
	let result = profile(
		Path::new("this_file_does_not_exist.csv"),
		None,
		ProfileOptions::default(),
		&mut |_| {},
	);
	assert!(result.is_err());
}

#[test]
fn test_report_serializes_undefined_statistics_as_null() {
	let table = Table {
		columns: vec![Column::Number(NumberColumn {
			name: "value".to_owned(),
			data: vec![1.0],
		})],
	};
	let table = table.view();
	let report = profile_table(&table, classify(&table), &mut |_| {});
	let json = serde_json::to_value(&report).unwrap();
	let summary = &json["numeric_summaries"]["value"];
	assert_eq!(summary["count"], 1);
	assert_eq!(summary["mean"], 1.0);
	assert!(summary["std"].is_null());
}
