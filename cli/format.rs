use datasight_core::Report;
use datasight_util::text_table::TextTable;
use std::fmt::Write;

/// Render the report as text, section by section, in the order the statistics were computed.
pub fn format_report(report: &Report) -> String {
	let mut output = String::new();
	writeln!(output, "===== Null Counts =====").unwrap();
	let mut table = TextTable::new(vec!["column".to_owned(), "null_count".to_owned()]);
	for (column_name, null_count) in report.null_counts.iter() {
		table.add_row(vec![column_name.clone(), null_count.to_string()]);
	}
	writeln!(output, "{}", table).unwrap();
	writeln!(output, "===== Unique Counts =====").unwrap();
	let mut table = TextTable::new(vec!["column".to_owned(), "unique_count".to_owned()]);
	for (column_name, unique_count) in report.unique_counts.iter() {
		table.add_row(vec![column_name.clone(), unique_count.to_string()]);
	}
	writeln!(output, "{}", table).unwrap();
	writeln!(output, "===== Value Counts =====").unwrap();
	for (column_name, frequency_table) in report.frequency_tables.iter() {
		writeln!(output, "Value counts for column \"{}\":", column_name).unwrap();
		let mut table = TextTable::new(vec!["value".to_owned(), "count".to_owned()]);
		for (value, count) in frequency_table.entries.iter() {
			table.add_row(vec![value.clone(), count.to_string()]);
		}
		writeln!(output, "{}", table).unwrap();
	}
	writeln!(output, "===== Numeric Summaries =====").unwrap();
	let mut table = TextTable::new(vec![
		"column".to_owned(),
		"count".to_owned(),
		"mean".to_owned(),
		"std".to_owned(),
		"min".to_owned(),
		"p25".to_owned(),
		"p50".to_owned(),
		"p75".to_owned(),
		"max".to_owned(),
	]);
	for (column_name, summary) in report.numeric_summaries.iter() {
		table.add_row(vec![
			column_name.clone(),
			summary.count.to_string(),
			format_statistic(summary.mean),
			format_statistic(summary.std),
			format_statistic(summary.min),
			format_statistic(summary.p25),
			format_statistic(summary.p50),
			format_statistic(summary.p75),
			format_statistic(summary.max),
		]);
	}
	write!(output, "{}", table).unwrap();
	output
}

/// An undefined statistic prints as a dash.
fn format_statistic(value: Option<f32>) -> String {
	match value {
		Some(value) => value.to_string(),
		None => "-".to_owned(),
	}
}

#[cfg(test)]
use datasight_core::{classify::classify, profile_table};
#[cfg(test)]
use datasight_table::{Column, NumberColumn, Table, TextColumn};

#[test]
fn test_format_report() {
	let table = Table {
		columns: vec![
			Column::Text(TextColumn {
				name: "name".to_owned(),
				data: vec![Some("alice".to_owned())],
			}),
			Column::Number(NumberColumn {
				name: "age".to_owned(),
				data: vec![30.0],
			}),
		],
	};
	let table = table.view();
	let report = profile_table(&table, classify(&table), &mut |_| {});
	let text = format_report(&report);
	assert!(text.contains("===== Null Counts ====="));
	assert!(text.contains("===== Unique Counts ====="));
	assert!(text.contains("Value counts for column \"name\":"));
	assert!(text.contains("===== Numeric Summaries ====="));
	// the standard deviation of a single observation prints as a dash
	assert!(text.contains("| -"));
}
