use datasight_table::{ColumnView, EnumColumnView, TableView, TextColumnView};
use fnv::FnvHashMap;
use std::{cmp::Reverse, collections::BTreeMap};

/// Occurrence counts for the values of one categorical column, sorted by descending count. Values with equal counts keep the order in which they first appear in the column. The counts sum to the column's non-missing cell count.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrequencyTable {
	pub entries: Vec<(String, u64)>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrequencyOutput {
	pub tables: BTreeMap<String, FrequencyTable>,
	/// Requested columns that were not tabulated: names absent from the table and names of non-categorical columns.
	pub skipped: Vec<String>,
}

/// Tabulate value frequencies for the requested categorical columns. A requested name that does not match an enum or text column is skipped, not an error, so a caller-supplied column list can never abort the report. A column with no non-missing values yields an empty table.
pub fn tabulate(
	table: &TableView,
	categorical_columns: &[String],
	progress: impl Fn(),
) -> FrequencyOutput {
	let mut output = FrequencyOutput::default();
	for column_name in categorical_columns.iter() {
		match table.column(column_name) {
			Some(ColumnView::Enum(column)) => {
				output
					.tables
					.insert(column_name.clone(), tabulate_enum(column));
			}
			Some(ColumnView::Text(column)) => {
				output
					.tables
					.insert(column_name.clone(), tabulate_text(column));
			}
			_ => output.skipped.push(column_name.clone()),
		}
		progress();
	}
	output
}

fn tabulate_enum(column: &EnumColumnView) -> FrequencyTable {
	let mut counts: Vec<u64> = vec![0; column.options.len()];
	let mut first_rows: Vec<Option<usize>> = vec![None; column.options.len()];
	for (row, value) in column.data.iter().enumerate() {
		if let Some(value) = value {
			let index = value.get() - 1;
			counts[index] += 1;
			first_rows[index].get_or_insert(row);
		}
	}
	let mut entries: Vec<(&String, u64, usize)> = column
		.options
		.iter()
		.zip(counts.into_iter().zip(first_rows.into_iter()))
		.filter_map(|(option, (count, first_row))| {
			first_row.map(|first_row| (option, count, first_row))
		})
		.collect();
	entries.sort_by_key(|&(_, count, first_row)| (Reverse(count), first_row));
	FrequencyTable {
		entries: entries
			.into_iter()
			.map(|(option, count, _)| (option.clone(), count))
			.collect(),
	}
}

fn tabulate_text(column: &TextColumnView) -> FrequencyTable {
	let mut histogram: FnvHashMap<&str, (u64, usize)> = FnvHashMap::default();
	for (row, value) in column.data.iter().enumerate() {
		if let Some(value) = value.as_deref() {
			let entry = histogram.entry(value).or_insert((0, row));
			entry.0 += 1;
		}
	}
	let mut entries: Vec<(&str, u64, usize)> = histogram
		.into_iter()
		.map(|(value, (count, first_row))| (value, count, first_row))
		.collect();
	entries.sort_by_key(|&(_, count, first_row)| (Reverse(count), first_row));
	FrequencyTable {
		entries: entries
			.into_iter()
			.map(|(value, count, _)| (value.to_owned(), count))
			.collect(),
	}
}

#[cfg(test)]
use datasight_table::{Column, EnumColumn, NumberColumn, Table, TextColumn};
#[cfg(test)]
use std::num::NonZeroUsize;

#[test]
fn test_tabulate_text() {
	let table = Table {
		columns: vec![Column::Text(TextColumn {
			name: "name".to_owned(),
			data: vec![Some("alice".to_owned()), Some("bob".to_owned()), None],
		})],
	};
	let output = tabulate(&table.view(), &["name".to_owned()], || {});
	assert_eq!(
		output.tables["name"].entries,
		vec![("alice".to_owned(), 1), ("bob".to_owned(), 1)],
	);
	assert!(output.skipped.is_empty());
}

#[test]
fn test_tabulate_sorts_by_count_then_first_appearance() {
	let table = Table {
		columns: vec![Column::Text(TextColumn {
			name: "word".to_owned(),
			data: vec![
				Some("b".to_owned()),
				Some("a".to_owned()),
				Some("b".to_owned()),
				Some("a".to_owned()),
				Some("c".to_owned()),
			],
		})],
	};
	let output = tabulate(&table.view(), &["word".to_owned()], || {});
	// b and a tie at two occurrences, and b appears first
	assert_eq!(
		output.tables["word"].entries,
		vec![("b".to_owned(), 2), ("a".to_owned(), 2), ("c".to_owned(), 1)],
	);
}

#[test]
fn test_tabulate_enum() {
	let table = Table {
		columns: vec![Column::Enum(EnumColumn {
			name: "size".to_owned(),
			options: vec!["large".to_owned(), "small".to_owned()],
			data: vec![
				NonZeroUsize::new(2),
				NonZeroUsize::new(1),
				NonZeroUsize::new(2),
				None,
			],
		})],
	};
	let output = tabulate(&table.view(), &["size".to_owned()], || {});
	let entries = &output.tables["size"].entries;
	assert_eq!(
		*entries,
		vec![("small".to_owned(), 2), ("large".to_owned(), 1)],
	);
	// the counts sum to the column's non-missing cell count
	let total: u64 = entries.iter().map(|(_, count)| count).sum();
	assert_eq!(total, 3);
}

#[test]
fn test_tabulate_skips_unknown_names() {
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
	let requested = vec!["name".to_owned(), "bogus".to_owned(), "age".to_owned()];
	let output = tabulate(&table.view(), &requested, || {});
	// the remaining requested columns are still tabulated
	assert!(output.tables.contains_key("name"));
	assert_eq!(output.skipped, vec!["bogus".to_owned(), "age".to_owned()]);
}

#[test]
fn test_tabulate_all_missing_column() {
	let table = Table {
		columns: vec![Column::Text(TextColumn {
			name: "name".to_owned(),
			data: vec![None, None],
		})],
	};
	let output = tabulate(&table.view(), &["name".to_owned()], || {});
	assert!(output.tables["name"].entries.is_empty());
	assert!(output.skipped.is_empty());
}
