use datasight_table::{ColumnView, TableView};
use datasight_util::finite::{Finite, ToFinite};
use num_traits::ToPrimitive;
use std::collections::{BTreeMap, BTreeSet};

/// Count the missing cells in every column of the table, whatever its kind. A number cell is missing if it is not finite; a boolean, enum, or text cell is missing if it is None; every cell of an unknown column is missing.
pub fn count_nulls(table: &TableView, progress: impl Fn()) -> BTreeMap<String, u64> {
	table
		.columns
		.iter()
		.map(|column| {
			let null_count = match column {
				ColumnView::Unknown(column) => column.len,
				ColumnView::Number(column) => column
					.data
					.iter()
					.filter(|value| !value.is_finite())
					.count(),
				ColumnView::Boolean(column) => {
					column.data.iter().filter(|value| value.is_none()).count()
				}
				ColumnView::Enum(column) => {
					column.data.iter().filter(|value| value.is_none()).count()
				}
				ColumnView::Text(column) => {
					column.data.iter().filter(|value| value.is_none()).count()
				}
			};
			progress();
			(column.name().to_owned(), null_count.to_u64().unwrap())
		})
		.collect()
}

/// Count the distinct non-missing values in every column of the table. Numbers are compared bit-exactly, strings byte-exactly.
pub fn count_unique(table: &TableView, progress: impl Fn()) -> BTreeMap<String, u64> {
	table
		.columns
		.iter()
		.map(|column| {
			let unique_count = match column {
				ColumnView::Unknown(_) => 0,
				ColumnView::Number(column) => column
					.data
					.iter()
					.filter_map(|value| value.to_finite().ok())
					.collect::<BTreeSet<Finite<f32>>>()
					.len(),
				ColumnView::Boolean(column) => column
					.data
					.iter()
					.filter_map(|value| *value)
					.collect::<BTreeSet<bool>>()
					.len(),
				ColumnView::Enum(column) => column
					.data
					.iter()
					.filter_map(|value| *value)
					.collect::<BTreeSet<_>>()
					.len(),
				ColumnView::Text(column) => column
					.data
					.iter()
					.filter_map(|value| value.as_deref())
					.collect::<BTreeSet<&str>>()
					.len(),
			};
			progress();
			(column.name().to_owned(), unique_count.to_u64().unwrap())
		})
		.collect()
}

#[cfg(test)]
use datasight_table::{Column, NumberColumn, Table, TextColumn};

#[test]
fn test_count_nulls() {
	let table = Table {
		columns: vec![
			Column::Text(TextColumn {
				name: "name".to_owned(),
				data: vec![Some("alice".to_owned()), Some("bob".to_owned()), None],
			}),
			Column::Number(NumberColumn {
				name: "age".to_owned(),
				data: vec![30.0, std::f32::NAN, 40.0],
			}),
		],
	};
	let null_counts = count_nulls(&table.view(), || {});
	assert_eq!(null_counts["name"], 1);
	assert_eq!(null_counts["age"], 1);
}

#[test]
fn test_count_unique() {
	let table = Table {
		columns: vec![
			Column::Text(TextColumn {
				name: "name".to_owned(),
				data: vec![
					Some("alice".to_owned()),
					Some("alice".to_owned()),
					Some("bob".to_owned()),
					None,
				],
			}),
			Column::Number(NumberColumn {
				name: "age".to_owned(),
				data: vec![30.0, 30.0, std::f32::NAN, 40.0],
			}),
		],
	};
	let unique_counts = count_unique(&table.view(), || {});
	assert_eq!(unique_counts["name"], 2);
	assert_eq!(unique_counts["age"], 2);
}

#[test]
fn test_count_bounds() {
	// null_count <= nrows and unique_count <= nrows - null_count, for every column
	let table = Table {
		columns: vec![Column::Text(TextColumn {
			name: "name".to_owned(),
			data: vec![Some("alice".to_owned()), None, None],
		})],
	};
	let table = table.view();
	let nrows = table.nrows().to_u64().unwrap();
	let null_counts = count_nulls(&table, || {});
	let unique_counts = count_unique(&table, || {});
	for (column_name, null_count) in null_counts.iter() {
		assert!(*null_count <= nrows);
		assert!(unique_counts[column_name] <= nrows - null_count);
	}
}
