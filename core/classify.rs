use datasight_table::{ColumnView, TableView};

/// The categorical and numeric column names of a table, in table column order. A column name appears in at most one of the two lists. Boolean and unknown columns appear in neither.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ColumnClassification {
	pub categorical: Vec<String>,
	pub numeric: Vec<String>,
}

/// Partition the columns of a table by how they will be profiled: enum and text columns are categorical, number columns are numeric. Boolean and unknown columns are excluded from both lists, because neither frequency tables nor descriptive statistics have well-defined semantics for them.
pub fn classify(table: &TableView) -> ColumnClassification {
	let mut classification = ColumnClassification::default();
	for column in table.columns.iter() {
		match column {
			ColumnView::Enum(column) => classification.categorical.push(column.name.to_owned()),
			ColumnView::Text(column) => classification.categorical.push(column.name.to_owned()),
			ColumnView::Number(column) => classification.numeric.push(column.name.to_owned()),
			ColumnView::Unknown(_) | ColumnView::Boolean(_) => {}
		}
	}
	classification
}

#[cfg(test)]
use datasight_table::{ColumnType, Table};

#[test]
fn test_classify() {
	let table = Table::new(
		vec![
			"name".to_owned(),
			"age".to_owned(),
			"size".to_owned(),
			"subscribed".to_owned(),
			"notes".to_owned(),
		],
		vec![
			ColumnType::Text,
			ColumnType::Number,
			ColumnType::Enum {
				options: vec!["large".to_owned(), "small".to_owned()],
			},
			ColumnType::Boolean,
			ColumnType::Unknown,
		],
	);
	let classification = classify(&table.view());
	assert_eq!(
		classification.categorical,
		vec!["name".to_owned(), "size".to_owned()],
	);
	assert_eq!(classification.numeric, vec!["age".to_owned()]);
}

#[test]
fn test_classify_empty_table() {
	let table = Table::new(Vec::new(), Vec::new());
	let classification = classify(&table.view());
	assert!(classification.categorical.is_empty());
	assert!(classification.numeric.is_empty());
}

#[test]
fn test_classify_partitions() {
	let table = Table::new(
		vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
		vec![ColumnType::Text, ColumnType::Number, ColumnType::Boolean],
	);
	let classification = classify(&table.view());
	for column_name in classification.categorical.iter() {
		assert!(!classification.numeric.contains(column_name));
	}
}
