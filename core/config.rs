/*!
This module defines the `Config` struct, which is used to configure a profiling run with [`profile`](../report/fn.profile.html). Every field is optional, and a run without a config file behaves as if every field were absent.
*/

use anyhow::{Context, Result};
use std::{collections::BTreeMap, path::Path};

#[derive(Debug, Default, serde::Deserialize)]
pub struct Config {
	/// Declared types for columns whose type should not be inferred from the data.
	pub column_types: Option<BTreeMap<String, ColumnType>>,
	/// Values the loader treats as missing, replacing the default list.
	pub invalid_values: Option<Vec<String>>,
	/// The maximum number of unique values a column may have and still be inferred as an enum.
	pub enum_max_unique_values: Option<usize>,
	/// Columns to tabulate frequencies for, replacing the inferred classification.
	pub categorical_columns: Option<Vec<String>>,
	/// Columns to compute descriptive statistics for, replacing the inferred classification.
	pub numeric_columns: Option<Vec<String>>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ColumnType {
	#[serde(rename = "unknown")]
	Unknown,
	#[serde(rename = "number")]
	Number,
	#[serde(rename = "boolean")]
	Boolean,
	#[serde(rename = "enum")]
	Enum { options: Vec<String> },
	#[serde(rename = "text")]
	Text,
}

pub fn load_config(config_path: Option<&Path>) -> Result<Option<Config>> {
	if let Some(config_path) = config_path {
		let config = std::fs::read_to_string(config_path)
			.with_context(|| format!("failed to read config file {}", config_path.display()))?;
		let config = serde_yaml::from_str(&config)
			.with_context(|| format!("failed to parse config file {}", config_path.display()))?;
		Ok(Some(config))
	} else {
		Ok(None)
	}
}

#[test]
fn test_parse_config() {
	let config = r#"
column_types:
  age:
    type: number
  size:
    type: enum
    options: ["large", "small"]
categorical_columns: ["size"]
numeric_columns: ["age"]
enum_max_unique_values: 10
"#;
	let config: Config = serde_yaml::from_str(config).unwrap();
	assert_eq!(config.enum_max_unique_values, Some(10));
	assert_eq!(config.categorical_columns, Some(vec!["size".to_owned()]));
	let column_types = config.column_types.unwrap();
	assert!(matches!(column_types["age"], ColumnType::Number));
	match &column_types["size"] {
		ColumnType::Enum { options } => {
			assert_eq!(options, &vec!["large".to_owned(), "small".to_owned()])
		}
		_ => panic!("expected an enum column type"),
	}
}
