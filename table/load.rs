use super::*;
use anyhow::Result;
use fnv::FnvHashMap;
use std::{
	collections::{BTreeMap, BTreeSet},
	num::NonZeroUsize,
	path::Path,
};

#[derive(Clone)]
pub struct FromCsvOptions<'a> {
	pub column_types: Option<BTreeMap<String, ColumnType>>,
	pub infer_options: InferOptions,
	pub invalid_values: &'a [&'a str],
}

impl<'a> Default for FromCsvOptions<'a> {
	fn default() -> Self {
		Self {
			column_types: None,
			infer_options: InferOptions::default(),
			invalid_values: DEFAULT_INVALID_VALUES,
		}
	}
}

#[derive(Clone, Debug)]
pub struct InferOptions {
	pub enum_max_unique_values: usize,
}

impl Default for InferOptions {
	fn default() -> Self {
		Self {
			enum_max_unique_values: 100,
		}
	}
}

/// These values are considered missing unless the loader is configured otherwise.
pub const DEFAULT_INVALID_VALUES: &[&str] = &[
	"", "null", "NULL", "n/a", "N/A", "nan", "-nan", "NaN", "-NaN", "?",
];

const TRUE_VALUES: &[&str] = &["true", "True", "TRUE"];
const FALSE_VALUES: &[&str] = &["false", "False", "FALSE"];

impl Table {
	pub fn from_path(path: &Path, options: FromCsvOptions, progress: impl Fn(u64)) -> Result<Self> {
		Self::from_csv(&mut csv::Reader::from_path(path)?, options, progress)
	}

	pub fn from_csv<R>(
		reader: &mut csv::Reader<R>,
		options: FromCsvOptions,
		progress: impl Fn(u64),
	) -> Result<Self>
	where
		R: std::io::Read + std::io::Seek,
	{
		let column_names: Vec<String> = reader
			.headers()?
			.into_iter()
			.map(|column_name| column_name.to_owned())
			.collect();
		let n_columns = column_names.len();
		let start_position = reader.position().clone();
		let infer_options = &options.infer_options;
		let invalid_values = options.invalid_values;
		let mut n_rows = None;

		#[derive(Clone, Debug)]
		enum ColumnTypeOrInferStats<'a> {
			ColumnType(ColumnType),
			InferStats(InferStats<'a>),
		}

		// Retrieve any column types present in the options. Columns without a type get an infer pass.
		let mut column_types: Vec<ColumnTypeOrInferStats> = if let Some(column_types) =
			options.column_types
		{
			column_names
				.iter()
				.map(|column_name| {
					column_types
						.get(column_name)
						.map(|column_type| ColumnTypeOrInferStats::ColumnType(column_type.clone()))
						.unwrap_or_else(|| {
							ColumnTypeOrInferStats::InferStats(InferStats::new(
								infer_options,
								invalid_values,
							))
						})
				})
				.collect()
		} else {
			vec![
				ColumnTypeOrInferStats::InferStats(InferStats::new(infer_options, invalid_values));
				n_columns
			]
		};

		let needs_infer =
			column_types.iter().any(
				|column_type_or_infer_stats| match column_type_or_infer_stats {
					ColumnTypeOrInferStats::ColumnType(_) => false,
					ColumnTypeOrInferStats::InferStats(_) => true,
				},
			);

		// If the infer pass is necessary, pass over the dataset and infer the types for those columns whose types were not specified.
		let column_types: Vec<ColumnType> = if needs_infer {
			let mut infer_stats: Vec<(usize, &mut InferStats)> = column_types
				.iter_mut()
				.enumerate()
				.filter_map(
					|(index, column_type_or_infer_stats)| match column_type_or_infer_stats {
						ColumnTypeOrInferStats::ColumnType(_) => None,
						ColumnTypeOrInferStats::InferStats(infer_stats) => {
							Some((index, infer_stats))
						}
					},
				)
				.collect();
			let mut record = csv::StringRecord::new();
			let mut n_rows_computed = 0;
			while reader.read_record(&mut record)? {
				n_rows_computed += 1;
				for (index, infer_stats) in infer_stats.iter_mut() {
					let value = record.get(*index).unwrap();
					infer_stats.update(value);
				}
			}
			n_rows = Some(n_rows_computed);
			let column_types = column_types
				.into_iter()
				.map(
					|column_type_or_infer_stats| match column_type_or_infer_stats {
						ColumnTypeOrInferStats::ColumnType(column_type) => column_type,
						ColumnTypeOrInferStats::InferStats(infer_stats) => infer_stats.finalize(),
					},
				)
				.collect();
			// After inference, return back to the beginning of the csv to load the values.
			reader.seek(start_position)?;
			column_types
		} else {
			column_types
				.into_iter()
				.map(
					|column_type_or_infer_stats| match column_type_or_infer_stats {
						ColumnTypeOrInferStats::ColumnType(column_type) => column_type,
						_ => unreachable!(),
					},
				)
				.collect()
		};

		// Build an option lookup for each enum column before the values are loaded.
		let enum_lookups: Vec<Option<FnvHashMap<String, NonZeroUsize>>> = column_types
			.iter()
			.map(|column_type| match column_type {
				ColumnType::Enum { options } => Some(
					options
						.iter()
						.enumerate()
						.map(|(index, option)| {
							(option.clone(), NonZeroUsize::new(index + 1).unwrap())
						})
						.collect(),
				),
				_ => None,
			})
			.collect();

		// Create the table. If an inference pass was done, reserve storage for the values because the number of rows is known.
		let mut table = Self::new(column_names, column_types);
		if let Some(n_rows) = n_rows {
			for column in table.columns.iter_mut() {
				match column {
					Column::Unknown(_) => {}
					Column::Number(column) => column.data.reserve_exact(n_rows),
					Column::Boolean(column) => column.data.reserve_exact(n_rows),
					Column::Enum(column) => column.data.reserve_exact(n_rows),
					Column::Text(column) => column.data.reserve_exact(n_rows),
				}
			}
		}

		// Read each csv record and insert the values into the columns of the table.
		let mut record = csv::ByteRecord::new();
		while reader.read_byte_record(&mut record)? {
			progress(record.position().unwrap().byte());
			for ((column, lookup), value) in table
				.columns
				.iter_mut()
				.zip(enum_lookups.iter())
				.zip(record.iter())
			{
				match column {
					Column::Unknown(column) => {
						column.len += 1;
					}
					Column::Number(column) => {
						let value = match lexical::parse::<f32, &[u8]>(value) {
							Ok(value) if value.is_finite() => value,
							_ => std::f32::NAN,
						};
						column.data.push(value);
					}
					Column::Boolean(column) => {
						let value = match std::str::from_utf8(value) {
							Ok(value) if TRUE_VALUES.contains(&value) => Some(true),
							Ok(value) if FALSE_VALUES.contains(&value) => Some(false),
							_ => None,
						};
						column.data.push(value);
					}
					Column::Enum(column) => {
						let value = std::str::from_utf8(value)
							.ok()
							.and_then(|value| lookup.as_ref().unwrap().get(value).cloned());
						column.data.push(value);
					}
					Column::Text(column) => {
						let value = std::str::from_utf8(value)?;
						let value = if invalid_values.contains(&value) {
							None
						} else {
							Some(value.to_owned())
						};
						column.data.push(value);
					}
				}
			}
		}
		Ok(table)
	}
}

#[derive(Clone, Debug)]
pub struct InferStats<'a> {
	infer_options: &'a InferOptions,
	invalid_values: &'a [&'a str],
	column_type: InferColumnType,
	unique_values: Option<BTreeSet<String>>,
}

#[derive(PartialEq, Clone, Copy, Debug)]
enum InferColumnType {
	Unknown,
	Boolean,
	Number,
	Enum,
	Text,
}

impl<'a> InferStats<'a> {
	pub fn new(infer_options: &'a InferOptions, invalid_values: &'a [&'a str]) -> Self {
		Self {
			infer_options,
			invalid_values,
			column_type: InferColumnType::Unknown,
			unique_values: Some(BTreeSet::new()),
		}
	}

	pub fn update(&mut self, value: &str) {
		if self.invalid_values.contains(&value) {
			return;
		}
		if let Some(unique_values) = self.unique_values.as_mut() {
			if !unique_values.contains(value) {
				unique_values.insert(value.to_owned());
			}
			if unique_values.len() > self.infer_options.enum_max_unique_values {
				self.unique_values = None;
			}
		}
		match self.column_type {
			InferColumnType::Unknown => {
				self.column_type = if is_boolean_value(value) {
					InferColumnType::Boolean
				} else if is_number_value(value) {
					InferColumnType::Number
				} else if self.unique_values.is_some() {
					InferColumnType::Enum
				} else {
					InferColumnType::Text
				};
			}
			InferColumnType::Boolean => {
				if !is_boolean_value(value) {
					self.column_type = if self.unique_values.is_some() {
						InferColumnType::Enum
					} else {
						InferColumnType::Text
					};
				}
			}
			InferColumnType::Number => {
				if !is_number_value(value) {
					self.column_type = if self.unique_values.is_some() {
						InferColumnType::Enum
					} else {
						InferColumnType::Text
					};
				}
			}
			InferColumnType::Enum => {
				if self.unique_values.is_none() {
					self.column_type = InferColumnType::Text;
				}
			}
			InferColumnType::Text => {}
		}
	}

	pub fn finalize(self) -> ColumnType {
		match self.column_type {
			InferColumnType::Unknown => ColumnType::Unknown,
			InferColumnType::Boolean => ColumnType::Boolean,
			InferColumnType::Number => ColumnType::Number,
			InferColumnType::Enum => ColumnType::Enum {
				options: self.unique_values.unwrap().into_iter().collect(),
			},
			InferColumnType::Text => ColumnType::Text,
		}
	}
}

fn is_boolean_value(value: &str) -> bool {
	TRUE_VALUES.contains(&value) || FALSE_VALUES.contains(&value)
}

fn is_number_value(value: &str) -> bool {
	lexical::parse::<f32, &str>(value)
		.map(|value| value.is_finite())
		.unwrap_or(false)
}

#[test]
fn test_infer() {
	let csv = "age,size,name,subscribed,notes\n\
		30,small,alice,true,\n\
		25,large,bob,false,\n\
		,small,carol,true,\n";
	let table = Table::from_csv(
		&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
		FromCsvOptions {
			infer_options: InferOptions {
				enum_max_unique_values: 2,
			},
			..Default::default()
		},
		|_| {},
	)
	.unwrap();
	assert_eq!(table.ncols(), 5);
	assert_eq!(table.nrows(), 3);
	let age = table.columns[0].as_number().unwrap();
	assert_eq!(age.data[0], 30.0);
	assert_eq!(age.data[1], 25.0);
	assert!(age.data[2].is_nan());
	let size = table.columns[1].as_enum().unwrap();
	assert_eq!(size.options, vec!["large".to_owned(), "small".to_owned()]);
	assert_eq!(
		size.data,
		vec![
			NonZeroUsize::new(2),
			NonZeroUsize::new(1),
			NonZeroUsize::new(2),
		],
	);
	// three unique values exceed the enum limit, so name falls back to text
	let name = table.columns[2].as_text().unwrap();
	assert_eq!(
		name.data,
		vec![
			Some("alice".to_owned()),
			Some("bob".to_owned()),
			Some("carol".to_owned()),
		],
	);
	let subscribed = table.columns[3].as_boolean().unwrap();
	assert_eq!(subscribed.data, vec![Some(true), Some(false), Some(true)]);
	// every cell in notes is missing, so its type cannot be determined
	match &table.columns[4] {
		Column::Unknown(column) => assert_eq!(column.len, 3),
		_ => panic!("expected an unknown column"),
	}
}

#[test]
fn test_explicit_column_types() {
	let csv = "age,name\n30,alice\n25,carol\n";
	let mut column_types = BTreeMap::new();
	column_types.insert("age".to_owned(), ColumnType::Text);
	column_types.insert(
		"name".to_owned(),
		ColumnType::Enum {
			options: vec!["alice".to_owned(), "bob".to_owned()],
		},
	);
	let table = Table::from_csv(
		&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
		FromCsvOptions {
			column_types: Some(column_types),
			..Default::default()
		},
		|_| {},
	)
	.unwrap();
	let age = table.columns[0].as_text().unwrap();
	assert_eq!(age.data, vec![Some("30".to_owned()), Some("25".to_owned())]);
	// carol is not one of the declared options, so the cell is missing
	let name = table.columns[1].as_enum().unwrap();
	assert_eq!(name.data, vec![NonZeroUsize::new(1), None]);
}

#[test]
fn test_headers_only() {
	let csv = "a,b\n";
	let table = Table::from_csv(
		&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
		FromCsvOptions::default(),
		|_| {},
	)
	.unwrap();
	assert_eq!(table.ncols(), 2);
	assert_eq!(table.nrows(), 0);
}

#[test]
fn test_missing_file() {
	let result = Table::from_path(
		Path::new("this_file_does_not_exist.csv"),
		FromCsvOptions::default(),
		|_| {},
	);
	assert!(result.is_err());
}

#[test]
fn test_mixed_boolean_column_falls_back_to_enum() {
	let csv = "flag\ntrue\nmaybe\nfalse\n";
	let table = Table::from_csv(
		&mut csv::Reader::from_reader(std::io::Cursor::new(csv)),
		FromCsvOptions::default(),
		|_| {},
	)
	.unwrap();
	let flag = table.columns[0].as_enum().unwrap();
	assert_eq!(
		flag.options,
		vec!["false".to_owned(), "maybe".to_owned(), "true".to_owned()],
	);
}
