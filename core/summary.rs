use datasight_metrics::{m2_to_sample_variance, merge_mean_m2};
use datasight_table::{ColumnView, NumberColumnView, TableView};
use datasight_util::finite::{Finite, ToFinite};
use num_traits::ToPrimitive;
use std::{cmp::Ordering, collections::BTreeMap};

/// Descriptive statistics for one numeric column, computed over its non-missing values only. Every statistic other than the count is None when the column has no non-missing values. The standard deviation is the sample standard deviation, so it is also None when the column has exactly one non-missing value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NumericSummary {
	pub count: u64,
	pub mean: Option<f32>,
	pub std: Option<f32>,
	pub min: Option<f32>,
	pub p25: Option<f32>,
	pub p50: Option<f32>,
	pub p75: Option<f32>,
	pub max: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SummaryOutput {
	pub summaries: BTreeMap<String, NumericSummary>,
	/// Requested columns that were not summarized: names absent from the table and names of non-number columns.
	pub skipped: Vec<String>,
}

/// Compute descriptive statistics for the requested numeric columns. A requested name that does not match a number column is skipped, not an error, so a caller-supplied column list can never abort the report.
pub fn summarize(
	table: &TableView,
	numeric_columns: &[String],
	progress: impl Fn(),
) -> SummaryOutput {
	let mut output = SummaryOutput::default();
	for column_name in numeric_columns.iter() {
		match table.column(column_name) {
			Some(ColumnView::Number(column)) => {
				output
					.summaries
					.insert(column_name.clone(), summarize_number(column));
			}
			_ => output.skipped.push(column_name.clone()),
		}
		progress();
	}
	output
}

/// Compute the summary for one number column. The values are aggregated into a histogram first, so the quantile pass sorts the distinct values instead of every row. Quantiles use linear interpolation between order statistics: the q-th quantile sits at index (count - 1) * q in value order, and a fractional index interpolates between the two adjacent values. The endpoints are inclusive, so p0 would be the minimum and p100 the maximum.
fn summarize_number(column: &NumberColumnView) -> NumericSummary {
	let mut histogram: BTreeMap<Finite<f32>, u64> = BTreeMap::new();
	for value in column.data.iter() {
		if let Ok(value) = value.to_finite() {
			*histogram.entry(value).or_insert(0) += 1;
		}
	}
	let count: u64 = histogram.values().sum();
	if count == 0 {
		return NumericSummary {
			count: 0,
			mean: None,
			std: None,
			min: None,
			p25: None,
			p50: None,
			p75: None,
			max: None,
		};
	}
	let min = histogram.iter().next().unwrap().0.get();
	let max = histogram.iter().next_back().unwrap().0.get();
	let count_f32 = count.to_f32().unwrap();
	let quantiles: Vec<f32> = vec![0.25, 0.50, 0.75];
	// find the index of each quantile given the number of non-missing values
	let quantile_indexes: Vec<usize> = quantiles
		.iter()
		.map(|q| ((count_f32 - 1.0) * q).trunc().to_usize().unwrap())
		.collect();
	// the fractional part of the index, used to interpolate between adjacent values
	let quantile_fracts: Vec<f32> = quantiles
		.iter()
		.map(|q| ((count_f32 - 1.0) * q).fract())
		.collect();
	let mut quantiles: Vec<Option<f32>> = vec![None; quantiles.len()];
	let mut current_count: u64 = 0;
	let mut mean = 0.0;
	let mut m2 = 0.0;
	let mut iter = histogram.iter().peekable();
	while let Some((value, value_count)) = iter.next() {
		let value = value.get();
		let (new_mean, new_m2) = merge_mean_m2(
			current_count,
			mean,
			m2,
			*value_count,
			value.to_f64().unwrap(),
			0.0,
		);
		mean = new_mean;
		m2 = new_m2;
		current_count += value_count;
		let quantiles_iter = quantiles
			.iter_mut()
			.zip(quantile_indexes.iter().zip(quantile_fracts.iter()))
			.filter(|(quantile, (_, _))| quantile.is_none());
		for (quantile, (index, fract)) in quantiles_iter {
			match (current_count.to_usize().unwrap() - 1).cmp(index) {
				Ordering::Equal => {
					if *fract > 0.0 {
						// interpolate between this value and the next distinct value
						let next_value = iter.peek().unwrap().0.get();
						*quantile = Some(value * (1.0 - fract) + next_value * fract);
					} else {
						*quantile = Some(value);
					}
				}
				Ordering::Greater => *quantile = Some(value),
				Ordering::Less => {}
			}
		}
	}
	let std = m2_to_sample_variance(m2, count)
		.map(|variance| variance.sqrt().to_f32().unwrap());
	NumericSummary {
		count,
		mean: Some(mean.to_f32().unwrap()),
		std,
		min: Some(min),
		p25: quantiles[0],
		p50: quantiles[1],
		p75: quantiles[2],
		max: Some(max),
	}
}

#[cfg(test)]
use datasight_table::{Column, NumberColumn, Table, TextColumn};

#[cfg(test)]
fn number_table(data: Vec<f32>) -> Table {
	Table {
		columns: vec![Column::Number(NumberColumn {
			name: "value".to_owned(),
			data,
		})],
	}
}

#[test]
fn test_summarize_one_value() {
	let table = number_table(vec![1.0]);
	let output = summarize(&table.view(), &["value".to_owned()], || {});
	let summary = &output.summaries["value"];
	assert_eq!(summary.count, 1);
	assert_eq!(summary.mean, Some(1.0));
	assert_eq!(summary.std, None);
	assert_eq!(summary.min, Some(1.0));
	assert_eq!(summary.p25, Some(1.0));
	assert_eq!(summary.p50, Some(1.0));
	assert_eq!(summary.p75, Some(1.0));
	assert_eq!(summary.max, Some(1.0));
}

#[test]
fn test_summarize_two_values() {
	let table = number_table(vec![1.0, 2.0]);
	let output = summarize(&table.view(), &["value".to_owned()], || {});
	let summary = &output.summaries["value"];
	assert_eq!(summary.count, 2);
	assert_eq!(summary.mean, Some(1.5));
	// the sample variance of [1, 2] is 0.5
	assert!((summary.std.unwrap() - 0.5f32.sqrt()).abs() < 1e-6);
	assert_eq!(summary.min, Some(1.0));
	assert_eq!(summary.p25, Some(1.25));
	assert_eq!(summary.p50, Some(1.5));
	assert_eq!(summary.p75, Some(1.75));
	assert_eq!(summary.max, Some(2.0));
}

#[test]
fn test_summarize_repeated_values() {
	let table = number_table(vec![1.0, 1.0, 1.0, 2.0]);
	let output = summarize(&table.view(), &["value".to_owned()], || {});
	let summary = &output.summaries["value"];
	assert_eq!(summary.count, 4);
	assert_eq!(summary.mean, Some(1.25));
	// the sample variance of [1, 1, 1, 2] is 0.25
	assert!((summary.std.unwrap() - 0.5).abs() < 1e-6);
	assert_eq!(summary.p25, Some(1.0));
	assert_eq!(summary.p50, Some(1.0));
	assert_eq!(summary.p75, Some(1.25));
}

#[test]
fn test_summarize_skips_missing_values() {
	let table = number_table(vec![1.0, std::f32::NAN, 3.0]);
	let output = summarize(&table.view(), &["value".to_owned()], || {});
	let summary = &output.summaries["value"];
	assert_eq!(summary.count, 2);
	assert_eq!(summary.mean, Some(2.0));
}

#[test]
fn test_summarize_all_missing_column() {
	let table = number_table(vec![std::f32::NAN, std::f32::NAN]);
	let output = summarize(&table.view(), &["value".to_owned()], || {});
	let summary = &output.summaries["value"];
	assert_eq!(summary.count, 0);
	assert_eq!(summary.mean, None);
	assert_eq!(summary.std, None);
	assert_eq!(summary.min, None);
	assert_eq!(summary.max, None);
}

#[test]
fn test_summarize_quantile_ordering() {
	let table = number_table(vec![5.0, 3.0, 9.0, 1.0, 7.0, 2.0, 8.0]);
	let output = summarize(&table.view(), &["value".to_owned()], || {});
	let summary = &output.summaries["value"];
	// min <= p25 <= p50 <= p75 <= max
	assert!(summary.min.unwrap() <= summary.p25.unwrap());
	assert!(summary.p25.unwrap() <= summary.p50.unwrap());
	assert!(summary.p50.unwrap() <= summary.p75.unwrap());
	assert!(summary.p75.unwrap() <= summary.max.unwrap());
}

#[test]
fn test_summarize_skips_non_number_columns() {
	let table = Table {
		columns: vec![Column::Text(TextColumn {
			name: "name".to_owned(),
			data: vec![Some("alice".to_owned())],
		})],
	};
	let requested = vec!["name".to_owned(), "bogus".to_owned()];
	let output = summarize(&table.view(), &requested, || {});
	assert!(output.summaries.is_empty());
	assert_eq!(output.skipped, requested);
}
