/*!
This crate implements the datasight profiling pipeline. A profiling run classifies the columns of a table as categorical or numeric, counts missing and distinct values for every column, tabulates value frequencies for the categorical columns, computes descriptive statistics for the numeric columns, and assembles the results into a single report.

Loading the table is the only step that can fail. Once a table is loaded, a report is always produced: a requested column that is absent from the table or of the wrong kind is recorded as skipped, and a statistic that is undefined for a column's values is None in the report, never a fabricated value.
*/

pub mod classify;
pub mod config;
pub mod counts;
pub mod frequency;
pub mod progress;
pub mod report;
pub mod summary;

pub use self::report::{profile, profile_table, ProfileOptions, Report};
