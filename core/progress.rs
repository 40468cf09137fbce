use datasight_util::progress_counter::ProgressCounter;

#[derive(Debug)]
pub enum Progress {
	Loading(ProgressCounter),
	Stats(StatsProgress),
}

/// One variant per statistic computer, emitted in assembly order.
#[derive(Debug)]
pub enum StatsProgress {
	NullCounts(ProgressCounter),
	UniqueCounts(ProgressCounter),
	FrequencyTables(ProgressCounter),
	NumericSummaries(ProgressCounter),
}
