/*!
This crate contains the streaming mean and variance computations used by the numeric summarizer. Values are accumulated as a (count, mean, m2) triple so that partial results computed over histogram buckets can be merged without a second pass over the data.
*/

mod mean_variance;

pub use self::mean_variance::{m2_to_sample_variance, merge_mean_m2};
