/*!
This crate contains small utilities shared by the datasight crates: a float wrapper that guarantees finiteness so values can be ordered and hashed, a thread-safe progress counter, and a plain-text table writer used to print report sections.
*/

pub mod finite;
pub mod progress_counter;
pub mod text_table;
