/*!
# I/O Utilities

Writers for sample buffers produced by the sampler. CSV support is behind the `csv`
feature.
*/

#[cfg(feature = "csv")]
pub mod csv;
