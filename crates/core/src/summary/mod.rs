//! Confidence summaries of sorted sample arrays

pub mod interval;
pub mod sigfig;

pub use interval::{interval, median, quantile_sorted, shortest_interval, DEFAULT_ALPHA};
pub use sigfig::{
    magnitude, repr_mag, repr_sig, round_mag, round_repr, round_sig, sigfig_resolution,
    summarize, DEFAULT_PADDING,
};
