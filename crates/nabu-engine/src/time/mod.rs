//! Time utilities.
//!
//! Periodic work (deferred row redraws) is expressed as an `Interval` polled
//! by the host loop, so nothing here owns a thread or a platform timer.

mod interval;

pub use interval::Interval;
