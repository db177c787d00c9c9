//! Constants for the fetch module (timeouts).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default whole-request timeout (5 minutes, body included).
///
/// Bounds a hung mirror so one path cannot stall the run.
pub const REQUEST_TIMEOUT_SECS: u64 = 300;
