// Metrics hooks for the `matcher` crate.
//
// A `Detector` reports per-call latency and document counts to an optional
// `DetectMetrics` observer supplied at construction through
// [`Detector::with_metrics`](crate::Detector::with_metrics). Instrumentation
// stays decoupled from any specific metrics backend.
use std::time::Duration;

/// Metrics observer for detection runs.
pub trait DetectMetrics: Send + Sync {
    /// Record the outcome of one [`Detector::detect`](crate::Detector::detect)
    /// call.
    ///
    /// `scored` counts documents that produced a ratio, `flagged` those that
    /// met the threshold, and `unscored` those isolated after a failure.
    fn record_detect(&self, latency: Duration, scored: usize, flagged: usize, unscored: usize);

    /// Record one evidence pass. `unavailable` counts documents whose
    /// substring could not be computed.
    fn record_explain(&self, latency: Duration, documents: usize, unavailable: usize) {
        let _ = (latency, documents, unavailable);
    }
}
