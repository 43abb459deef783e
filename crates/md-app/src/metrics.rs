//! Prometheus metrics for practice activity.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::session::{ExitReason, PracticeMode};

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new();

    // Accuracy is a percentage, bucket it in steps of ten
    let builder = builder.set_buckets_for_metric(
        Matcher::Full("practice_batch_accuracy_percent".to_string()),
        &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0],
    )?;

    let handle = builder.install_recorder()?;

    Ok(handle)
}

/// Record a graded batch
pub fn record_batch_graded(mode: PracticeMode, score: usize, total: usize) {
    let outcome = if total > 0 && score == total {
        "perfect"
    } else {
        "imperfect"
    };

    counter!(
        "practice_batches_total",
        "mode" => mode.as_str(),
        "outcome" => outcome
    )
    .increment(1);

    histogram!("practice_batch_accuracy_percent", "mode" => mode.as_str())
        .record(md_store::models::accuracy(score, total));
}

/// Record an elimination after a perfect review batch
pub fn record_elimination(removed: usize, remaining: usize) {
    counter!("errors_eliminated_total").increment(removed as u64);
    gauge!("error_set_size").set(remaining as f64);
}

/// Record a session ending in a redirect
pub fn record_session_exit(reason: ExitReason) {
    counter!("session_exits_total", "reason" => reason.as_str()).increment(1);
}

/// Record an answer rejected at input time
pub fn record_rejected_answer() {
    counter!("answers_rejected_total").increment(1);
}
