// Evaluation metrics module
//
// Counts classification outcomes for the end-of-run summary

use crate::models::{Evaluation, Grade, GradeLabel};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Per-label counters for one evaluation run.
///
/// Uses atomic operations so a shared instance can be updated from several
/// classifying threads without locks.
#[derive(Debug)]
pub struct EvaluationMetrics {
    pub grade_a: AtomicUsize,
    pub grade_b: AtomicUsize,
    pub grade_c: AtomicUsize,
    pub grade_d: AtomicUsize,

    /// In total range, but in no band
    pub failing: AtomicUsize,

    /// Outside the total range
    pub out_of_range: AtomicUsize,

    start_time: Instant,
}

impl EvaluationMetrics {
    pub fn new() -> Self {
        Self {
            grade_a: AtomicUsize::new(0),
            grade_b: AtomicUsize::new(0),
            grade_c: AtomicUsize::new(0),
            grade_d: AtomicUsize::new(0),
            failing: AtomicUsize::new(0),
            out_of_range: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    fn counter(&self, label: GradeLabel) -> &AtomicUsize {
        match label {
            GradeLabel::Pass(Grade::A) => &self.grade_a,
            GradeLabel::Pass(Grade::B) => &self.grade_b,
            GradeLabel::Pass(Grade::C) => &self.grade_c,
            GradeLabel::Pass(Grade::D) => &self.grade_d,
            GradeLabel::Fail => &self.failing,
            GradeLabel::OutOfRange => &self.out_of_range,
        }
    }

    /// Record one classification
    pub fn record(&self, label: GradeLabel) {
        self.counter(label).fetch_add(1, Ordering::Relaxed);
    }

    /// Record every result of a batch
    pub fn record_all(&self, evaluations: &[Evaluation]) {
        for evaluation in evaluations {
            self.record(evaluation.label);
        }
    }

    pub fn count(&self, label: GradeLabel) -> usize {
        self.counter(label).load(Ordering::Relaxed)
    }

    /// Number of scores recorded so far
    pub fn total(&self) -> usize {
        [
            &self.grade_a,
            &self.grade_b,
            &self.grade_c,
            &self.grade_d,
            &self.failing,
            &self.out_of_range,
        ]
        .iter()
        .map(|counter| counter.load(Ordering::Relaxed))
        .sum()
    }

    /// Share of recorded scores that received a passing grade, 0.0 when empty
    pub fn pass_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let passed = Grade::ALL
            .iter()
            .map(|&grade| self.count(GradeLabel::Pass(grade)))
            .sum::<usize>();
        passed as f64 / total as f64
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Evaluation Summary ===");
        tracing::info!(
            "Scores: {} total in {:.2}ms",
            self.total(),
            self.elapsed().as_secs_f64() * 1000.0
        );
        tracing::info!(
            "Grades: A={}, B={}, C={}, D={}",
            self.grade_a.load(Ordering::Relaxed),
            self.grade_b.load(Ordering::Relaxed),
            self.grade_c.load(Ordering::Relaxed),
            self.grade_d.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Failing: {}, out of range: {}, pass rate: {:.1}%",
            self.failing.load(Ordering::Relaxed),
            self.out_of_range.load(Ordering::Relaxed),
            self.pass_rate() * 100.0
        );
    }
}

impl Default for EvaluationMetrics {
    fn default() -> Self {
        Self::new()
    }
}
