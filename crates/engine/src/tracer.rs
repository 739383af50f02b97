use std::collections::HashMap;

use rules::RuleId;

use crate::evaluate::{ENGINE_TARGET, MatchOutcome};

/// Aggregates statistics across a batch of evaluations.
///
/// Tracks how many files were evaluated, how many matched, and how often
/// each rule won. Use one tracer per preview or organizing pass, then emit
/// a single summary event instead of tracing every file.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use engine::{EvaluationTracer, evaluate};
/// use rules::{Condition, ConditionSet, Destination, FileRecord, KnownFolders, Rule, RuleAction};
///
/// let now = Utc::now();
/// let folders = KnownFolders::default();
/// let rules = vec![Rule::new(
///     "Cleanup",
///     ConditionSet::single(Condition::file_extension("tmp").unwrap()),
///     RuleAction::Delete,
///     Destination::Trash,
/// )];
///
/// let mut tracer = EvaluationTracer::new();
/// for path in ["/tmp/scratch.tmp", "/tmp/keep.txt"] {
///     let file = FileRecord::new(path, 1, now, now, now, &folders);
///     tracer.record(&evaluate(&file, &rules, now));
/// }
///
/// assert_eq!(tracer.total_evaluated(), 2);
/// assert_eq!(tracer.total_matched(), 1);
/// assert_eq!(tracer.total_unmatched(), 1);
/// tracer.summary();
/// ```
#[derive(Clone, Debug, Default)]
pub struct EvaluationTracer {
    total_evaluated: usize,
    total_matched: usize,
    hits_by_rule: HashMap<RuleId, u64>,
}

impl EvaluationTracer {
    /// Creates a tracer with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one evaluation outcome.
    pub fn record(&mut self, outcome: &MatchOutcome<'_>) {
        self.total_evaluated += 1;
        if let Some(rule) = outcome.rule() {
            self.total_matched += 1;
            *self.hits_by_rule.entry(rule.id()).or_insert(0) += 1;
        }
    }

    /// Returns the number of files evaluated.
    #[must_use]
    pub const fn total_evaluated(&self) -> usize {
        self.total_evaluated
    }

    /// Returns the number of files some rule claimed.
    #[must_use]
    pub const fn total_matched(&self) -> usize {
        self.total_matched
    }

    /// Returns the number of files no rule claimed.
    #[must_use]
    pub const fn total_unmatched(&self) -> usize {
        self.total_evaluated - self.total_matched
    }

    /// Returns how many files the given rule won.
    #[must_use]
    pub fn hits_for(&self, rule: RuleId) -> u64 {
        self.hits_by_rule.get(&rule).copied().unwrap_or(0)
    }

    /// Returns the ratio of matched files to evaluated files.
    ///
    /// Returns 0.0 when nothing has been evaluated.
    #[must_use]
    pub fn match_ratio(&self) -> f64 {
        if self.total_evaluated == 0 {
            0.0
        } else {
            (self.total_matched as f64) / (self.total_evaluated as f64)
        }
    }

    /// Emits a summary trace event with the accumulated statistics.
    pub fn summary(&self) {
        tracing::info!(
            target: ENGINE_TARGET,
            total_evaluated = self.total_evaluated,
            total_matched = self.total_matched,
            total_unmatched = self.total_unmatched(),
            distinct_rules_hit = self.hits_by_rule.len(),
            match_ratio = self.match_ratio(),
            "evaluation_summary"
        );
    }

    /// Resets all counters to zero.
    pub fn reset(&mut self) {
        self.total_evaluated = 0;
        self.total_matched = 0;
        self.hits_by_rule.clear();
    }
}
