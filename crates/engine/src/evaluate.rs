use chrono::{DateTime, Utc};

use rules::{CombineOp, Destination, FileRecord, Rule, order_rules};

/// Target name for engine tracing events.
pub(crate) const ENGINE_TARGET: &str = "sweep::engine";

/// A rule that claimed a file, with the operator it matched under.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuleMatch<'a> {
    rule: &'a Rule,
    matched_via: CombineOp,
}

impl<'a> RuleMatch<'a> {
    /// Returns the winning rule.
    #[must_use]
    pub const fn rule(&self) -> &'a Rule {
        self.rule
    }

    /// Returns how the rule's condition set combined when it matched.
    #[must_use]
    pub const fn matched_via(&self) -> CombineOp {
        self.matched_via
    }

    /// Returns the destination the file should be routed to.
    #[must_use]
    pub const fn destination(&self) -> &'a Destination {
        self.rule.destination()
    }
}

/// Outcome of evaluating one file against a rule list.
///
/// `NoMatch` is a normal, first-class result - not a failure. Outcomes are
/// recomputed whenever the file set or rule set changes; nothing here is
/// meant to be cached or persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatchOutcome<'a> {
    /// The first enabled rule whose conditions held and whose exclusions
    /// did not.
    Matched(RuleMatch<'a>),
    /// No enabled rule claimed the file.
    NoMatch,
}

impl<'a> MatchOutcome<'a> {
    /// Returns `true` when a rule claimed the file.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// Returns the winning rule, if any.
    #[must_use]
    pub const fn rule(&self) -> Option<&'a Rule> {
        match self {
            Self::Matched(matched) => Some(matched.rule()),
            Self::NoMatch => None,
        }
    }

    /// Returns the winning rule's destination, if any.
    #[must_use]
    pub const fn destination(&self) -> Option<&'a Destination> {
        match self {
            Self::Matched(matched) => Some(matched.destination()),
            Self::NoMatch => None,
        }
    }
}

/// Evaluates a file against rules already in canonical order.
///
/// Rules are scanned in slice order (ascending priority - see
/// [`order_rules`]); disabled rules are skipped, and the first rule whose
/// conditions hold and whose exclusions do not wins outright. Evaluation
/// stops at the first match: rules form a prioritized decision list, not a
/// set of independent triggers, so a later rule never overrides an earlier
/// match however specific it may be.
///
/// The scan is O(rules x conditions) and allocates nothing, which keeps
/// interactive preview of a few hundred rules against a few thousand files
/// inside a debounce window. Callers snapshot the rule list before the
/// call; the engine never mutates or caches it.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use engine::evaluate;
/// use rules::{Condition, ConditionSet, Destination, FileRecord, KnownFolders, Rule, RuleAction};
///
/// let now = Utc::now();
/// let file = FileRecord::new("/tmp/song.mp3", 1, now, now, now, &KnownFolders::default());
/// let rules = vec![Rule::new(
///     "Music",
///     ConditionSet::single(Condition::file_extension("mp3").unwrap()),
///     RuleAction::Delete,
///     Destination::Trash,
/// )];
///
/// let outcome = evaluate(&file, &rules, now);
/// assert_eq!(outcome.rule().map(rules::Rule::name), Some("Music"));
/// ```
#[must_use]
pub fn evaluate<'a>(file: &FileRecord, rules: &'a [Rule], now: DateTime<Utc>) -> MatchOutcome<'a> {
    for rule in rules {
        if !rule.is_enabled() {
            continue;
        }

        let matched = rule.matches(file, now);
        tracing::trace!(
            target: ENGINE_TARGET,
            rule = %rule.name(),
            file = %file.name(),
            matched,
            "rule_evaluated"
        );

        if matched {
            tracing::debug!(
                target: ENGINE_TARGET,
                rule = %rule.name(),
                file = %file.name(),
                destination = %rule.destination(),
                "file_matched"
            );
            return MatchOutcome::Matched(RuleMatch {
                rule,
                matched_via: rule.conditions().combine(),
            });
        }
    }

    MatchOutcome::NoMatch
}

/// Evaluates a file against an unordered rule snapshot.
///
/// Sorts the snapshot into canonical order first, then delegates to
/// [`evaluate`]. Convenient for callers holding repository output whose
/// order reflects the UI rather than priorities.
pub fn evaluate_snapshot<'a>(
    file: &FileRecord,
    rules: &'a mut [Rule],
    now: DateTime<Utc>,
) -> MatchOutcome<'a> {
    order_rules(rules);
    evaluate(file, rules, now)
}

/// Evaluates every file against the same ordered rule list.
///
/// Returns one outcome per file, in input order. This is the batch entry
/// point for the debounced live-preview path; for cancellable long-running
/// batches the caller runs it on a worker and discards stale results.
#[must_use]
pub fn evaluate_all<'a>(
    files: &[FileRecord],
    rules: &'a [Rule],
    now: DateTime<Utc>,
) -> Vec<MatchOutcome<'a>> {
    files.iter().map(|file| evaluate(file, rules, now)).collect()
}
