use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::destination::Destination;
use crate::error::RuleValidationError;
use crate::file::FileRecord;
use crate::set::{ConditionSet, ExclusionSet};

/// Stable identifier of a rule.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleId(Uuid);

impl RuleId {
    /// Mints a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Operation performed on a file when its rule matches.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RuleAction {
    /// Move the file to the destination folder.
    Move,
    /// Copy the file to the destination folder.
    Copy,
    /// Delete the file (destination is ignored).
    Delete,
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move => f.write_str("move"),
            Self::Copy => f.write_str("copy"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// A named, priority-ordered file-routing policy.
///
/// A rule matches a file when its condition set matches and none of its
/// exclusions do. The matching engine only ever reads rules; edits go
/// through the setters, which replace whole values with freshly validated
/// ones.
///
/// Priority is the explicit `priority` field - lower values evaluate first.
/// The position of a rule in any particular list is a UI concern and never
/// authoritative; [`order_rules`] produces the canonical evaluation order,
/// breaking priority ties by creation time and then identifier so the
/// order is total and stable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    id: RuleId,
    name: String,
    conditions: ConditionSet,
    exclusions: ExclusionSet,
    action: RuleAction,
    destination: Destination,
    enabled: bool,
    priority: i32,
    created_at: DateTime<Utc>,
    category: Option<String>,
}

impl Rule {
    /// Creates an enabled rule with priority `0` and no exclusions.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        conditions: ConditionSet,
        action: RuleAction,
        destination: Destination,
    ) -> Self {
        Self {
            id: RuleId::new(),
            name: name.into(),
            conditions,
            exclusions: ExclusionSet::empty(),
            action,
            destination,
            enabled: true,
            priority: 0,
            created_at: Utc::now(),
            category: None,
        }
    }

    /// Sets the identifier; used when restoring persisted rules.
    #[must_use]
    pub const fn with_id(mut self, id: RuleId) -> Self {
        self.id = id;
        self
    }

    /// Sets the exclusion set.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Sets the evaluation priority (lower evaluates first).
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets whether the rule participates in evaluation.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the creation timestamp; used when restoring persisted rules.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the optional category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns the rule identifier.
    #[must_use]
    pub const fn id(&self) -> RuleId {
        self.id
    }

    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the condition set.
    #[must_use]
    pub const fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    /// Returns the exclusion set.
    #[must_use]
    pub const fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Returns the action taken on matching files.
    #[must_use]
    pub const fn action(&self) -> RuleAction {
        self.action
    }

    /// Returns the destination reference.
    #[must_use]
    pub const fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Returns whether the rule participates in evaluation.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the evaluation priority (lower evaluates first).
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the optional category label.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Renames the rule.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replaces the condition set.
    pub fn set_conditions(&mut self, conditions: ConditionSet) {
        self.conditions = conditions;
    }

    /// Replaces the exclusion set.
    pub fn set_exclusions(&mut self, exclusions: ExclusionSet) {
        self.exclusions = exclusions;
    }

    /// Changes the action.
    pub fn set_action(&mut self, action: RuleAction) {
        self.action = action;
    }

    /// Replaces the destination reference.
    pub fn set_destination(&mut self, destination: Destination) {
        self.destination = destination;
    }

    /// Enables or disables the rule.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Changes the evaluation priority.
    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    /// Returns `true` when the condition set matches the file and no
    /// exclusion vetoes it.
    #[must_use]
    pub fn matches(&self, file: &FileRecord, now: DateTime<Utc>) -> bool {
        self.conditions.matches(file, now) && !self.exclusions.excludes(file, now)
    }

    /// Draft-level validation run by the rule editor before save.
    ///
    /// Checks the name, the no-conditions invariant (an empty rule can
    /// never match, which must be caught here rather than discovered at
    /// evaluation time), and that move/copy rules target a folder. A
    /// placeholder folder without an access grant passes; see
    /// [`validate_runnable`](Self::validate_runnable).
    pub fn validate(&self) -> Result<(), RuleValidationError> {
        if self.name.trim().is_empty() {
            return Err(RuleValidationError::EmptyName);
        }
        if self.conditions.is_empty() {
            return Err(RuleValidationError::NoConditions {
                name: self.name.clone(),
            });
        }
        if matches!(self.action, RuleAction::Move | RuleAction::Copy)
            && self.destination.is_trash()
        {
            return Err(RuleValidationError::MissingDestination {
                name: self.name.clone(),
                action: self.action,
            });
        }
        Ok(())
    }

    /// Strict validation for rules about to run.
    ///
    /// Everything [`validate`](Self::validate) checks, plus: move/copy
    /// destinations must carry a non-empty access handle.
    pub fn validate_runnable(&self) -> Result<(), RuleValidationError> {
        self.validate()?;
        if matches!(self.action, RuleAction::Move | RuleAction::Copy)
            && self.destination.bookmark().is_none()
        {
            return Err(RuleValidationError::MissingBookmark {
                name: self.name.clone(),
                display_name: self.destination.display_name().to_string(),
            });
        }
        Ok(())
    }
}

/// Sorts rules into canonical evaluation order.
///
/// Ascending priority, with ties broken by creation time and then
/// identifier. The sort is total, so two snapshots of the same rules always
/// evaluate in the same order.
pub fn order_rules(rules: &mut [Rule]) {
    rules.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Rewrites priorities to match the slice's current order.
///
/// Used after a drag-to-reorder commit: the UI's array order becomes the
/// explicit priority field, which is the engine's only source of truth.
pub fn normalize_priorities(rules: &mut [Rule]) {
    let mut next = 0i32;
    for rule in rules {
        rule.priority = next;
        next += 1;
    }
}
