use std::fmt;

use chrono::{DateTime, Utc};

use crate::condition::Condition;
use crate::file::FileRecord;

/// How the conditions of a [`ConditionSet`] combine.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CombineOp {
    /// At most one condition; it alone decides the match.
    Single,
    /// Every condition must match. An empty set matches nothing.
    And,
    /// At least one condition must match. An empty set matches nothing.
    Or,
}

impl fmt::Display for CombineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
        }
    }
}

impl Default for CombineOp {
    fn default() -> Self {
        Self::Single
    }
}

/// Ordered conditions combined under a [`CombineOp`].
///
/// The set maintains the invariant that the operator is
/// [`Single`](CombineOp::Single) exactly when it holds at most one
/// condition: pushing a second condition promotes the operator to
/// [`And`](CombineOp::And) unless the caller already chose
/// [`Or`](CombineOp::Or), and removing down to one condition demotes it
/// back to `Single`.
///
/// # Examples
///
/// ```
/// use rules::{CombineOp, Condition, ConditionSet};
///
/// let mut set = ConditionSet::single(Condition::file_extension("pdf").unwrap());
/// assert_eq!(set.combine(), CombineOp::Single);
///
/// set.push(Condition::name_contains("invoice").unwrap());
/// assert_eq!(set.combine(), CombineOp::And);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionSet {
    conditions: Vec<Condition>,
    combine: CombineOp,
}

impl ConditionSet {
    /// Creates an empty set. An empty set never matches any file.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            conditions: Vec::new(),
            combine: CombineOp::Single,
        }
    }

    /// Creates a set holding exactly one condition.
    #[must_use]
    pub fn single(condition: Condition) -> Self {
        Self {
            conditions: vec![condition],
            combine: CombineOp::Single,
        }
    }

    /// Creates an AND set over the given conditions.
    ///
    /// Sets of zero or one condition normalize to
    /// [`Single`](CombineOp::Single).
    #[must_use]
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::normalized(conditions, CombineOp::And)
    }

    /// Creates an OR set over the given conditions.
    ///
    /// Sets of zero or one condition normalize to
    /// [`Single`](CombineOp::Single).
    #[must_use]
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self::normalized(conditions, CombineOp::Or)
    }

    fn normalized(conditions: Vec<Condition>, combine: CombineOp) -> Self {
        let combine = if conditions.len() <= 1 {
            CombineOp::Single
        } else if combine == CombineOp::Single {
            CombineOp::And
        } else {
            combine
        };
        Self {
            conditions,
            combine,
        }
    }

    /// Appends a condition, promoting the operator to
    /// [`And`](CombineOp::And) when the set leaves the single-condition
    /// state.
    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
        if self.conditions.len() > 1 && self.combine == CombineOp::Single {
            self.combine = CombineOp::And;
        }
    }

    /// Sets the combining operator, keeping the size invariant.
    ///
    /// Multi-condition sets cannot demote to `Single`; requesting it leaves
    /// an AND set instead.
    #[must_use]
    pub fn with_combine(self, combine: CombineOp) -> Self {
        Self::normalized(self.conditions, combine)
    }

    /// Replaces the condition at `index` with a freshly validated one.
    ///
    /// Returns `false` when the index is out of bounds. This is the
    /// editor's "replace, don't mutate" path: conditions themselves stay
    /// immutable.
    pub fn replace(&mut self, index: usize, condition: Condition) -> bool {
        match self.conditions.get_mut(index) {
            Some(slot) => {
                *slot = condition;
                true
            }
            None => false,
        }
    }

    /// Removes and returns the condition at `index`, demoting the operator
    /// to `Single` when at most one condition remains.
    pub fn remove(&mut self, index: usize) -> Option<Condition> {
        if index >= self.conditions.len() {
            return None;
        }
        let removed = self.conditions.remove(index);
        if self.conditions.len() <= 1 {
            self.combine = CombineOp::Single;
        }
        Some(removed)
    }

    /// Returns the combining operator.
    #[must_use]
    pub const fn combine(&self) -> CombineOp {
        self.combine
    }

    /// Returns the conditions in evaluation order.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the number of conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns `true` when the set holds no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluates the set against a file.
    ///
    /// `Single` delegates to the sole condition (`false` when empty). `And`
    /// requires every condition; the empty AND is `false`, never vacuously
    /// true, so an empty rule cannot silently match everything. `Or`
    /// requires at least one.
    #[must_use]
    pub fn matches(&self, file: &FileRecord, now: DateTime<Utc>) -> bool {
        match self.combine {
            CombineOp::Single => self
                .conditions
                .first()
                .is_some_and(|condition| condition.matches(file, now)),
            CombineOp::And => {
                !self.conditions.is_empty()
                    && self
                        .conditions
                        .iter()
                        .all(|condition| condition.matches(file, now))
            }
            CombineOp::Or => self
                .conditions
                .iter()
                .any(|condition| condition.matches(file, now)),
        }
    }
}

/// Conditions that veto an otherwise-positive rule match.
///
/// Always OR-combined, independently of the main set's operator: a file is
/// excluded when **any** exclusion condition matches it. The empty set
/// never excludes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExclusionSet {
    conditions: Vec<Condition>,
}

impl ExclusionSet {
    /// Creates an empty exclusion set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Creates an exclusion set from the given conditions.
    #[must_use]
    pub const fn new(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    /// Appends an exclusion condition.
    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    /// Returns the exclusion conditions in order.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the number of exclusion conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns `true` when no exclusion conditions are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns `true` when any exclusion condition matches the file.
    #[must_use]
    pub fn excludes(&self, file: &FileRecord, now: DateTime<Utc>) -> bool {
        self.conditions
            .iter()
            .any(|condition| condition.matches(file, now))
    }
}

impl From<Vec<Condition>> for ExclusionSet {
    fn from(conditions: Vec<Condition>) -> Self {
        Self::new(conditions)
    }
}
