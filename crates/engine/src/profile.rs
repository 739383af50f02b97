//! Syntactic per-dimension summaries of rule condition sets.
//!
//! The overlap detector never evaluates conditions against real files; it
//! reasons over these summaries instead. A [`Profile`] captures one
//! conjunction of conditions (one disjunct of a rule): the extension set it
//! pins, the kinds and locations it allows, its name needles, and its age
//! and size thresholds. `Or` sets expand into one profile per condition.
//!
//! The analysis is deliberately conservative. Extension, kind, location,
//! and name prefix/suffix constraints are decidable and drive both the
//! disjointness and the subsumption checks; open-ended numeric thresholds
//! never separate two rules, because a file older than 30 days is also
//! older than 7.

use std::collections::BTreeSet;

use rules::{CombineOp, Condition, FileKind, Rule, SourceLocation};

/// One conjunction of condition constraints.
#[derive(Clone, Debug, Default)]
pub(crate) struct Profile {
    pub(crate) extensions: Option<BTreeSet<String>>,
    pub(crate) kinds: Option<BTreeSet<FileKind>>,
    pub(crate) locations: Option<BTreeSet<SourceLocation>>,
    pub(crate) contains: Vec<String>,
    pub(crate) prefixes: Vec<String>,
    pub(crate) suffixes: Vec<String>,
    pub(crate) created_older: Option<u32>,
    pub(crate) modified_older: Option<u32>,
    pub(crate) accessed_older: Option<u32>,
    pub(crate) min_size: Option<u64>,
}

impl Profile {
    pub(crate) fn from_condition(condition: &Condition) -> Self {
        let mut profile = Self::default();
        profile.add(condition);
        profile
    }

    fn from_conjunction(conditions: &[Condition]) -> Self {
        let mut profile = Self::default();
        for condition in conditions {
            profile.add(condition);
        }
        profile
    }

    fn add(&mut self, condition: &Condition) {
        match condition {
            Condition::FileExtension(extension) => {
                intersect_with(&mut self.extensions, extension.clone());
            }
            Condition::ExtensionOlderThan { extension, days } => {
                intersect_with(&mut self.extensions, extension.clone());
                raise(&mut self.created_older, *days);
            }
            Condition::NameContains(needle) => self.contains.push(needle.clone()),
            Condition::NameStartsWith(needle) => self.prefixes.push(needle.clone()),
            Condition::NameEndsWith(needle) => self.suffixes.push(needle.clone()),
            Condition::DateOlderThan { days } => raise(&mut self.created_older, *days),
            Condition::DateModifiedOlderThan { days } => raise(&mut self.modified_older, *days),
            Condition::DateAccessedOlderThan { days } => raise(&mut self.accessed_older, *days),
            Condition::SizeLargerThan { bytes } => raise(&mut self.min_size, *bytes),
            Condition::FileKind(kind) => {
                intersect_with(&mut self.kinds, *kind);
            }
            Condition::SourceLocation(location) => {
                intersect_with(&mut self.locations, *location);
            }
        }
    }

    /// Conjoins two profiles, as if their conditions shared one AND set.
    pub(crate) fn merge(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.extensions = intersect_sets(&self.extensions, &other.extensions);
        merged.kinds = intersect_sets(&self.kinds, &other.kinds);
        merged.locations = intersect_sets(&self.locations, &other.locations);
        merged.contains.extend(other.contains.iter().cloned());
        merged.prefixes.extend(other.prefixes.iter().cloned());
        merged.suffixes.extend(other.suffixes.iter().cloned());
        merged.created_older = max_option(self.created_older, other.created_older);
        merged.modified_older = max_option(self.modified_older, other.modified_older);
        merged.accessed_older = max_option(self.accessed_older, other.accessed_older);
        merged.min_size = max_option(self.min_size, other.min_size);
        merged
    }

    /// Whether some file could satisfy every constraint at once.
    ///
    /// Only decidable dimensions can falsify this: pinned sets that
    /// intersected to nothing, extensions whose derived kind falls outside
    /// the allowed kinds, and name prefixes/suffixes that contradict each
    /// other.
    pub(crate) fn is_satisfiable(&self) -> bool {
        if let Some(extensions) = &self.extensions
            && extensions.is_empty()
        {
            return false;
        }
        if let Some(kinds) = &self.kinds
            && kinds.is_empty()
        {
            return false;
        }
        if let Some(locations) = &self.locations
            && locations.is_empty()
        {
            return false;
        }

        if let (Some(extensions), Some(kinds)) = (&self.extensions, &self.kinds) {
            let some_extension_fits = extensions.iter().any(|extension| {
                FileKind::from_extension(extension).is_some_and(|kind| kinds.contains(&kind))
            });
            if !some_extension_fits {
                return false;
            }
        }

        for (index, a) in self.prefixes.iter().enumerate() {
            for b in &self.prefixes[index + 1..] {
                if !a.starts_with(b.as_str()) && !b.starts_with(a.as_str()) {
                    return false;
                }
            }
        }
        for (index, a) in self.suffixes.iter().enumerate() {
            for b in &self.suffixes[index + 1..] {
                if !a.ends_with(b.as_str()) && !b.ends_with(a.as_str()) {
                    return false;
                }
            }
        }

        true
    }

    /// Whether every file matching `other` also matches `self`.
    ///
    /// Checks that each of `self`'s constraints is implied by `other`'s;
    /// unconstrained dimensions are implied trivially. Kind and extension
    /// constraints imply each other through the fixed classification
    /// tables.
    pub(crate) fn subsumes(&self, other: &Self) -> bool {
        if let Some(allowed) = &self.extensions {
            let by_extensions = other
                .extensions
                .as_ref()
                .is_some_and(|theirs| theirs.is_subset(allowed));
            let by_kinds = other.kinds.as_ref().is_some_and(|kinds| {
                kinds.iter().all(|kind| {
                    kind.extensions()
                        .iter()
                        .all(|extension| allowed.contains(*extension))
                })
            });
            if !by_extensions && !by_kinds {
                return false;
            }
        }

        if let Some(allowed) = &self.kinds {
            let by_kinds = other
                .kinds
                .as_ref()
                .is_some_and(|theirs| theirs.is_subset(allowed));
            let by_extensions = other.extensions.as_ref().is_some_and(|extensions| {
                extensions.iter().all(|extension| {
                    FileKind::from_extension(extension).is_some_and(|kind| allowed.contains(&kind))
                })
            });
            if !by_kinds && !by_extensions {
                return false;
            }
        }

        if let Some(allowed) = &self.locations
            && !other
                .locations
                .as_ref()
                .is_some_and(|theirs| theirs.is_subset(allowed))
        {
            return false;
        }

        for needle in &self.contains {
            let implied = other
                .contains
                .iter()
                .any(|theirs| theirs.contains(needle.as_str()))
                || other
                    .prefixes
                    .iter()
                    .any(|prefix| prefix.contains(needle.as_str()))
                || other
                    .suffixes
                    .iter()
                    .any(|suffix| suffix.contains(needle.as_str()));
            if !implied {
                return false;
            }
        }

        for prefix in &self.prefixes {
            if !other
                .prefixes
                .iter()
                .any(|theirs| theirs.starts_with(prefix.as_str()))
            {
                return false;
            }
        }

        for suffix in &self.suffixes {
            if !other
                .suffixes
                .iter()
                .any(|theirs| theirs.ends_with(suffix.as_str()))
            {
                return false;
            }
        }

        threshold_implied(self.created_older, other.created_older)
            && threshold_implied(self.modified_older, other.modified_older)
            && threshold_implied(self.accessed_older, other.accessed_older)
            && threshold_implied(self.min_size, other.min_size)
    }
}

/// Expands a rule's condition set into satisfiable disjunct profiles.
///
/// `Single` and `And` sets produce at most one profile; `Or` sets produce
/// one per condition. A rule with no conditions - or whose constraints
/// contradict each other - produces none and matches nothing.
pub(crate) fn satisfiable_profiles(rule: &Rule) -> Vec<Profile> {
    let conditions = rule.conditions().conditions();
    if conditions.is_empty() {
        return Vec::new();
    }

    let profiles = match rule.conditions().combine() {
        CombineOp::Single | CombineOp::And => vec![Profile::from_conjunction(conditions)],
        CombineOp::Or => conditions.iter().map(Profile::from_condition).collect(),
    };

    profiles
        .into_iter()
        .filter(Profile::is_satisfiable)
        .collect()
}

/// Whether every disjunct of `other` is covered by some disjunct of `this`.
pub(crate) fn profiles_subsume(this: &[Profile], other: &[Profile]) -> bool {
    other
        .iter()
        .all(|q| this.iter().any(|p| p.subsumes(q)))
}

fn intersect_with<T: Ord>(slot: &mut Option<BTreeSet<T>>, value: T) {
    match slot {
        None => {
            *slot = Some(BTreeSet::from_iter([value]));
        }
        Some(set) => {
            let keep = set.contains(&value);
            set.clear();
            if keep {
                set.insert(value);
            }
        }
    }
}

fn intersect_sets<T: Ord + Clone>(
    a: &Option<BTreeSet<T>>,
    b: &Option<BTreeSet<T>>,
) -> Option<BTreeSet<T>> {
    match (a, b) {
        (None, None) => None,
        (Some(set), None) | (None, Some(set)) => Some(set.clone()),
        (Some(a), Some(b)) => Some(a.intersection(b).cloned().collect()),
    }
}

fn raise<T: Ord + Copy>(slot: &mut Option<T>, value: T) {
    *slot = Some(slot.map_or(value, |current| current.max(value)));
}

fn max_option<T: Ord + Copy>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (None, None) => None,
        (Some(value), None) | (None, Some(value)) => Some(value),
        (Some(a), Some(b)) => Some(a.max(b)),
    }
}

/// An older-than or larger-than constraint of `self` is implied when the
/// other side demands at least as much.
fn threshold_implied<T: Ord + Copy>(mine: Option<T>, theirs: Option<T>) -> bool {
    match mine {
        None => true,
        Some(required) => theirs.is_some_and(|actual| actual >= required),
    }
}
