use std::fmt;

use rules::{Rule, RuleId};

use crate::evaluate::ENGINE_TARGET;
use crate::profile::{Profile, profiles_subsume, satisfiable_profiles};

/// Relationship between two rules whose match sets intersect.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OverlapKind {
    /// The candidate has strictly higher priority and fully subsumes the
    /// other rule, which can never fire again.
    Shadows,
    /// The other rule has strictly higher priority and fully subsumes the
    /// candidate, which will never fire.
    ShadowedBy,
    /// The match sets intersect without either side covering the other;
    /// some files are ambiguous, not all.
    PartialOverlap,
}

impl fmt::Display for OverlapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shadows => f.write_str("shadows"),
            Self::ShadowedBy => f.write_str("shadowed by"),
            Self::PartialOverlap => f.write_str("partial overlap"),
        }
    }
}

/// A detected intersection between the candidate rule and an existing one.
///
/// Produced transiently for the rule editor's warning dialog; never
/// persisted.
#[derive(Clone, Debug)]
pub struct Overlap<'a> {
    candidate: &'a Rule,
    other: &'a Rule,
    kind: OverlapKind,
    description: String,
}

impl<'a> Overlap<'a> {
    /// Returns the rule being saved.
    #[must_use]
    pub const fn candidate(&self) -> &'a Rule {
        self.candidate
    }

    /// Returns the existing rule it intersects with.
    #[must_use]
    pub const fn other(&self) -> &'a Rule {
        self.other
    }

    /// Returns the relationship classification.
    #[must_use]
    pub const fn kind(&self) -> OverlapKind {
        self.kind
    }

    /// Returns a human-readable summary of the overlapping dimensions.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Finds enabled rules whose match sets intersect the candidate's.
///
/// Run by the rule editor before committing a new or edited rule, so the
/// user learns when the rule would never fire (shadowed by a
/// higher-priority superset) or would silently steal matches from a
/// lower-priority rule. `exclude` names the stored id of the rule being
/// edited, so a rule is never compared against its own previous version;
/// rules structurally identical to the candidate are skipped for the same
/// reason.
///
/// The analysis is a conservative syntactic comparison of condition
/// dimensions, not a decision procedure - full overlap of open-ended
/// predicates is not decidable from the editor vocabulary alone. Missed
/// overlaps are acceptable; for the decidable dimensions (extensions,
/// name affixes, kinds, locations) reported overlaps are real. Numeric
/// thresholds are treated range-wise: older-than-7 overlaps older-than-30,
/// so loosely-bounded pairs may be reported even when no concrete file
/// ever hits both.
///
/// The result is advisory. An empty list never blocks a save, and the
/// caller decides whether to save anyway, edit, or cancel.
#[must_use]
pub fn detect_overlaps<'a>(
    candidate: &'a Rule,
    existing: &'a [Rule],
    exclude: Option<RuleId>,
) -> Vec<Overlap<'a>> {
    let mut overlaps = Vec::new();

    if !candidate.is_enabled() {
        return overlaps;
    }
    let candidate_profiles = satisfiable_profiles(candidate);
    if candidate_profiles.is_empty() {
        return overlaps;
    }

    for other in existing {
        if !other.is_enabled() || other.id() == candidate.id() {
            continue;
        }
        if exclude == Some(other.id()) {
            continue;
        }
        if structurally_identical(candidate, other) {
            continue;
        }

        let other_profiles = satisfiable_profiles(other);
        if other_profiles.is_empty() {
            continue;
        }

        let Some((p, q)) = first_compatible_pair(&candidate_profiles, &other_profiles) else {
            continue;
        };

        if exclusions_cover(candidate, &other_profiles) || exclusions_cover(other, &candidate_profiles)
        {
            continue;
        }

        let kind = classify(candidate, &candidate_profiles, other, &other_profiles);
        let description = describe(p, q);
        tracing::debug!(
            target: ENGINE_TARGET,
            candidate = %candidate.name(),
            other = %other.name(),
            kind = %kind,
            "overlap_detected"
        );
        overlaps.push(Overlap {
            candidate,
            other,
            kind,
            description,
        });
    }

    overlaps
}

fn structurally_identical(a: &Rule, b: &Rule) -> bool {
    a.conditions() == b.conditions()
        && a.exclusions() == b.exclusions()
        && a.action() == b.action()
        && a.destination() == b.destination()
}

fn first_compatible_pair<'p>(
    candidate: &'p [Profile],
    other: &'p [Profile],
) -> Option<(&'p Profile, &'p Profile)> {
    for p in candidate {
        for q in other {
            if p.merge(q).is_satisfiable() {
                return Some((p, q));
            }
        }
    }
    None
}

/// Whether one of `rule`'s exclusion conditions provably fires for every
/// file the other side's profiles can match, making the pair disjoint.
fn exclusions_cover(rule: &Rule, other_profiles: &[Profile]) -> bool {
    rule.exclusions().conditions().iter().any(|condition| {
        let exclusion = Profile::from_condition(condition);
        other_profiles.iter().all(|q| exclusion.subsumes(q))
    })
}

fn classify(
    candidate: &Rule,
    candidate_profiles: &[Profile],
    other: &Rule,
    other_profiles: &[Profile],
) -> OverlapKind {
    // A subsuming side with its own exclusions might still reject files the
    // other side accepts, so full subsumption additionally requires its
    // exclusion set to be empty or identical to the other side's.
    let candidate_subsumes = profiles_subsume(candidate_profiles, other_profiles)
        && (candidate.exclusions().is_empty() || candidate.exclusions() == other.exclusions());
    let other_subsumes = profiles_subsume(other_profiles, candidate_profiles)
        && (other.exclusions().is_empty() || other.exclusions() == candidate.exclusions());

    if candidate.priority() < other.priority() && candidate_subsumes {
        OverlapKind::Shadows
    } else if other.priority() < candidate.priority() && other_subsumes {
        OverlapKind::ShadowedBy
    } else {
        OverlapKind::PartialOverlap
    }
}

fn describe(candidate: &Profile, other: &Profile) -> String {
    let mut parts = Vec::new();

    match (&candidate.extensions, &other.extensions) {
        (Some(mine), Some(theirs)) => {
            let shared: Vec<&str> = mine
                .intersection(theirs)
                .map(String::as_str)
                .collect();
            if !shared.is_empty() {
                parts.push(format!("both match extension \"{}\"", shared.join("\", \"")));
            }
        }
        (Some(extensions), None) | (None, Some(extensions)) => {
            if let Some(kinds) = candidate.kinds.as_ref().or(other.kinds.as_ref()) {
                let covered: Vec<&str> = extensions
                    .iter()
                    .filter(|extension| {
                        rules::FileKind::from_extension(extension)
                            .is_some_and(|kind| kinds.contains(&kind))
                    })
                    .map(String::as_str)
                    .collect();
                if !covered.is_empty() {
                    parts.push(format!(
                        "extension \"{}\" falls under the matched kind",
                        covered.join("\", \"")
                    ));
                }
            }
        }
        (None, None) => {}
    }

    if let (Some(mine), Some(theirs)) = (&candidate.kinds, &other.kinds) {
        let shared: Vec<&str> = mine
            .intersection(theirs)
            .map(|kind| kind.as_str())
            .collect();
        if !shared.is_empty() {
            parts.push(format!("both match kind {}", shared.join(", ")));
        }
    }

    if let (Some(mine), Some(theirs)) = (&candidate.locations, &other.locations) {
        let shared: Vec<&str> = mine
            .intersection(theirs)
            .map(|location| location.as_str())
            .collect();
        if !shared.is_empty() {
            parts.push(format!("both match files from {}", shared.join(", ")));
        }
    }

    let candidate_names = !candidate.contains.is_empty()
        || !candidate.prefixes.is_empty()
        || !candidate.suffixes.is_empty();
    let other_names =
        !other.contains.is_empty() || !other.prefixes.is_empty() || !other.suffixes.is_empty();
    if candidate_names && other_names {
        parts.push("both constrain the file name".to_string());
    }

    if candidate.created_older.is_some() && other.created_older.is_some() {
        parts.push("their age thresholds overlap range-wise".to_string());
    }
    if candidate.min_size.is_some() && other.min_size.is_some() {
        parts.push("their size thresholds overlap range-wise".to_string());
    }

    if parts.is_empty() {
        "their conditions can match the same files".to_string()
    } else {
        parts.join("; ")
    }
}
