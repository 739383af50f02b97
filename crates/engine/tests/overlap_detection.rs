//! Tests for the advisory rule overlap detector.
//!
//! The detector compares condition dimensions syntactically. For the
//! decidable dimensions (extensions, name affixes, kinds, locations) it
//! must not report overlaps that cannot happen; for open-ended numeric
//! thresholds, range-wise overlaps are reported by design.

use engine::{OverlapKind, detect_overlaps};
use rules::{
    BookmarkHandle, Condition, ConditionField, ConditionSet, Destination, ExclusionSet, Rule,
    RuleAction, RuleId,
};

fn dest(name: &str) -> Destination {
    Destination::folder(BookmarkHandle::new(*b"grant"), name)
}

fn rule(name: &str, priority: i32, conditions: ConditionSet) -> Rule {
    Rule::new(name, conditions, RuleAction::Move, dest(name)).with_priority(priority)
}

fn ext(value: &str) -> Condition {
    Condition::file_extension(value).unwrap()
}

// =============================================================================
// Classification
// =============================================================================

/// A higher-priority candidate with identical conditions shadows the
/// existing rule entirely.
#[test]
fn identical_conditions_with_higher_priority_shadow() {
    let candidate = rule("winner", 1, ConditionSet::single(ext("pdf")));
    // Different destination, so the rules are not structurally identical.
    let existing = vec![rule("loser", 2, ConditionSet::single(ext("pdf")))];

    let overlaps = detect_overlaps(&candidate, &existing, None);
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].kind(), OverlapKind::Shadows);
    assert_eq!(overlaps[0].other().name(), "loser");
}

/// The symmetric probe reports the mirrored classification.
#[test]
fn overlap_classification_is_symmetric() {
    let a = rule("a", 1, ConditionSet::single(ext("pdf")));
    let b = rule("b", 2, ConditionSet::single(ext("pdf")));

    let forward = detect_overlaps(&a, std::slice::from_ref(&b), None);
    assert_eq!(forward[0].kind(), OverlapKind::Shadows);

    let backward = detect_overlaps(&b, std::slice::from_ref(&a), None);
    assert_eq!(backward[0].kind(), OverlapKind::ShadowedBy);
}

/// A broader candidate shadows a narrower rule it fully contains.
#[test]
fn broader_name_filter_shadows_narrower() {
    let candidate = rule(
        "broad",
        1,
        ConditionSet::single(Condition::name_contains("inv").unwrap()),
    );
    let existing = vec![rule(
        "narrow",
        2,
        ConditionSet::single(Condition::name_contains("invoice").unwrap()),
    )];

    let overlaps = detect_overlaps(&candidate, &existing, None);
    assert_eq!(overlaps[0].kind(), OverlapKind::Shadows);
}

/// A kind rule shadows an extension rule classified under that kind.
#[test]
fn kind_rule_shadows_extension_rule() {
    let candidate = rule(
        "all images",
        1,
        ConditionSet::single(Condition::parse(ConditionField::FileKind, "image").unwrap()),
    );
    let existing = vec![rule("jpegs", 2, ConditionSet::single(ext("jpg")))];

    let overlaps = detect_overlaps(&candidate, &existing, None);
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].kind(), OverlapKind::Shadows);
}

/// Rules that intersect without either containing the other report a
/// partial overlap.
#[test]
fn intersecting_rules_report_partial_overlap() {
    let candidate = rule("pdfs", 1, ConditionSet::single(ext("pdf")));
    let existing = vec![rule(
        "invoices",
        2,
        ConditionSet::single(Condition::name_contains("invoice").unwrap()),
    )];

    let overlaps = detect_overlaps(&candidate, &existing, None);
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].kind(), OverlapKind::PartialOverlap);
}

/// A lower age threshold contains a higher one: files older than 30 days
/// are also older than 7.
#[test]
fn lower_age_threshold_shadows_higher() {
    let candidate = rule(
        "week old",
        1,
        ConditionSet::all(vec![ext("pdf"), Condition::date_older_than(7)]),
    );
    let existing = vec![rule(
        "month old",
        2,
        ConditionSet::all(vec![ext("pdf"), Condition::date_older_than(30)]),
    )];

    let overlaps = detect_overlaps(&candidate, &existing, None);
    assert_eq!(overlaps[0].kind(), OverlapKind::Shadows);
}

/// Range-wise numeric overlap without subsumption stays partial.
#[test]
fn age_and_size_thresholds_overlap_range_wise() {
    let candidate = rule(
        "old",
        1,
        ConditionSet::all(vec![
            Condition::date_older_than(7),
            Condition::size_larger_than(10),
        ]),
    );
    let existing = vec![rule(
        "big",
        2,
        ConditionSet::all(vec![
            Condition::date_older_than(30),
            Condition::size_larger_than(5),
        ]),
    )];

    let overlaps = detect_overlaps(&candidate, &existing, None);
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].kind(), OverlapKind::PartialOverlap);
}

// =============================================================================
// Decidable Disjointness (no false positives)
// =============================================================================

/// Disjoint extension sets never report an overlap.
#[test]
fn disjoint_extensions_do_not_overlap() {
    let candidate = rule("pdfs", 1, ConditionSet::single(ext("pdf")));
    let existing = vec![rule("archives", 2, ConditionSet::single(ext("zip")))];

    assert!(detect_overlaps(&candidate, &existing, None).is_empty());
}

/// An extension outside the other rule's kind never reports an overlap.
#[test]
fn extension_outside_kind_does_not_overlap() {
    let candidate = rule("pdfs", 1, ConditionSet::single(ext("pdf")));
    let existing = vec![rule(
        "images",
        2,
        ConditionSet::single(Condition::parse(ConditionField::FileKind, "image").unwrap()),
    )];

    assert!(detect_overlaps(&candidate, &existing, None).is_empty());
}

/// Disjoint source locations never report an overlap.
#[test]
fn disjoint_locations_do_not_overlap() {
    let candidate = rule(
        "downloads",
        1,
        ConditionSet::all(vec![
            ext("pdf"),
            Condition::parse(ConditionField::SourceLocation, "downloads").unwrap(),
        ]),
    );
    let existing = vec![rule(
        "desktop",
        2,
        ConditionSet::all(vec![
            ext("pdf"),
            Condition::parse(ConditionField::SourceLocation, "desktop").unwrap(),
        ]),
    )];

    assert!(detect_overlaps(&candidate, &existing, None).is_empty());
}

/// Incompatible name prefixes never report an overlap.
#[test]
fn incompatible_prefixes_do_not_overlap() {
    let candidate = rule(
        "screenshots",
        1,
        ConditionSet::single(Condition::name_starts_with("screenshot_").unwrap()),
    );
    let existing = vec![rule(
        "scans",
        2,
        ConditionSet::single(Condition::name_starts_with("scan_").unwrap()),
    )];

    assert!(detect_overlaps(&candidate, &existing, None).is_empty());
}

/// An OR rule overlaps when any of its branches does.
#[test]
fn or_branches_overlap_independently() {
    let candidate = rule(
        "docs or sheets",
        1,
        ConditionSet::any(vec![ext("pdf"), ext("xlsx")]),
    );
    let existing = vec![rule("sheets", 2, ConditionSet::single(ext("xlsx")))];

    let overlaps = detect_overlaps(&candidate, &existing, None);
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].kind(), OverlapKind::Shadows);
}

// =============================================================================
// Exclusions
// =============================================================================

/// An exclusion that provably covers the other rule disjoints the pair.
#[test]
fn covering_exclusion_disjoints_the_pair() {
    let candidate = rule(
        "reports",
        1,
        ConditionSet::single(Condition::name_contains("report").unwrap()),
    )
    .with_exclusions(ExclusionSet::new(vec![ext("pdf")]));
    let existing = vec![rule(
        "pdf reports",
        2,
        ConditionSet::all(vec![ext("pdf"), Condition::name_contains("report").unwrap()]),
    )];

    assert!(detect_overlaps(&candidate, &existing, None).is_empty());
}

/// A subsuming candidate with extra exclusions is downgraded to partial
/// overlap: its exclusions may spare files the other rule would claim.
#[test]
fn exclusions_downgrade_subsumption_to_partial() {
    let candidate = rule("pdfs", 1, ConditionSet::single(ext("pdf"))).with_exclusions(
        ExclusionSet::new(vec![Condition::name_contains("draft").unwrap()]),
    );
    let existing = vec![rule("also pdfs", 2, ConditionSet::single(ext("pdf")))];

    let overlaps = detect_overlaps(&candidate, &existing, None);
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].kind(), OverlapKind::PartialOverlap);
}

// =============================================================================
// Skipped Comparisons
// =============================================================================

/// Disabled rules are not compared.
#[test]
fn disabled_rules_are_ignored() {
    let candidate = rule("pdfs", 1, ConditionSet::single(ext("pdf")));
    let existing = vec![rule("off", 2, ConditionSet::single(ext("pdf"))).with_enabled(false)];

    assert!(detect_overlaps(&candidate, &existing, None).is_empty());
}

/// Editing a rule never reports a conflict with its own stored version.
#[test]
fn excluded_id_is_skipped() {
    let stored = rule("original", 2, ConditionSet::single(ext("pdf")));
    let stored_id = stored.id();
    let candidate = rule("edited", 1, ConditionSet::single(ext("pdf"))).with_id(stored_id);

    let existing = vec![stored];
    assert!(detect_overlaps(&candidate, &existing, Some(stored_id)).is_empty());
}

/// A structurally identical rule (a re-save under a fresh id) is skipped.
#[test]
fn structurally_identical_rules_are_skipped() {
    let stored = rule("saved", 2, ConditionSet::single(ext("pdf")));
    let candidate = rule("saved", 1, ConditionSet::single(ext("pdf")))
        .with_id(RuleId::new());
    // Same conditions, action, and destination text.

    let existing = vec![stored];
    assert!(detect_overlaps(&candidate, &existing, None).is_empty());
}

/// A rule with no conditions cannot overlap anything.
#[test]
fn empty_candidate_reports_nothing() {
    let candidate = rule("hollow", 1, ConditionSet::empty());
    let existing = vec![rule("pdfs", 2, ConditionSet::single(ext("pdf")))];

    assert!(detect_overlaps(&candidate, &existing, None).is_empty());
}

// =============================================================================
// Descriptions
// =============================================================================

/// Overlap descriptions name the shared dimension for the warning dialog.
#[test]
fn descriptions_mention_the_shared_dimension() {
    let candidate = rule("winner", 1, ConditionSet::single(ext("pdf")));
    let existing = vec![rule("loser", 2, ConditionSet::single(ext("pdf")))];

    let overlaps = detect_overlaps(&candidate, &existing, None);
    assert!(overlaps[0].description().contains("pdf"));

    let by_name = rule(
        "names",
        1,
        ConditionSet::single(Condition::name_contains("inv").unwrap()),
    );
    let other_names = vec![rule(
        "more names",
        2,
        ConditionSet::single(Condition::name_contains("invoice").unwrap()),
    )];
    let overlaps = detect_overlaps(&by_name, &other_names, None);
    assert!(!overlaps[0].description().is_empty());
}
