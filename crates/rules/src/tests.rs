use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::{
    BookmarkHandle, CombineOp, Condition, ConditionError, ConditionField, ConditionSet,
    Destination, ExclusionSet, FileKind, FileRecord, KnownFolders, Rule, RuleAction,
    RuleValidationError, SourceLocation, normalize_priorities, order_rules,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

fn record(path: &str, size_bytes: u64, age_days: i64) -> FileRecord {
    let timestamp = now() - Duration::days(age_days);
    FileRecord::new(
        path,
        size_bytes,
        timestamp,
        timestamp,
        timestamp,
        &KnownFolders::default(),
    )
}

// ============================================================================
// Condition construction
// ============================================================================

#[test]
fn extension_condition_rejects_leading_dot() {
    assert!(Condition::file_extension("pdf").is_ok());
    assert_eq!(
        Condition::file_extension(".pdf"),
        Err(ConditionError::LeadingDot {
            value: ".pdf".to_string()
        })
    );
}

#[test]
fn extension_condition_trims_and_lowercases() {
    let condition = Condition::file_extension("  PDF  ").unwrap();
    assert_eq!(condition, Condition::FileExtension("pdf".to_string()));
}

#[test]
fn empty_values_are_rejected_per_field() {
    for field in [
        ConditionField::FileExtension,
        ConditionField::NameContains,
        ConditionField::NameStartsWith,
        ConditionField::NameEndsWith,
        ConditionField::DateOlderThan,
        ConditionField::SizeLargerThan,
    ] {
        assert_eq!(
            Condition::parse(field, "   "),
            Err(ConditionError::EmptyValue { field }),
            "field {field} must reject blank input"
        );
    }
}

#[test]
fn day_counts_must_be_non_negative_integers() {
    assert_eq!(
        Condition::parse(ConditionField::DateOlderThan, "30"),
        Ok(Condition::date_older_than(30))
    );
    assert!(matches!(
        Condition::parse(ConditionField::DateOlderThan, "-3"),
        Err(ConditionError::InvalidDays { .. })
    ));
    assert!(matches!(
        Condition::parse(ConditionField::DateModifiedOlderThan, "soon"),
        Err(ConditionError::InvalidDays { .. })
    ));
}

#[test]
fn legacy_extension_days_form_parses_explicitly() {
    assert_eq!(
        Condition::parse(ConditionField::DateOlderThan, "pdf:30"),
        Ok(Condition::ExtensionOlderThan {
            extension: "pdf".to_string(),
            days: 30,
        })
    );
    assert_eq!(
        Condition::parse(ConditionField::DateOlderThan, " PDF : 7 "),
        Ok(Condition::ExtensionOlderThan {
            extension: "pdf".to_string(),
            days: 7,
        })
    );
    assert!(matches!(
        Condition::parse(ConditionField::DateOlderThan, "pdf:"),
        Err(ConditionError::InvalidExtensionDays { .. })
    ));
    assert!(matches!(
        Condition::parse(ConditionField::DateOlderThan, ":30"),
        Err(ConditionError::InvalidExtensionDays { .. })
    ));
    assert!(matches!(
        Condition::parse(ConditionField::DateOlderThan, ".pdf:30"),
        Err(ConditionError::LeadingDot { .. })
    ));
}

#[test]
fn size_parse_errors_map_onto_condition_errors() {
    assert_eq!(
        Condition::parse(ConditionField::SizeLargerThan, "1.5GB"),
        Ok(Condition::size_larger_than(1_610_612_736))
    );
    assert!(matches!(
        Condition::parse(ConditionField::SizeLargerThan, "-1MB"),
        Err(ConditionError::NegativeSize { .. })
    ));
    assert!(matches!(
        Condition::parse(ConditionField::SizeLargerThan, "lots"),
        Err(ConditionError::InvalidSize { .. })
    ));
    assert!(matches!(
        Condition::parse(ConditionField::SizeLargerThan, "99999999999999999999E"),
        Err(ConditionError::SizeTooLarge { .. })
    ));
}

#[test]
fn vocabulary_fields_reject_unknown_words() {
    assert_eq!(
        Condition::parse(ConditionField::FileKind, "image"),
        Ok(Condition::file_kind(FileKind::Image))
    );
    assert!(matches!(
        Condition::parse(ConditionField::FileKind, "photo"),
        Err(ConditionError::UnknownKind { .. })
    ));
    assert_eq!(
        Condition::parse(ConditionField::SourceLocation, "downloads"),
        Ok(Condition::source_location(SourceLocation::Downloads))
    );
    assert!(matches!(
        Condition::parse(ConditionField::SourceLocation, "attic"),
        Err(ConditionError::UnknownLocation { .. })
    ));
}

// ============================================================================
// Condition matching
// ============================================================================

#[test]
fn name_matching_is_case_insensitive() {
    let file = record("/tmp/Invoice_March.PDF", 1, 0);

    assert!(
        Condition::name_contains("INVOICE")
            .unwrap()
            .matches(&file, now())
    );
    assert!(
        Condition::name_starts_with("inv")
            .unwrap()
            .matches(&file, now())
    );
    assert!(
        Condition::name_ends_with(".pdf")
            .unwrap()
            .matches(&file, now())
    );
    assert!(
        Condition::file_extension("PDF")
            .unwrap()
            .matches(&file, now())
    );
}

#[test]
fn age_conditions_compare_against_explicit_now() {
    let file = record("/tmp/old.log", 1, 40);

    assert!(Condition::date_older_than(30).matches(&file, now()));
    assert!(!Condition::date_older_than(60).matches(&file, now()));
    assert!(Condition::date_modified_older_than(40).matches(&file, now()));
    assert!(Condition::date_accessed_older_than(0).matches(&file, now()));
}

#[test]
fn extension_scoped_age_requires_both_parts() {
    let old_pdf = record("/tmp/old.pdf", 1, 40);
    let new_pdf = record("/tmp/new.pdf", 1, 2);
    let old_txt = record("/tmp/old.txt", 1, 40);
    let condition = Condition::extension_older_than("pdf", 30).unwrap();

    assert!(condition.matches(&old_pdf, now()));
    assert!(!condition.matches(&new_pdf, now()));
    assert!(!condition.matches(&old_txt, now()));
}

#[test]
fn size_threshold_is_strict() {
    let condition = Condition::size_larger_than(1000);
    assert!(!condition.matches(&record("/tmp/a", 1000, 0), now()));
    assert!(condition.matches(&record("/tmp/a", 1001, 0), now()));
}

#[test]
fn kind_and_location_match_derived_fields() {
    let folders = KnownFolders::default().with_downloads("/home/casey/Downloads");
    let timestamp = now();
    let file = FileRecord::new(
        "/home/casey/Downloads/photo.jpg",
        1,
        timestamp,
        timestamp,
        timestamp,
        &folders,
    );

    assert_eq!(file.kind(), Some(FileKind::Image));
    assert_eq!(file.source_location(), Some(SourceLocation::Downloads));
    assert!(Condition::file_kind(FileKind::Image).matches(&file, now()));
    assert!(!Condition::file_kind(FileKind::Audio).matches(&file, now()));
    assert!(Condition::source_location(SourceLocation::Downloads).matches(&file, now()));
    assert!(!Condition::source_location(SourceLocation::Desktop).matches(&file, now()));
}

#[test]
fn files_without_extension_have_no_kind() {
    let file = record("/tmp/README", 1, 0);
    assert_eq!(file.extension(), "");
    assert_eq!(file.kind(), None);
    assert!(!Condition::file_kind(FileKind::Document).matches(&file, now()));
}

// ============================================================================
// Condition sets
// ============================================================================

#[test]
fn empty_sets_never_match() {
    let file = record("/tmp/a.pdf", 1, 0);

    assert!(!ConditionSet::empty().matches(&file, now()));
    assert!(!ConditionSet::all(vec![]).matches(&file, now()));
    assert!(!ConditionSet::any(vec![]).matches(&file, now()));
}

#[test]
fn and_set_requires_every_condition() {
    let file = record("/tmp/invoice.pdf", 1, 0);
    let both = ConditionSet::all(vec![
        Condition::file_extension("pdf").unwrap(),
        Condition::name_contains("invoice").unwrap(),
    ]);
    let one_fails = ConditionSet::all(vec![
        Condition::file_extension("pdf").unwrap(),
        Condition::name_contains("receipt").unwrap(),
    ]);

    assert!(both.matches(&file, now()));
    assert!(!one_fails.matches(&file, now()));
}

#[test]
fn or_set_requires_any_condition() {
    let file = record("/tmp/invoice.pdf", 1, 0);
    let set = ConditionSet::any(vec![
        Condition::file_extension("txt").unwrap(),
        Condition::name_contains("invoice").unwrap(),
    ]);

    assert!(set.matches(&file, now()));
}

#[test]
fn push_promotes_single_to_and() {
    let mut set = ConditionSet::single(Condition::file_extension("pdf").unwrap());
    assert_eq!(set.combine(), CombineOp::Single);

    set.push(Condition::name_contains("invoice").unwrap());
    assert_eq!(set.combine(), CombineOp::And);
    assert_eq!(set.len(), 2);
}

#[test]
fn small_sets_normalize_to_single() {
    let one = ConditionSet::all(vec![Condition::file_extension("pdf").unwrap()]);
    assert_eq!(one.combine(), CombineOp::Single);

    let demoted = ConditionSet::any(vec![
        Condition::file_extension("pdf").unwrap(),
        Condition::file_extension("txt").unwrap(),
    ])
    .with_combine(CombineOp::Single);
    assert_eq!(demoted.combine(), CombineOp::And);
}

#[test]
fn remove_demotes_to_single() {
    let mut set = ConditionSet::all(vec![
        Condition::file_extension("pdf").unwrap(),
        Condition::name_contains("invoice").unwrap(),
    ]);
    assert_eq!(set.combine(), CombineOp::And);

    let removed = set.remove(1);
    assert!(removed.is_some());
    assert_eq!(set.combine(), CombineOp::Single);
    assert!(set.remove(5).is_none());
}

#[test]
fn replace_swaps_a_slot_without_touching_others() {
    let mut set = ConditionSet::all(vec![
        Condition::file_extension("pdf").unwrap(),
        Condition::name_contains("invoice").unwrap(),
    ]);

    assert!(set.replace(0, Condition::file_extension("txt").unwrap()));
    assert_eq!(
        set.conditions()[0],
        Condition::FileExtension("txt".to_string())
    );
    assert!(!set.replace(9, Condition::file_extension("md").unwrap()));
}

#[test]
fn exclusions_are_or_combined() {
    let file = record("/tmp/draft_invoice.pdf", 1, 0);
    let exclusions = ExclusionSet::new(vec![
        Condition::name_contains("draft").unwrap(),
        Condition::name_contains("temp").unwrap(),
    ]);

    assert!(exclusions.excludes(&file, now()));
    assert!(!ExclusionSet::empty().excludes(&file, now()));
}

// ============================================================================
// Rules
// ============================================================================

fn folder_destination() -> Destination {
    Destination::folder(BookmarkHandle::new(*b"grant-token"), "Documents/Finance")
}

#[test]
fn rule_match_requires_conditions_and_no_exclusion() {
    let file = record("/tmp/draft_invoice.pdf", 1, 0);
    let rule = Rule::new(
        "Finance",
        ConditionSet::single(Condition::file_extension("pdf").unwrap()),
        RuleAction::Move,
        folder_destination(),
    );

    assert!(rule.matches(&file, now()));

    let vetoed = rule
        .clone()
        .with_exclusions(ExclusionSet::new(vec![
            Condition::name_contains("draft").unwrap(),
        ]));
    assert!(!vetoed.matches(&file, now()));
}

#[test]
fn validation_rejects_empty_names_and_empty_rules() {
    let no_name = Rule::new(
        "   ",
        ConditionSet::single(Condition::file_extension("pdf").unwrap()),
        RuleAction::Move,
        folder_destination(),
    );
    assert_eq!(no_name.validate(), Err(RuleValidationError::EmptyName));

    let no_conditions = Rule::new(
        "Finance",
        ConditionSet::empty(),
        RuleAction::Move,
        folder_destination(),
    );
    assert!(matches!(
        no_conditions.validate(),
        Err(RuleValidationError::NoConditions { .. })
    ));
}

#[test]
fn move_and_copy_require_a_folder_destination() {
    let to_trash = Rule::new(
        "Oops",
        ConditionSet::single(Condition::file_extension("pdf").unwrap()),
        RuleAction::Move,
        Destination::Trash,
    );
    assert!(matches!(
        to_trash.validate(),
        Err(RuleValidationError::MissingDestination { .. })
    ));

    let delete = Rule::new(
        "Cleanup",
        ConditionSet::single(Condition::date_older_than(30)),
        RuleAction::Delete,
        Destination::Trash,
    );
    assert!(delete.validate().is_ok());
}

#[test]
fn placeholder_destinations_are_drafts_not_runnable() {
    let draft = Rule::new(
        "Finance",
        ConditionSet::single(Condition::file_extension("pdf").unwrap()),
        RuleAction::Move,
        Destination::placeholder("Documents/Finance"),
    );

    assert!(draft.validate().is_ok());
    assert!(matches!(
        draft.validate_runnable(),
        Err(RuleValidationError::MissingBookmark { .. })
    ));

    let granted = Rule::new(
        "Finance",
        ConditionSet::single(Condition::file_extension("pdf").unwrap()),
        RuleAction::Move,
        folder_destination(),
    );
    assert!(granted.validate_runnable().is_ok());
}

#[test]
fn empty_bookmark_handles_count_as_missing() {
    let destination = Destination::folder(BookmarkHandle::new(Vec::new()), "Documents");
    assert!(destination.is_placeholder());
    assert!(destination.bookmark().is_none());
}

#[test]
fn order_rules_sorts_by_priority_then_creation() {
    let base = now();
    let make = |name: &str, priority: i32, created_offset: i64| {
        Rule::new(
            name,
            ConditionSet::single(Condition::file_extension("pdf").unwrap()),
            RuleAction::Move,
            folder_destination(),
        )
        .with_priority(priority)
        .with_created_at(base + Duration::seconds(created_offset))
    };

    let mut rules = vec![make("c", 2, 0), make("a", 1, 5), make("b", 1, 1)];
    order_rules(&mut rules);

    let names: Vec<&str> = rules.iter().map(Rule::name).collect();
    assert_eq!(names, ["b", "a", "c"]);
}

#[test]
fn normalize_priorities_rewrites_from_array_order() {
    let mut rules = vec![
        Rule::new(
            "first",
            ConditionSet::single(Condition::file_extension("pdf").unwrap()),
            RuleAction::Move,
            folder_destination(),
        )
        .with_priority(40),
        Rule::new(
            "second",
            ConditionSet::single(Condition::file_extension("txt").unwrap()),
            RuleAction::Move,
            folder_destination(),
        )
        .with_priority(7),
    ];

    normalize_priorities(&mut rules);
    assert_eq!(rules[0].priority(), 0);
    assert_eq!(rules[1].priority(), 1);
}

// ============================================================================
// Display
// ============================================================================

#[test]
fn condition_display_reads_naturally() {
    assert_eq!(
        Condition::file_extension("pdf").unwrap().to_string(),
        "extension is \"pdf\""
    );
    assert_eq!(
        Condition::date_older_than(30).to_string(),
        "created more than 30 days ago"
    );
    assert_eq!(
        Condition::size_larger_than(1_610_612_736).to_string(),
        "larger than 1.5 GB"
    );
    assert_eq!(
        Condition::file_kind(FileKind::Image).to_string(),
        "kind is image"
    );
    assert_eq!(
        Condition::source_location(SourceLocation::Downloads).to_string(),
        "located in downloads"
    );
}
