//! Unit tests for the entry forms

use super::*;
use crate::catalog::GroupedOptions;

fn cardiac_and_ortho() -> GroupedOptions {
    vec![
        ("Cardiac", "Tray A"),
        ("Cardiac", "Tray B"),
        ("Ortho", "Tray C"),
    ]
    .into_iter()
    .collect()
}

fn soft_goods() -> Vec<SoftGoodOption> {
    vec![
        SoftGoodOption::new("Exam Gloves Large", "G-100"),
        SoftGoodOption::new("Lap Sponge", "S-200"),
        SoftGoodOption::new("Surgical Glove 7.5", "G-750"),
    ]
}

// ============================================================================
// Building Tests
// ============================================================================

mod build_tests {
    use super::*;

    #[test]
    fn test_only_selected_services_are_offered() {
        let options = cardiac_and_ortho().containers_for(&["Cardiac".to_string()]);

        let form = ContainerForm::build(options, &[]);

        let labels: Vec<&str> = form.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Cardiac: Tray A", "Cardiac: Tray B"]);
    }

    #[test]
    fn test_rebuild_keeps_entered_state_for_remaining_options() {
        let catalog = cardiac_and_ortho();
        let mut form = ContainerForm::build(catalog.containers_for(&["Cardiac".to_string()]), &[]);
        form.set_quantity(&ContainerOption::new("Cardiac", "Tray B"), "2");
        let saved = vec![PreferenceCardRow::instrument(7, "Ortho", "Tray C", false)];

        let form = form.rebuild(catalog.containers_for(&["Ortho".to_string()]), &saved);

        assert_eq!(form.len(), 1);
        assert_eq!(
            form.to_rows(),
            vec![PreferenceCardRow::instrument(7, "Ortho", "Tray C", false)]
        );

        let form = form.rebuild(
            catalog.containers_for(&["Cardiac".to_string(), "Ortho".to_string()]),
            &saved,
        );
        assert_eq!(form.state(&ContainerOption::new("Cardiac", "Tray B")).unwrap().quantity, "");
        assert_eq!(form.state(&ContainerOption::new("Ortho", "Tray C")).unwrap().quantity, "7");
    }

    #[test]
    fn test_preselection_fills_matching_entry_only() {
        let options = cardiac_and_ortho().containers_for(&["Cardiac".to_string()]);
        let saved = vec![PreferenceCardRow::instrument(3, "Cardiac", "Tray A", true)];

        let form = ContainerForm::build(options, &saved);

        let tray_a = form.state(&ContainerOption::new("Cardiac", "Tray A")).unwrap();
        assert_eq!(tray_a.quantity, "3");
        assert!(tray_a.hold);

        let tray_b = form.state(&ContainerOption::new("Cardiac", "Tray B")).unwrap();
        assert_eq!(tray_b, &EntryState::default());
    }

    #[test]
    fn test_preselection_requires_exact_key() {
        let options = vec![ContainerOption::new("Cardiac", "Tray A")];
        let saved = vec![PreferenceCardRow::instrument(3, "cardiac", "Tray A", true)];

        let form = ContainerForm::build(options, &saved);

        assert_eq!(form.entries()[0].state, EntryState::default());
    }

    #[test]
    fn test_preselection_ignores_other_row_kinds() {
        let saved = vec![PreferenceCardRow::instrument(3, "Cardiac", "Tray A", true)];

        let form = SoftGoodsForm::build(soft_goods(), &saved);

        assert!(form.entries().iter().all(|e| e.state.quantity.is_empty()));
    }

    #[test]
    fn test_soft_good_label_format() {
        let form = SoftGoodsForm::build(vec![SoftGoodOption::new("Lap Sponge", "S-200")], &[]);
        assert_eq!(form.entries()[0].label, "Lap Sponge, Vendor Part #: S-200");
    }
}

// ============================================================================
// Editing Tests
// ============================================================================

mod edit_tests {
    use super::*;

    #[test]
    fn test_quantity_accepts_digits_and_empty() {
        assert!(is_valid_quantity_input(""));
        assert!(is_valid_quantity_input("12"));
        assert!(!is_valid_quantity_input("1a"));
        assert!(!is_valid_quantity_input("-1"));
        assert!(!is_valid_quantity_input(" 1"));
        assert!(!is_valid_quantity_input("1234567890"));
    }

    #[test]
    fn test_rejected_edit_keeps_previous_value() {
        let mut form = SoftGoodsForm::build(soft_goods(), &[]);
        let gloves = SoftGoodOption::new("Lap Sponge", "S-200");

        assert!(form.set_quantity(&gloves, "4"));
        assert!(!form.set_quantity(&gloves, "4x"));

        assert_eq!(form.state(&gloves).unwrap().quantity, "4");
    }

    #[test]
    fn test_set_quantity_unknown_option() {
        let mut form = SoftGoodsForm::build(soft_goods(), &[]);
        assert!(!form.set_quantity(&SoftGoodOption::new("Nope", "0"), "1"));
    }

    #[test]
    fn test_empty_quantity_produces_no_row() {
        let mut form = SoftGoodsForm::build(soft_goods(), &[]);
        form.set_hold(&SoftGoodOption::new("Lap Sponge", "S-200"), true);

        assert!(form.to_rows().is_empty());
    }

    #[test]
    fn test_zero_quantity_is_still_a_row() {
        let mut form = SoftGoodsForm::build(soft_goods(), &[]);
        form.set_quantity(&SoftGoodOption::new("Lap Sponge", "S-200"), "0");

        assert_eq!(
            form.to_rows(),
            vec![PreferenceCardRow::soft_good(0, "Lap Sponge", "S-200", false)]
        );
    }

    #[test]
    fn test_round_trip_through_preselection() {
        let options = cardiac_and_ortho().containers_for(&["Cardiac".to_string(), "Ortho".to_string()]);
        let mut form = ContainerForm::build(options.clone(), &[]);
        for (quantity, option) in ["1", "20", "305"].iter().zip(options.iter()) {
            form.set_quantity(option, quantity);
        }
        form.set_hold(&options[1], true);

        let rows = form.to_rows();
        let reloaded = ContainerForm::build(options.clone(), &rows);

        for option in &options {
            assert_eq!(reloaded.state(option), form.state(option));
        }
    }

    #[test]
    fn test_leading_zeros_normalise_on_reload() {
        let options = vec![ContainerOption::new("Ortho", "Tray C")];
        let mut form = ContainerForm::build(options.clone(), &[]);
        form.set_quantity(&options[0], "007");

        let rows = form.to_rows();
        assert_eq!(rows[0].quantity(), 7);

        let reloaded = ContainerForm::build(options.clone(), &rows);
        assert_eq!(reloaded.state(&options[0]).unwrap().quantity, "7");
    }
}

// ============================================================================
// Search Tests
// ============================================================================

mod search_tests {
    use super::*;

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut form = SoftGoodsForm::build(soft_goods(), &[]);

        form.set_filter("GLOVE");

        let visible: Vec<&str> = form
            .visible_entries()
            .map(|(_, e)| e.option.vendor_part_number.as_str())
            .collect();
        assert_eq!(visible, vec!["G-100", "G-750"]);
    }

    #[test]
    fn test_filter_then_clear_restores_edit_state() {
        let mut form = SoftGoodsForm::build(soft_goods(), &[]);
        let sponge = SoftGoodOption::new("Lap Sponge", "S-200");
        let glove = SoftGoodOption::new("Surgical Glove 7.5", "G-750");
        form.set_quantity(&sponge, "5");
        form.set_hold(&sponge, true);
        form.set_quantity(&glove, "2");
        let before = form.entries().to_vec();

        form.set_filter("glove");
        assert!(!form.entries()[1].is_visible());
        form.set_filter("");

        assert_eq!(form.entries(), before.as_slice());
        assert_eq!(form.visible_entries().count(), 3);
    }

    #[test]
    fn test_hidden_entries_still_export() {
        let mut form = SoftGoodsForm::build(soft_goods(), &[]);
        form.set_quantity(&SoftGoodOption::new("Lap Sponge", "S-200"), "5");

        form.set_filter("glove");

        assert_eq!(form.to_rows().len(), 1);
    }
}
