use chrono::NaiveDate;
use preference_cards::utils::{
    compose_sheet_name, ensure_dir, path_exists, sanitize_sheet_name, sheet_timestamp,
    unique_sheet_name, MAX_SHEET_NAME_LEN,
};
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

fn fixed_time() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(14, 5, 9)
        .unwrap()
}

#[test]
fn test_path_exists_with_existing_file() {
    let temp_file = NamedTempFile::new().unwrap();
    let temp_path = temp_file.path();

    assert!(path_exists(temp_path));
    assert!(path_exists(temp_path.to_str().unwrap()));
}

#[test]
fn test_path_exists_with_nonexistent_path() {
    let nonexistent_path = "/this/path/definitely/does/not/exist/hopefully/12345";

    assert!(!path_exists(nonexistent_path));
    assert!(!path_exists(Path::new(nonexistent_path)));
}

#[test]
fn test_ensure_dir_creates_nested_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("cards").join("out");

    let created = ensure_dir(&nested).unwrap();

    assert!(created.is_dir());
    assert!(created.is_absolute());
}

#[test]
fn test_ensure_dir_existing_directory_is_fine() {
    let temp_dir = TempDir::new().unwrap();
    assert!(ensure_dir(temp_dir.path()).is_ok());
}

#[test]
fn test_sheet_timestamp_format() {
    let stamp = sheet_timestamp(fixed_time());

    assert_eq!(stamp, "2024-03-01_14-05-09");
    assert_eq!(stamp.len(), 19);
}

#[test]
fn test_sheet_name_basic() {
    assert_eq!(
        compose_sheet_name("CABG", "2024-03-01_14-05-09", 1),
        "CABG_2024-03-01_14-05-09"
    );
}

#[test]
fn test_sheet_name_replaces_forbidden_characters() {
    assert_eq!(sanitize_sheet_name("Knee [L/R]: v2?"), "Knee -L-R-- v2-");
}

#[test]
fn test_sheet_name_truncates_surgery_not_timestamp() {
    let name = compose_sheet_name(
        "Total Knee Arthroplasty Revision",
        "2024-03-01_14-05-09",
        1,
    );

    assert_eq!(name.chars().count(), MAX_SHEET_NAME_LEN);
    assert!(name.ends_with("_2024-03-01_14-05-09"));
    assert!(name.starts_with("Total Knee "));
}

#[cfg(test)]
mod collision_cases {
    use super::*;

    #[test]
    fn test_unique_name_without_collision() {
        let name = unique_sheet_name("CABG", "2024-03-01_14-05-09", &["Other".to_string()]);
        assert_eq!(name, "CABG_2024-03-01_14-05-09");
    }

    #[test]
    fn test_unique_name_adds_suffix_on_collision() {
        let existing = vec![
            "CABG_2024-03-01_14-05-09".to_string(),
            "cabg_2024-03-01_14-05-09_2".to_string(),
        ];

        let name = unique_sheet_name("CABG", "2024-03-01_14-05-09", &existing);

        assert_eq!(name, "CABG_2024-03-01_14-05-09_3");
    }

    #[test]
    fn test_suffix_still_fits_length_limit() {
        let stamp = "2024-03-01_14-05-09";
        let first = compose_sheet_name("Total Knee Arthroplasty", stamp, 1);

        let name = unique_sheet_name("Total Knee Arthroplasty", stamp, &[first]);

        assert!(name.chars().count() <= MAX_SHEET_NAME_LEN);
        assert!(name.ends_with("_2"));
    }
}
