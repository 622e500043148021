use std::path::Path;

use tracing::debug;

use crate::errors::AppError;
use crate::roster::{CellValue, Roster, PROFILE_COLUMN};

/// Writes every generated profile into the `profile` column of the workbook at
/// `path` and saves it in place. Returns the number of cells written.
///
/// Only text profiles are written; other cells are never touched, so everything
/// outside the profile column survives a round trip unchanged.
pub fn write_profiles(path: &Path, roster: &Roster) -> Result<usize, AppError> {
    let write_err = |message: String| AppError::SpreadsheetWrite {
        path: path.to_path_buf(),
        message,
    };

    let no_sheet = || AppError::NoWorksheet {
        path: path.to_path_buf(),
    };

    let read = umya_spreadsheet::reader::xlsx::read(path);
    let mut book = read.map_err(|e| write_err(e.to_string()))?;
    let sheet = book.get_sheet_mut(&0).ok_or_else(no_sheet)?;

    let profile_col = (1..=sheet.get_highest_column())
        .find(|&col| {
            sheet
                .get_cell((col, 1))
                .is_some_and(|cell| cell.get_value() == PROFILE_COLUMN)
        })
        .ok_or_else(|| AppError::MissingColumn {
            path: path.to_path_buf(),
            column: PROFILE_COLUMN.to_string(),
        })?;

    let mut written = 0;
    for (row, record) in (2u32..).zip(&roster.records) {
        if let Some(CellValue::Text(profile)) = record.get(PROFILE_COLUMN) {
            if profile.is_empty() {
                continue;
            }
            let cell = sheet.get_cell_mut((profile_col, row));
            cell.set_value_string(profile.clone());
            written += 1;
        }
    }

    let saved = umya_spreadsheet::writer::xlsx::write(&book, path);
    saved.map_err(|e| write_err(e.to_string()))?;
    debug!("Wrote {written} profiles to {}", path.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::load_roster;
    use crate::roster::testing::write_fixture;

    #[test]
    fn test_round_trip_changes_only_profile_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            &["first_name", "last_name", "city", "profile", "email"],
            &[
                &["John", "Smith", "Austin", "", "john@example.com"],
                &["Jane", "Doe", "Denver", "Existing profile", "jane@example.com"],
                &["Ana", "Lima", "Miami", "", "ana@example.com"],
            ],
        );

        let original = load_roster(&path).unwrap();
        let mut updated = original.clone();
        let generated = "Line one.\n\nLine two with ünïcödé.\nCredit Score: 742";
        updated.records[0].set_profile(generated.to_string());
        updated.records[2].set_profile("Error generating profile: boom".to_string());

        let written = write_profiles(&path, &updated).unwrap();
        assert_eq!(written, 3);

        let reloaded = load_roster(&path).unwrap();
        assert_eq!(reloaded.headers, original.headers);
        assert_eq!(reloaded.records.len(), original.records.len());

        for (before, after) in original.records.iter().zip(&reloaded.records) {
            for column in ["first_name", "last_name", "city", "email"] {
                assert_eq!(before.get(column), after.get(column), "column {column}");
            }
        }
        assert_eq!(reloaded.records[0].text("profile"), generated);
        assert_eq!(reloaded.records[1].text("profile"), "Existing profile");
        assert_eq!(
            reloaded.records[2].text("profile"),
            "Error generating profile: boom"
        );
    }

    #[test]
    fn test_blank_profiles_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            &["first_name", "profile"],
            &[&["John", ""], &["Jane", ""]],
        );

        let mut roster = load_roster(&path).unwrap();
        roster.records[1].set_profile("Generated".to_string());

        assert_eq!(write_profiles(&path, &roster).unwrap(), 1);
        let reloaded = load_roster(&path).unwrap();
        assert!(!reloaded.records[0].has_profile());
        assert_eq!(reloaded.records[1].text("profile"), "Generated");
    }

    #[test]
    fn test_missing_profile_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            &["first_name", "last_name"],
            &[&["John", "Smith"]],
        );

        let roster = load_roster(&path).unwrap();
        let err = write_profiles(&path, &roster).unwrap_err();
        assert!(
            matches!(err, AppError::MissingColumn { ref column, .. } if column == "profile"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_unreadable_target_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.xlsx");
        let err = write_profiles(&missing, &Roster::default()).unwrap_err();
        assert!(
            matches!(err, AppError::SpreadsheetWrite { .. }),
            "got {err:?}"
        );
    }
}
