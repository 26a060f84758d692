//! Bulk mentee import from CSV. Parsing is strict about the header,
//! lenient about extra columns; row processing is strictly sequential
//! because each row switches the active session through the identity
//! adapter.

use std::collections::HashMap;

use serde::Deserialize;
use uuid::Uuid;

use crate::config::MIN_PASSWORD_LEN;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::{ServiceError, ServiceResult};
use crate::repositories::ProfileRepository;
use crate::service::{DomainService, NewMentee};

const REQUIRED_COLUMNS: [&str; 6] =
    ["name", "username", "password", "adno", "class", "mentor_username"];

#[derive(Debug, Clone, Deserialize)]
pub struct MenteeCsvRow {
    pub name: String,
    pub username: String,
    pub password: String,
    pub adno: String,
    pub class: String,
    pub mentor_username: String,
}

#[derive(Debug)]
pub struct BulkRowFailure {
    /// 1-based data row number, header excluded.
    pub row: usize,
    pub username: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct BulkImportReport {
    pub successes: usize,
    pub failures: Vec<BulkRowFailure>,
}

/// Parses CSV bytes into rows. Quoted fields and embedded commas are
/// handled by the reader; column order does not matter.
pub fn parse_mentee_csv(bytes: &[u8]) -> ServiceResult<Vec<MenteeCsvRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| ServiceError::validation(format!("Could not read CSV header: {e}")))?
        .clone();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(ServiceError::validation(format!(
            "CSV file is missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize::<MenteeCsvRow>().enumerate() {
        let row =
            record.map_err(|e| ServiceError::validation(format!("CSV row {}: {e}", idx + 1)))?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ServiceError::validation("CSV file contains no data rows."));
    }
    Ok(rows)
}

/// Per-row validation that needs no database access. Mentor resolution
/// happens against the prefetched map; usernames match case-sensitively.
fn validate_row(row: &MenteeCsvRow, mentors: &HashMap<String, Uuid>) -> Result<Uuid, String> {
    for (value, label) in [
        (&row.name, "name"),
        (&row.username, "username"),
        (&row.adno, "adno"),
        (&row.class, "class"),
        (&row.mentor_username, "mentor_username"),
    ] {
        if value.trim().is_empty() {
            return Err(format!("Missing value for '{label}'."));
        }
    }
    if row.password.len() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password is too short (minimum {MIN_PASSWORD_LEN} characters)."
        ));
    }
    mentors
        .get(&row.mentor_username)
        .copied()
        .ok_or_else(|| format!("Mentor with username '{}' not found.", row.mentor_username))
}

/// Whether a row failure poisons the rest of the run. A broken session
/// restore means every later row would execute as the wrong user, so
/// processing stops; any other failure is isolated to its row.
fn failure_is_fatal(error: &ServiceError) -> bool {
    matches!(error, ServiceError::SessionIntegrity)
}

impl DomainService {
    /// Creates one mentee per row via the same path as a single add,
    /// session snapshot and restore included. A failing row is recorded
    /// and the import continues; the caller gets the full tally.
    pub async fn bulk_add_mentees(&self, rows: Vec<MenteeCsvRow>) -> ServiceResult<BulkImportReport> {
        let snapshot = self.identity().current_session().ok_or_else(|| {
            ServiceError::validation(
                "Authentication error: You must be logged in to import mentees.",
            )
        })?;

        let mentors: HashMap<String, Uuid> = ProfileRepository::new()
            .find_all_by_role(RoleEnum::Mentor)
            .await?
            .into_iter()
            .map(|p| (p.username, p.id))
            .collect();

        let mut report = BulkImportReport::default();
        for (idx, row) in rows.into_iter().enumerate() {
            let row_number = idx + 1;
            let mentor_id = match validate_row(&row, &mentors) {
                Ok(id) => id,
                Err(error) => {
                    report.failures.push(BulkRowFailure {
                        row: row_number,
                        username: row.username,
                        error,
                    });
                    continue;
                }
            };

            let username = row.username.clone();
            let outcome = self
                .add_mentee(
                    mentor_id,
                    NewMentee {
                        name: row.name,
                        username: row.username,
                        password: row.password,
                        adno: row.adno,
                        class: row.class,
                        photo: None,
                        photo_file: None,
                        is_coordinator: false,
                        personal_details: None,
                        academic_details: None,
                        mentorship_details: None,
                    },
                )
                .await;

            match outcome {
                Ok(_) => report.successes += 1,
                Err(err) => {
                    let fatal = failure_is_fatal(&err);
                    report.failures.push(BulkRowFailure {
                        row: row_number,
                        username,
                        error: err.to_string(),
                    });
                    if fatal {
                        tracing::error!(
                            row = row_number,
                            "session restore failed, aborting remaining rows"
                        );
                        break;
                    }
                }
            }
        }

        // Every row restores on its own; this is a final safety net for
        // the importer's session, not a correctness requirement.
        if let Err(err) = self.identity().set_session(snapshot) {
            tracing::warn!(error = %err, "final session restore after bulk import failed");
        }

        tracing::info!(
            successes = report.successes,
            failures = report.failures.len(),
            "bulk mentee import finished"
        );
        Ok(report)
    }

    pub async fn import_mentees_from_csv(&self, bytes: &[u8]) -> ServiceResult<BulkImportReport> {
        let rows = parse_mentee_csv(bytes)?;
        self.bulk_add_mentees(rows).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "name,username,password,adno,class,mentor_username\n";

    #[test]
    fn parses_well_formed_rows() {
        let csv = format!("{HEADER}Ravi Kumar,ravi.k,secret1,1042,10B,asha\n");
        let rows = parse_mentee_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ravi Kumar");
        assert_eq!(rows[0].mentor_username, "asha");
    }

    #[test]
    fn handles_quoted_commas() {
        let csv = format!("{HEADER}\"Kumar, Ravi\",ravi.k,secret1,1042,10B,asha\n");
        let rows = parse_mentee_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].name, "Kumar, Ravi");
    }

    #[test]
    fn column_order_is_flexible() {
        let csv = "mentor_username,class,adno,password,username,name\nasha,10B,1042,secret1,ravi.k,Ravi\n";
        let rows = parse_mentee_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].username, "ravi.k");
    }

    #[test]
    fn rejects_missing_columns() {
        let csv = "name,username,password\nRavi,ravi.k,secret1\n";
        let err = parse_mentee_csv(csv.as_bytes()).unwrap_err();
        match err {
            ServiceError::Validation(msg) => {
                assert!(msg.contains("missing required columns"));
                assert!(msg.contains("adno"));
                assert!(msg.contains("mentor_username"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_header_only_file() {
        let err = parse_mentee_csv(HEADER.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(msg) if msg == "CSV file contains no data rows."
        ));
    }

    fn row(mentor: &str, password: &str) -> MenteeCsvRow {
        MenteeCsvRow {
            name: "Ravi".to_string(),
            username: "ravi.k".to_string(),
            password: password.to_string(),
            adno: "1042".to_string(),
            class: "10B".to_string(),
            mentor_username: mentor.to_string(),
        }
    }

    #[test]
    fn resolves_mentor_case_sensitively() {
        let mentor_id = Uuid::new_v4();
        let mentors = HashMap::from([("asha".to_string(), mentor_id)]);
        assert_eq!(validate_row(&row("asha", "secret1"), &mentors), Ok(mentor_id));
        assert!(
            validate_row(&row("Asha", "secret1"), &mentors)
                .unwrap_err()
                .contains("'Asha' not found")
        );
    }

    #[test]
    fn only_session_integrity_aborts_the_run() {
        assert!(failure_is_fatal(&ServiceError::SessionIntegrity));
        assert!(!failure_is_fatal(&ServiceError::validation(
            "Username is required."
        )));
        assert!(!failure_is_fatal(&ServiceError::conflict(
            "This username is already taken. Please choose another one."
        )));
    }

    #[test]
    fn rejects_short_password_per_row() {
        let mentors = HashMap::from([("asha".to_string(), Uuid::new_v4())]);
        assert!(
            validate_row(&row("asha", "abc"), &mentors)
                .unwrap_err()
                .contains("too short")
        );
    }
}
