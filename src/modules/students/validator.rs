//! Field rules for incoming student records and the validator applying them.
//!
//! The rule functions are wired into [`CreateStudentDto`] through
//! `#[validate(custom(...))]`. Each rejection carries the offending value in
//! its `value` param so the resulting [`AppError::Validation`] can report it.

use std::borrow::Cow;
use std::str::FromStr;

use tracing::{instrument, warn};
use validator::{Validate, ValidationError};

use registrar_core::{AppError, AppResult};
use registrar_models::{BloodGroup, Gender, NewStudent, StudentStatus, UnknownVariant};

use super::model::CreateStudentDto;

fn rejected(code: &'static str, value: &str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.add_param(Cow::from("value"), &value);
    err.message = Some(Cow::from(message));
    err
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rejected("required", value, "This field is required".to_string()));
    }
    Ok(())
}

/// The name must already be in canonical capitalization; it is never rewritten.
pub fn validate_first_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rejected("required", value, "First name is required".to_string()));
    }
    if value != capitalize(value) {
        return Err(rejected(
            "capitalized",
            value,
            format!("{} is not in capitalized format", value),
        ));
    }
    Ok(())
}

/// ASCII letters only.
pub fn validate_last_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rejected("required", value, "Last name is required".to_string()));
    }
    if !value.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(rejected("alpha", value, format!("{} is not a valid last name", value)));
    }
    Ok(())
}

pub fn validate_gender(value: &str) -> Result<(), ValidationError> {
    value.parse::<Gender>().map(|_| ()).map_err(|_| {
        rejected(
            "gender",
            value,
            format!(
                "The gender field can only be one of \"male\", \"female\" or \"other\". {} is not supported",
                value
            ),
        )
    })
}

pub fn validate_blood_group(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<BloodGroup>()
        .map(|_| ())
        .map_err(|e| rejected("blood_group", value, e.to_string()))
}

pub fn validate_student_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<StudentStatus>()
        .map(|_| ())
        .map_err(|e| rejected("student_status", value, e.to_string()))
}

/// The domain after `@` must be dotted with an alphabetic top-level label of
/// at least two characters (or an `xn--` IDN label). Values without `@` are
/// left to the `email` rule.
pub fn validate_email_domain(value: &str) -> Result<(), ValidationError> {
    let Some((_, domain)) = value.rsplit_once('@') else {
        return Ok(());
    };

    let labels: Vec<&str> = domain.split('.').collect();
    let tld = labels.last().copied().unwrap_or_default();
    let tld_ok = tld.len() >= 2
        && (tld.chars().all(char::is_alphabetic) || tld.to_ascii_lowercase().starts_with("xn--"));

    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) || !tld_ok {
        return Err(rejected(
            "email_domain",
            value,
            format!("{} does not have a valid domain", value),
        ));
    }
    Ok(())
}

fn parse_field<T>(field: &str, value: &str) -> AppResult<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    value
        .parse::<T>()
        .map_err(|e| AppError::validation(field, value, e.to_string()))
}

/// Checks a candidate student against every field rule and, when it passes,
/// produces the typed record handed to the store.
///
/// All violations are reported together, sorted by field path.
pub struct StudentRecordValidator;

impl StudentRecordValidator {
    #[instrument(skip(candidate), fields(student_id = %candidate.id))]
    pub fn validate(candidate: &CreateStudentDto) -> AppResult<NewStudent> {
        if let Err(errors) = candidate.validate() {
            let err = AppError::from(errors);
            warn!(error = %err, "student record rejected");
            return Err(err);
        }

        let blood_group = candidate
            .blood_group
            .as_deref()
            .map(|group| parse_field::<BloodGroup>("blood_group", group))
            .transpose()?;

        let is_active = candidate
            .is_active
            .as_deref()
            .map(|status| parse_field::<StudentStatus>("is_active", status))
            .transpose()?
            .unwrap_or_default();

        Ok(NewStudent {
            id: candidate.id.clone(),
            name: (&candidate.name).into(),
            gender: parse_field("gender", &candidate.gender)?,
            date_of_birth: candidate.date_of_birth.clone(),
            email: candidate.email.clone(),
            contact_no: candidate.contact_no.clone(),
            emergency_contact_no: candidate.emergency_contact_no.clone(),
            blood_group,
            present_address: candidate.present_address.clone(),
            permanent_address: candidate.permanent_address.clone(),
            guardian: (&candidate.guardian).into(),
            local_guardian: (&candidate.local_guardian).into(),
            profile_img: candidate.profile_img.clone(),
            is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::students::model::{GuardianDto, LocalGuardianDto, UserNameDto};
    use serde_json::json;

    fn candidate() -> CreateStudentDto {
        CreateStudentDto {
            id: "2030010001".to_string(),
            name: UserNameDto {
                first_name: "John".to_string(),
                middle_name: None,
                last_name: "Doe".to_string(),
            },
            gender: "male".to_string(),
            date_of_birth: Some("2004-05-17".to_string()),
            email: "john.doe@example.com".to_string(),
            contact_no: "+8801700000000".to_string(),
            emergency_contact_no: "+8801800000000".to_string(),
            blood_group: Some("O+".to_string()),
            present_address: "12 Lake Road".to_string(),
            permanent_address: "4 Hill Street".to_string(),
            guardian: GuardianDto {
                father_name: "Richard Doe".to_string(),
                father_occupation: "Engineer".to_string(),
                father_contact_no: "+8801900000000".to_string(),
                mother_name: "Jane Doe".to_string(),
                mother_occupation: "Teacher".to_string(),
                mother_contact_no: "+8801600000000".to_string(),
            },
            local_guardian: LocalGuardianDto {
                name: "Sam Roe".to_string(),
                occupation: "Doctor".to_string(),
                contact_no: "+8801500000000".to_string(),
                address: "7 River Lane".to_string(),
            },
            profile_img: None,
            is_active: None,
        }
    }

    fn rejected_fields(result: AppResult<NewStudent>) -> Vec<String> {
        match result {
            Err(AppError::Validation(violations)) => {
                violations.into_iter().map(|v| v.field).collect()
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn capitalize_lowercases_the_tail() {
        assert_eq!(capitalize("jOHN"), "John");
        assert_eq!(capitalize("élodie"), "Élodie");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn first_name_must_already_be_capitalized() {
        assert!(validate_first_name("John").is_ok());
        assert!(validate_first_name("john").is_err());
        assert!(validate_first_name("JOHN").is_err());
        assert!(validate_first_name("McDonald").is_err());
    }

    #[test]
    fn last_name_rejects_digits_and_symbols() {
        assert!(validate_last_name("Doe").is_ok());
        assert!(validate_last_name("Doe2").is_err());
        assert!(validate_last_name("O'Neil").is_err());
        assert!(validate_last_name("Smith-Jones").is_err());
        assert!(validate_last_name("Van Dyk").is_err());
    }

    #[test]
    fn valid_candidate_becomes_typed_record() {
        let student = StudentRecordValidator::validate(&candidate()).unwrap();

        assert_eq!(student.gender, Gender::Male);
        assert_eq!(student.blood_group, Some(BloodGroup::OPositive));
        assert_eq!(student.is_active, StudentStatus::Active);
        assert_eq!(student.date_of_birth.as_deref(), Some("2004-05-17"));
        assert_eq!(student.name.first_name, "John");
    }

    #[test]
    fn lowercase_first_name_is_reported_with_its_value() {
        let mut dto = candidate();
        dto.name.first_name = "john".to_string();

        let err = StudentRecordValidator::validate(&dto).unwrap_err();

        let violation = &err.violations()[0];
        assert_eq!(violation.field, "name.first_name");
        assert_eq!(violation.value, json!("john"));
        assert_eq!(violation.message, "john is not in capitalized format");
    }

    #[test]
    fn first_name_longer_than_twenty_characters_fails() {
        let mut dto = candidate();
        dto.name.first_name = format!("J{}", "o".repeat(20));

        assert_eq!(
            rejected_fields(StudentRecordValidator::validate(&dto)),
            vec!["name.first_name"]
        );
    }

    #[test]
    fn bad_email_fails_and_simple_email_passes() {
        let mut dto = candidate();
        dto.email = "not-an-email".to_string();
        assert_eq!(
            rejected_fields(StudentRecordValidator::validate(&dto)),
            vec!["email"]
        );

        for undotted in ["user@localhost", "a@b", "a@b.", "a@b.c", "a@b.c0m"] {
            dto.email = undotted.to_string();
            let err = StudentRecordValidator::validate(&dto).unwrap_err();
            assert!(err.violations().iter().all(|v| v.field == "email"));
            assert!(err.violations().iter().any(|v| v.value == json!(undotted)));
        }

        dto.email = "a@b.com".to_string();
        assert!(StudentRecordValidator::validate(&dto).is_ok());
    }

    #[test]
    fn email_domain_rule_accepts_dotted_domains() {
        assert!(validate_email_domain("john.doe@mail.example.co.uk").is_ok());
        assert!(validate_email_domain("a@xn--80ak6aa92e.xn--p1ai").is_ok());
        assert!(validate_email_domain("no-at-sign").is_ok());
        assert!(validate_email_domain("user@localhost").is_err());
        assert!(validate_email_domain("user@example..com").is_err());
    }

    #[test]
    fn enumerated_fields_reject_unknown_members() {
        let mut dto = candidate();
        dto.gender = "unknown".to_string();
        dto.blood_group = Some("C+".to_string());
        dto.is_active = Some("bloked".to_string());

        assert_eq!(
            rejected_fields(StudentRecordValidator::validate(&dto)),
            vec!["blood_group", "gender", "is_active"]
        );
    }

    #[test]
    fn blank_required_fields_fail_in_nested_records() {
        let mut dto = candidate();
        dto.guardian.mother_name = "   ".to_string();
        dto.local_guardian.address = String::new();
        dto.contact_no = String::new();

        let err = StudentRecordValidator::validate(&dto).unwrap_err();

        let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["contact_no", "guardian.mother_name", "local_guardian.address"]
        );
        assert_eq!(err.violations()[1].message, "Mother name is required");
    }

    #[test]
    fn date_of_birth_is_kept_as_free_text() {
        let mut dto = candidate();
        dto.date_of_birth = Some("17 May 2004".to_string());

        let student = StudentRecordValidator::validate(&dto).unwrap();

        assert_eq!(student.date_of_birth.as_deref(), Some("17 May 2004"));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let mut dto = candidate();
        dto.blood_group = None;
        dto.date_of_birth = None;
        dto.name.middle_name = Some("  ".to_string());

        let student = StudentRecordValidator::validate(&dto).unwrap();

        assert_eq!(student.blood_group, None);
        assert_eq!(student.date_of_birth, None);
        assert_eq!(student.name.middle_name, None);
    }

    #[test]
    fn explicit_blocked_status_is_kept() {
        let mut dto = candidate();
        dto.is_active = Some("blocked".to_string());

        let student = StudentRecordValidator::validate(&dto).unwrap();

        assert_eq!(student.is_active, StudentStatus::Blocked);
    }
}
