//! Tests for cross-field checks and whole-object checks.

use fieldwise::{
    rules, CrossFieldCheck, ErrorCode, FieldIdentity, ValidationErrorDetail, Validator,
};

struct Registration {
    username: String,
    password: String,
    confirm_password: String,
}

fn registration(password: &str, confirm: &str) -> Registration {
    Registration {
        username: "ferris".into(),
        password: password.into(),
        confirm_password: confirm.into(),
    }
}

fn password() -> FieldIdentity<Registration, String> {
    FieldIdentity::new("password", |r: &Registration| &r.password)
}

fn confirm_password() -> FieldIdentity<Registration, String> {
    FieldIdentity::new("confirm_password", |r: &Registration| &r.confirm_password)
}

fn registration_validator() -> Validator<Registration> {
    Validator::builder("Registration")
        .field(password(), |f| {
            f.rule(rules::min_len(3));
        })
        .field(confirm_password(), |f| {
            f.cross_field(rules::equals_field(
                |r: &Registration| &r.password,
                "passwords do not match",
            ));
        })
        .build()
}

#[test]
fn test_matching_passwords_pass() {
    let result = registration_validator().validate(&registration("abc", "abc"));
    assert!(result.is_success());
}

#[test]
fn test_mismatched_passwords_fail_on_confirmation() {
    let result = registration_validator().validate(&registration("abc", "xyz"));

    assert_eq!(result.error_count(), 1);
    let error = result.first_error_for("confirm_password").unwrap();
    assert_eq!(error.code, ErrorCode::CrossFieldError);
    assert_eq!(error.message, "passwords do not match");
    assert_eq!(error.actual_value, "xyz");
    assert!(result.errors_for("password").is_empty());
}

#[test]
fn test_cross_field_errors_follow_field_errors() {
    let result = registration_validator().validate(&registration("ab", "xyz"));

    let fields: Vec<_> = result
        .errors()
        .unwrap()
        .iter()
        .map(|e| e.field_name.as_str())
        .collect();
    assert_eq!(fields, vec!["password", "confirm_password"]);
}

#[test]
fn test_fail_fast_skips_cross_field_checks_after_field_failure() {
    let result = registration_validator().validate_first(&registration("ab", "xyz"));

    assert_eq!(result.error_count(), 1);
    assert_eq!(result.first_error().unwrap().field_name, "password");
}

#[test]
fn test_fail_fast_reaches_cross_field_checks_when_fields_pass() {
    let result = registration_validator().validate_first(&registration("abc", "xyz"));

    assert_eq!(result.error_count(), 1);
    assert_eq!(
        result.first_error().unwrap().code,
        ErrorCode::CrossFieldError
    );
}

#[test]
fn test_cross_field_checks_run_in_registration_order() {
    let validator = Validator::builder("Registration")
        .cross_field(
            &password(),
            rules::differs_from(|r: &Registration| &r.username, "must not equal the username"),
        )
        .cross_field(
            &confirm_password(),
            rules::equals_field(|r: &Registration| &r.password, "passwords do not match"),
        )
        .build();

    let input = registration("ferris", "other");
    let result = validator.validate(&input);

    let fields: Vec<_> = result
        .errors()
        .unwrap()
        .iter()
        .map(|e| e.field_name.as_str())
        .collect();
    assert_eq!(fields, vec!["password", "confirm_password"]);
    assert_eq!(validator.cross_field_count(), 2);
    assert_eq!(validator.constraint_count(), 0);

    let first = validator.validate_first(&input);
    assert_eq!(first.first_error(), result.first_error());
}

#[test]
fn test_cross_field_check_can_report_another_field() {
    let validator = Validator::builder("Registration")
        .cross_field(
            &confirm_password(),
            CrossFieldCheck::new(
                ErrorCode::CrossFieldError,
                "password confirmation failed",
                |r: &Registration| &r.password,
                |confirm: &String, password: &String| confirm == password,
            )
            .report_as("password"),
        )
        .build();

    let result = validator.validate(&registration("abc", "xyz"));
    assert!(result.first_error_for("password").is_some());
    assert!(result.first_error_for("confirm_password").is_none());
}

#[test]
fn test_duplicate_cross_field_failures_collapse() {
    let check = || rules::equals_field(|r: &Registration| &r.password, "passwords do not match");
    let validator = Validator::builder("Registration")
        .cross_field(&confirm_password(), check())
        .cross_field(&confirm_password(), check())
        .build();

    let result = validator.validate(&registration("abc", "xyz"));
    assert_eq!(result.error_count(), 1);
    assert_eq!(validator.cross_field_count(), 2);
}

#[test]
fn test_object_check_without_field_is_attributed() {
    let validator = Validator::builder("Registration")
        .object_check("username", |r: &Registration| {
            r.password
                .contains(r.username.as_str())
                .then(|| ValidationErrorDetail::new(ErrorCode::WeakPassword, "password contains the username"))
        })
        .build();

    let result = validator.validate(&registration("ferris123", "ferris123"));
    let error = result.first_error().unwrap();
    assert_eq!(error.field_name, "username");
    assert_eq!(error.code, ErrorCode::WeakPassword);
    assert_eq!(error.actual_value, "null");

    assert!(validator
        .validate(&registration("hunter22", "hunter22"))
        .is_success());
}

#[test]
#[should_panic(expected = "registered with value type")]
fn test_builder_cross_field_with_clashing_type_panics() {
    struct Counter {
        label: String,
        count: u32,
    }

    Validator::builder("Counter")
        .rule(
            &FieldIdentity::new("label", |c: &Counter| &c.label),
            rules::not_blank(),
        )
        .cross_field(
            &FieldIdentity::new("label", |c: &Counter| &c.count),
            rules::differs_from(|c: &Counter| &c.count, "must differ"),
        );
}

#[test]
fn test_builder_cross_field_registers_the_field() {
    let validator = Validator::builder("Registration")
        .cross_field(
            &confirm_password(),
            rules::equals_field(|r: &Registration| &r.password, "passwords do not match"),
        )
        .build();

    assert_eq!(
        validator.field_names().collect::<Vec<_>>(),
        vec!["confirm_password"]
    );
    assert_eq!(validator.constraint_count(), 0);
}
