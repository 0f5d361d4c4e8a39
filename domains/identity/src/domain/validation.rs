//! Field validation and the password policy
//!
//! Every validator records all failures into a `FieldErrors` collection
//! instead of stopping at the first one.

use orgauth_common::FieldErrors;
use regex::Regex;
use validator::ValidateEmail;

use crate::domain::entities::{NewOrganisation, RegistrationRequest, DEFAULT_ORGANISATION_SUFFIX};

/// Maximum length of names and emails
pub const MAX_TEXT_LENGTH: usize = 250;

/// Longest first name whose default organisation name still fits `MAX_TEXT_LENGTH`
pub const MAX_FIRST_NAME_LENGTH: usize = MAX_TEXT_LENGTH - DEFAULT_ORGANISATION_SUFFIX.len();

/// Maximum length of a phone number
pub const MAX_PHONE_LENGTH: usize = 20;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Attributes shorter than this are ignored by the similarity rule
const MIN_SIMILARITY_ATTRIBUTE_LENGTH: usize = 3;

lazy_static::lazy_static! {
    /// Digits, spaces and the usual separators
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[0-9+\-() ]+$").unwrap();
}

/// Lower-cased, whitespace-free passwords rejected outright
const COMMON_PASSWORDS: &[&str] = &[
    "password", "password1", "password12", "password123", "password!", "passw0rd",
    "12345678", "123456789", "1234567890", "123123123", "987654321", "11111111",
    "00000000", "qwerty123", "qwerty12", "qwertyuiop", "1q2w3e4r", "1qaz2wsx",
    "zaq12wsx", "qazwsxedc", "asdfghjk", "iloveyou", "sunshine", "princess",
    "football", "baseball", "welcome", "welcome1", "abc12345", "letmein1",
    "trustno1", "superman", "starwars", "dragon12", "monkey12", "master12",
    "whatever", "shadow12", "michael1", "jennifer", "computer", "mercedes",
    "liverpool", "chelsea1", "charlie1", "hello123", "freedom1", "admin123",
    "changeme", "secret12", "letmein123", "iloveyou1",
];

fn length_message(max: usize) -> String {
    format!("Ensure this field has no more than {} characters.", max)
}

fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

/// Trim and lower-case an email so it can be used as the login identifier
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim an optional text field, folding blank values into `None`
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn check_required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    max: usize,
    required_message: &str,
) {
    if value.trim().is_empty() {
        errors.add(field, required_message);
    } else if too_long(value.trim(), max) {
        errors.add(field, length_message(max));
    }
}

/// Check every registration field and return all failures.
///
/// Email uniqueness needs the store and is checked by the caller.
pub fn validate_registration(request: &RegistrationRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();

    check_required_text(
        &mut errors,
        "firstName",
        &request.first_name,
        MAX_FIRST_NAME_LENGTH,
        "First name is required",
    );
    check_required_text(
        &mut errors,
        "lastName",
        &request.last_name,
        MAX_TEXT_LENGTH,
        "Last name is required",
    );

    let email = normalize_email(&request.email);
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if too_long(&email, MAX_TEXT_LENGTH) {
        errors.add("email", length_message(MAX_TEXT_LENGTH));
    } else if !email.validate_email() {
        errors.add("email", "Enter a valid email address");
    }

    if request.password.is_empty() {
        errors.add("password", "Password is required");
    } else {
        let local_part = email.split('@').next().unwrap_or_default();
        let attributes = [
            ("first name", request.first_name.trim()),
            ("last name", request.last_name.trim()),
            ("email address", local_part),
        ];
        for message in password_policy_violations(&request.password, &attributes) {
            errors.add("password", message);
        }
    }

    if let Some(phone) = normalize_optional(request.phone.as_deref()) {
        if too_long(&phone, MAX_PHONE_LENGTH) {
            errors.add("phone", length_message(MAX_PHONE_LENGTH));
        } else if !PHONE_REGEX.is_match(&phone) {
            errors.add("phone", "Enter a valid phone number");
        }
    }

    errors
}

/// Check an organisation creation request
pub fn validate_organisation(request: &NewOrganisation) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required_text(
        &mut errors,
        "name",
        &request.name,
        MAX_TEXT_LENGTH,
        "Organisation name is required",
    );
    errors
}

/// Every password rule `password` breaks, as caller-facing messages.
///
/// `attributes` are `(label, value)` pairs the password must not resemble.
pub fn password_policy_violations(password: &str, attributes: &[(&str, &str)]) -> Vec<String> {
    let mut violations = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push(format!(
            "This password is too short. It must contain at least {} characters.",
            MIN_PASSWORD_LENGTH
        ));
    }

    if password.chars().all(|c| c.is_ascii_digit()) {
        violations.push("This password is entirely numeric.".to_string());
    }

    let lowered = password.trim().to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        violations.push("This password is too common.".to_string());
    }

    for (label, value) in attributes {
        if is_too_similar(&lowered, value) {
            violations.push(format!("The password is too similar to the {}.", label));
        }
    }

    violations
}

fn is_too_similar(lowered_password: &str, attribute: &str) -> bool {
    let attribute = attribute.trim().to_lowercase();
    if attribute.chars().count() < MIN_SIMILARITY_ATTRIBUTE_LENGTH
        || lowered_password.chars().count() < MIN_SIMILARITY_ATTRIBUTE_LENGTH
    {
        return false;
    }
    lowered_password.contains(&attribute) || attribute.contains(lowered_password)
}
