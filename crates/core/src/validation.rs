//! Field validation for user records.
//!
//! All checks are pure. The date-of-birth check compares against the
//! instant passed in, so callers decide where "now" comes from.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::constants::{NAME_MAX_CHARS, NAME_MIN_CHARS};
use crate::error::DomainError;

// RFC 5322 atext, extended with any non-ASCII character as RFC 6532 allows.
const ATEXT: &str = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{10FFFF}-]";
const QUOTED_STRING: &str = r#""(?:[^"\\\r\n]|\\.)*""#;

static ADDR_SPEC_RE: OnceLock<Regex> = OnceLock::new();
static NAME_ADDR_RE: OnceLock<Regex> = OnceLock::new();

// addr-spec: dot-atom or quoted-string local part, dot-atom or
// domain-literal domain. Obsolete syntax and comments are not accepted.
fn addr_spec() -> String {
    let dot_atom = format!(r"{ATEXT}+(?:\.{ATEXT}+)*");
    format!(r"(?:{dot_atom}|{QUOTED_STRING})@(?:{dot_atom}|\[[^\[\]\\\r\n]*\])")
}

// Display name: words of atext (dots allowed) or quoted strings.
fn phrase() -> String {
    let word = format!(r"(?:(?:{ATEXT}|\.)+|{QUOTED_STRING})");
    format!(r"{word}(?:\s*{word})*")
}

fn addr_spec_regex() -> &'static Regex {
    ADDR_SPEC_RE.get_or_init(|| {
        Regex::new(&format!("^{}$", addr_spec()))
            .unwrap_or_else(|e| panic!("invalid addr-spec regex: {e}"))
    })
}

fn name_addr_regex() -> &'static Regex {
    NAME_ADDR_RE.get_or_init(|| {
        Regex::new(&format!(r"^(?:{})?\s*<{}>$", phrase(), addr_spec()))
            .unwrap_or_else(|e| panic!("invalid name-addr regex: {e}"))
    })
}

/// Whether `email` parses as a single RFC 5322 mailbox.
///
/// Accepts `local@domain` and `Display Name <local@domain>`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    addr_spec_regex().is_match(email) || name_addr_regex().is_match(email)
}

pub fn validate_name(name: &str) -> Result<(), DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::bad_request("name is required and cannot be empty"));
    }
    let chars = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        return Err(DomainError::bad_request(format!(
            "name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(DomainError::bad_request("email is required and cannot be empty"));
    }
    if !is_valid_email(email) {
        return Err(DomainError::bad_request("email format is invalid"));
    }
    Ok(())
}

pub fn validate_date_of_birth(
    date_of_birth: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), DomainError> {
    if date_of_birth > now {
        return Err(DomainError::bad_request("date of birth cannot be in the future"));
    }
    Ok(())
}

/// Runs name, email, and date-of-birth checks in order, stopping at the
/// first failure.
pub fn validate_user(
    name: &str,
    email: &str,
    date_of_birth: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), DomainError> {
    validate_name(name)?;
    validate_email(email)?;
    validate_date_of_birth(date_of_birth, now)
}
