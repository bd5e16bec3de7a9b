use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub date_of_birth: DateTime<Utc>,
}

impl User {
    /// Builds a record from already-validated fields.
    ///
    /// Name and email are trimmed. The date of birth is truncated to
    /// microseconds, the finest precision every backend stores.
    #[must_use]
    pub fn new(id: Uuid, name: &str, email: &str, date_of_birth: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.trim().to_owned(),
            email: email.trim().to_owned(),
            date_of_birth: date_of_birth.trunc_subsecs(6),
        }
    }
}

/// Candidate record submitted by a client, not yet validated.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub date_of_birth: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_trims_text_fields() {
        let dob = Utc.with_ymd_and_hms(1990, 5, 17, 0, 0, 0).unwrap();
        let user = User::new(Uuid::nil(), "  Milan ", " haha@test.com\n", dob);
        assert_eq!(user.name, "Milan");
        assert_eq!(user.email, "haha@test.com");
    }

    #[test]
    fn new_truncates_nanoseconds() {
        let dob = Utc.timestamp_opt(631_152_000, 123_456_789).unwrap();
        let user = User::new(Uuid::nil(), "Milan", "haha@test.com", dob);
        assert_eq!(user.date_of_birth.timestamp_subsec_nanos(), 123_456_000);
    }
}
