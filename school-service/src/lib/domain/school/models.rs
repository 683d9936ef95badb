use std::fmt;

use auth::AccountId;
use chrono::DateTime;
use chrono::Utc;

use crate::school::errors::SchoolNameError;

/// School aggregate entity.
///
/// A registered organizational record with login credentials.
#[derive(Debug, Clone)]
pub struct School {
    pub id: SchoolId,
    pub name: SchoolName,
    pub address: String,
    pub password_hash: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// School unique identifier, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchoolId(pub i64);

impl From<AccountId> for SchoolId {
    fn from(account_id: AccountId) -> Self {
        Self(account_id.as_i64())
    }
}

impl From<SchoolId> for AccountId {
    fn from(id: SchoolId) -> Self {
        AccountId(id.0)
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// School display name, unique across all schools.
///
/// Stored as submitted; only blank names are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolName(String);

impl SchoolName {
    /// Create a new school name.
    ///
    /// # Errors
    /// * `Blank` - Name is empty or whitespace only
    pub fn new(name: String) -> Result<Self, SchoolNameError> {
        if name.trim().is_empty() {
            Err(SchoolNameError::Blank)
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchoolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A school about to be inserted; storage assigns id, verified flag and timestamp.
#[derive(Debug, Clone)]
pub struct NewSchool {
    pub name: SchoolName,
    pub address: String,
    pub password_hash: String,
}

/// Edit request unique identifier, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditRequestId(pub i64);

impl fmt::Display for EditRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A proposed replacement of a school's name and address, awaiting an operator.
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub id: EditRequestId,
    pub school_id: SchoolId,
    pub new_name: SchoolName,
    pub new_address: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

/// Command to register a new school
#[derive(Debug)]
pub struct RegisterSchoolCommand {
    pub name: SchoolName,
    pub address: String,
    /// Plain text password (validated and hashed by the service)
    pub password: String,
}

/// Command to exchange a school id and password for a session token
#[derive(Debug)]
pub struct LoginCommand {
    pub school_id: SchoolId,
    pub password: String,
}

/// Command filed by an authenticated school to propose new details
#[derive(Debug, Clone)]
pub struct RequestEditCommand {
    pub school_id: SchoolId,
    pub new_name: SchoolName,
    pub new_address: String,
}

/// Command by the operator to overwrite a school's details and close the matching request
#[derive(Debug, Clone)]
pub struct ApplyEditCommand {
    pub school_id: SchoolId,
    pub new_name: SchoolName,
    pub new_address: String,
    pub edit_request_id: EditRequestId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_school_name_accepts_regular_names() {
        let name = SchoolName::new("Acme Academy".to_string()).unwrap();
        assert_eq!(name.as_str(), "Acme Academy");
    }

    #[test]
    fn test_school_name_rejects_blank() {
        assert_eq!(SchoolName::new(String::new()), Err(SchoolNameError::Blank));
        assert_eq!(
            SchoolName::new("   ".to_string()),
            Err(SchoolNameError::Blank)
        );
    }

    #[test]
    fn test_school_id_round_trips_through_account_id() {
        let account_id: AccountId = SchoolId(12).into();
        assert_eq!(SchoolId::from(account_id), SchoolId(12));
    }
}
