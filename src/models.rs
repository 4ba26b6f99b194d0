use chrono::{DateTime, NaiveDate, Utc};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub pwd_hash: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>
}

impl User {
    pub fn display_name(&self) -> String {
        display_name(self.first_name.as_deref(), self.last_name.as_deref(), &self.username)
    }
}

#[derive(Debug, Clone, FromRow, serde::Serialize, serde::Deserialize)]
pub struct DonorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub blood_group: Option<String>,
    pub last_donation: Option<NaiveDate>,
    pub district: Option<String>,
    pub share_phone: bool,
    pub not_ready: bool
}

/// A donor profile joined with the account fields needed for display.
#[derive(Debug, Clone, FromRow, serde::Serialize, serde::Deserialize)]
pub struct DonorRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub profile: DonorProfile,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>
}

impl DonorRow {
    pub fn display_name(&self) -> String {
        display_name(self.first_name.as_deref(), self.last_name.as_deref(), &self.username)
    }
}

/// "First Last" when either name part is present, otherwise the username.
pub fn display_name(first: Option<&str>, last: Option<&str>, username: &str) -> String {
    let full = format!("{} {}", first.unwrap_or(""), last.unwrap_or(""));
    let full = full.trim();
    if full.is_empty() {
        username.to_string()
    } else {
        full.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Open,
    Accepted,
    Collected
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Open => "open",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Collected => "collected"
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(RequestStatus::Open),
            "accepted" => Some(RequestStatus::Accepted),
            "collected" => Some(RequestStatus::Collected),
            _ => None
        }
    }

    /// Accept is only legal on an open request.
    pub fn can_accept(&self) -> bool {
        matches!(self, RequestStatus::Open)
    }

    /// Collect is only legal on an accepted request.
    pub fn can_collect(&self) -> bool {
        matches!(self, RequestStatus::Accepted)
    }
}

#[derive(Debug, Clone, FromRow, serde::Serialize, serde::Deserialize)]
pub struct BloodRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub blood_group: String,
    pub city: Option<String>,
    pub urgency: Option<String>,
    pub hospital: Option<String>,
    pub cause: Option<String>,
    pub address: Option<String>,
    pub contact_info: String,
    pub status: String,
    pub accepted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>
}

#[derive(Debug, FromRow, serde::Serialize, serde::Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub request_id: Uuid,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>
}

#[derive(Debug, FromRow, serde::Serialize, serde::Deserialize)]
pub struct Donation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub blood_group: String,
    pub hospital: String,
    pub units_donated: i32,
    pub donation_date: DateTime<Utc>
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in ["open", "accepted", "collected"] {
            assert_eq!(RequestStatus::parse(s).unwrap().as_str(), s);
        }
        assert_eq!(RequestStatus::parse("cancelled"), None);
    }

    #[test]
    fn test_transition_guards() {
        assert!(RequestStatus::Open.can_accept());
        assert!(!RequestStatus::Accepted.can_accept());
        assert!(!RequestStatus::Collected.can_accept());

        assert!(RequestStatus::Accepted.can_collect());
        assert!(!RequestStatus::Open.can_collect());
        assert!(!RequestStatus::Collected.can_collect());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        assert_eq!(display_name(Some("Ada"), Some("Lovelace"), "ada"), "Ada Lovelace");
        assert_eq!(display_name(Some("Ada"), None, "ada"), "Ada");
        assert_eq!(display_name(None, None, "ada"), "ada");
        assert_eq!(display_name(Some(""), Some(""), "ada"), "ada");
    }
}
