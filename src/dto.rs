use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::DonorRow;

#[derive(Debug, Deserialize, Clone)]
pub struct NewUserDto {
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub pwd: String,
    pub pwd_confirm: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoginUserRequest {
    pub username: String,
    pub pwd: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthTokensDto {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenDto {
    pub refresh: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub username: String,
    pub exp: usize
}

impl Claims {
    pub fn new(user_id: &Uuid, username: &str, exp: usize) -> Self {
        Self {
            user_id: *user_id,
            username: username.to_string(),
            exp
        }
    }
}

/// Partial profile update; fields left out of the payload are kept as-is.
#[derive(Debug, Deserialize, Clone)]
pub struct UpdateProfileDto {
    pub phone: Option<String>,
    pub blood_group: Option<String>,
    pub last_donation: Option<NaiveDate>,
    pub district: Option<String>,
    pub share_phone: Option<bool>,
    pub not_ready: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NewRequestDto {
    pub blood_group: String,
    pub city: Option<String>,
    pub urgency: Option<String>,
    pub hospital: Option<String>,
    pub cause: Option<String>,
    pub address: Option<String>,
    pub contact_info: String,
}

#[derive(Debug, Deserialize)]
pub struct DonorSearchQuery {
    pub blood_group: Option<String>,
    pub district: Option<String>,
}

/// Public-facing donor view; the phone number is withheld unless the donor
/// opted into sharing it.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicDonorDto {
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub blood_group: Option<String>,
    pub district: Option<String>,
    pub last_donation: Option<NaiveDate>,
}

impl From<&DonorRow> for PublicDonorDto {
    fn from(row: &DonorRow) -> Self {
        let phone = if row.profile.share_phone {
            row.profile.phone.clone()
        } else {
            None
        };
        Self {
            username: row.username.clone(),
            full_name: row.display_name(),
            email: row.email.clone(),
            phone,
            blood_group: row.profile.blood_group.clone(),
            district: row.profile.district.clone(),
            last_donation: row.profile.last_donation,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardSummaryDto {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub blood_group: Option<String>,
    pub district: Option<String>,
    pub last_donation: Option<NaiveDate>,
    pub donation_count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyticsDto {
    pub blood_groups: Vec<String>,
    pub demand: Vec<i64>,
    pub available: Vec<i64>,
    pub available_names: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DonorProfile;
    use uuid::Uuid;

    fn donor_row(share_phone: bool) -> DonorRow {
        DonorRow {
            profile: DonorProfile {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                phone: Some("555-1111".to_string()),
                blood_group: Some("O+".to_string()),
                last_donation: None,
                district: Some("Dhanmondi".to_string()),
                share_phone,
                not_ready: false,
            },
            username: "ada".to_string(),
            email: Some("ada@example.com".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
        }
    }

    #[test]
    fn test_public_view_hides_unshared_phone() {
        let dto = PublicDonorDto::from(&donor_row(false));
        assert_eq!(dto.phone, None);
        assert_eq!(dto.full_name, "Ada Lovelace");
    }

    #[test]
    fn test_public_view_exposes_shared_phone() {
        let dto = PublicDonorDto::from(&donor_row(true));
        assert_eq!(dto.phone.as_deref(), Some("555-1111"));
    }
}
