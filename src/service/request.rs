use chrono::{NaiveDate, Utc};
use log::info;
use uuid::Uuid;

use crate::{db, dto::NewRequestDto, errors::ApiError, PGPool};
use crate::models::{BloodRequest, Donation, DonorRow, Notification, RequestStatus};
use crate::service::auth::UserAuthData;
use crate::service::availability::is_available;

pub const FANOUT_MESSAGE: &str = "Blood needed";
pub const COLLECTED_MESSAGE: &str = "Blood collection confirmed. Thank you for donating!";

/// Creates an open request and fans notifications out to every matching
/// available donor, as one transaction.
pub async fn create(
    auth: &UserAuthData,
    dto: NewRequestDto,
    today: NaiveDate,
    pool: &PGPool
) -> Result<BloodRequest, ApiError> {
    if dto.blood_group.trim().is_empty() {
        return Err(ApiError::validation("blood_group", "Blood group is required."));
    }
    if dto.contact_info.trim().is_empty() {
        return Err(ApiError::validation("contact_info", "Contact info is required."));
    }
    let request = BloodRequest {
        id: Uuid::new_v4(),
        user_id: auth.user_id,
        blood_group: dto.blood_group,
        city: dto.city,
        urgency: dto.urgency,
        hospital: dto.hospital,
        cause: dto.cause,
        address: dto.address,
        contact_info: dto.contact_info,
        status: RequestStatus::Open.as_str().to_string(),
        accepted_by: None,
        created_at: Utc::now()
    };
    let donors = db::profile::search(Some(&request.blood_group), None, pool).await?;
    let recipients = fanout_recipients(&donors, &request.blood_group, today);

    let mut tx = pool.begin().await?;
    db::request::create(&request, &mut *tx).await?;
    for recipient in &recipients {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: *recipient,
            request_id: request.id,
            message: FANOUT_MESSAGE.to_string(),
            read: false,
            created_at: Utc::now()
        };
        db::notification::create(&notification, &mut *tx).await?;
    }
    tx.commit().await?;

    info!(
        "request {} for {} created by {}, notified {} donor(s)",
        request.id, request.blood_group, auth.username, recipients.len()
    );
    Ok(request)
}

/// Open -> Accepted. Any authenticated user may accept an open request;
/// blood-group compatibility of the acceptor is deliberately not checked.
pub async fn accept(auth: &UserAuthData, request_id: Uuid, pool: &PGPool) -> Result<(), ApiError> {
    let request = db::request::get_by_id(request_id, pool).await?;
    let status = RequestStatus::parse(&request.status).ok_or(ApiError::InternalError)?;
    if !status.can_accept() {
        return Err(ApiError::InvalidStateTransition);
    }
    let acceptor = db::user::get_by_id(auth.user_id, pool).await?;
    let acceptor_profile = db::profile::get_or_create(auth.user_id, pool).await?;
    let phone = if acceptor_profile.share_phone {
        acceptor_profile.phone.clone()
    } else {
        None
    };
    let message = acceptance_message(
        &acceptor.display_name(),
        acceptor.email.as_deref(),
        phone.as_deref()
    );

    let mut tx = pool.begin().await?;
    // Exactly one concurrent acceptor can observe status = open.
    let rows = db::request::try_accept(request_id, auth.user_id, &mut *tx).await?;
    if rows == 0 {
        return Err(ApiError::InvalidStateTransition);
    }
    let notification = Notification {
        id: Uuid::new_v4(),
        user_id: request.user_id,
        request_id,
        message,
        read: false,
        created_at: Utc::now()
    };
    db::notification::create(&notification, &mut *tx).await?;
    tx.commit().await?;

    info!("request {} accepted by {}", request_id, auth.username);
    Ok(())
}

/// Accepted -> Collected, requester only. Writes the donation ledger entry,
/// restarts the donor's rest window and clears the notification trail, all
/// in one transaction; a ledger write failure aborts the whole transition.
pub async fn collect(
    auth: &UserAuthData,
    request_id: Uuid,
    today: NaiveDate,
    pool: &PGPool
) -> Result<(), ApiError> {
    let request = db::request::get_by_id(request_id, pool).await?;
    if request.user_id != auth.user_id {
        // Non-owners are not told the request exists.
        return Err(ApiError::NotFound);
    }
    let status = RequestStatus::parse(&request.status).ok_or(ApiError::InternalError)?;
    if !status.can_collect() {
        return Err(ApiError::InvalidStateTransition);
    }

    let mut tx = pool.begin().await?;
    let rows = db::request::try_collect(request_id, &mut *tx).await?;
    if rows == 0 {
        return Err(ApiError::InvalidStateTransition);
    }
    // accepted_by is always set once a request has left the open state.
    let donor_id = request.accepted_by.ok_or(ApiError::InternalError)?;
    let donation = Donation {
        id: Uuid::new_v4(),
        user_id: donor_id,
        blood_group: request.blood_group.clone(),
        hospital: fallback_hospital(&request),
        units_donated: 1,
        donation_date: Utc::now()
    };
    db::donation::create(&donation, &mut *tx).await?;
    db::profile::set_donated(donor_id, today, &mut *tx).await?;
    let confirmation = Notification {
        id: Uuid::new_v4(),
        user_id: donor_id,
        request_id,
        message: COLLECTED_MESSAGE.to_string(),
        read: false,
        created_at: Utc::now()
    };
    db::notification::create(&confirmation, &mut *tx).await?;
    // Completion clears the whole trail, the confirmation just written
    // included.
    db::notification::delete_for_request(request_id, &mut *tx).await?;
    tx.commit().await?;

    info!("request {} collected, donation recorded for {}", request_id, donor_id);
    Ok(())
}

pub async fn get_all(pool: &PGPool) -> Result<Vec<BloodRequest>, ApiError> {
    Ok(db::request::get_all(pool).await?)
}

pub async fn get_by_id(id: Uuid, pool: &PGPool) -> Result<BloodRequest, ApiError> {
    Ok(db::request::get_by_id(id, pool).await?)
}

/// Donors to notify about a new request: matching blood group (compared
/// case-insensitively) and available as of the creation date.
pub(crate) fn fanout_recipients(
    donors: &[DonorRow],
    blood_group: &str,
    as_of: NaiveDate
) -> Vec<Uuid> {
    donors
        .iter()
        .filter(|row| {
            row.profile
                .blood_group
                .as_deref()
                .map_or(false, |bg| bg.eq_ignore_ascii_case(blood_group))
        })
        .filter(|row| is_available(&row.profile, as_of))
        .map(|row| row.profile.user_id)
        .collect()
}

pub(crate) fn acceptance_message(name: &str, email: Option<&str>, phone: Option<&str>) -> String {
    let mut message = format!(
        "{} accepted your blood request (email: {})",
        name,
        email.unwrap_or("unknown")
    );
    if let Some(phone) = phone {
        message.push_str(&format!(", phone: {}", phone));
    }
    message
}

pub(crate) fn fallback_hospital(request: &BloodRequest) -> String {
    request
        .hospital
        .clone()
        .filter(|h| !h.trim().is_empty())
        .or_else(|| request.city.clone().filter(|c| !c.trim().is_empty()))
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DonorProfile;
    use chrono::{Duration, NaiveDate};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn donor(blood_group: Option<&str>, last_donation: Option<NaiveDate>, not_ready: bool) -> DonorRow {
        DonorRow {
            profile: DonorProfile {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                phone: None,
                blood_group: blood_group.map(str::to_string),
                last_donation,
                district: None,
                share_phone: false,
                not_ready
            },
            username: "donor".to_string(),
            email: None,
            first_name: None,
            last_name: None
        }
    }

    fn request(hospital: Option<&str>, city: Option<&str>) -> BloodRequest {
        BloodRequest {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            blood_group: "O+".to_string(),
            city: city.map(str::to_string),
            urgency: None,
            hospital: hospital.map(str::to_string),
            cause: None,
            address: None,
            contact_info: "555-0000".to_string(),
            status: "accepted".to_string(),
            accepted_by: Some(Uuid::new_v4()),
            created_at: Utc::now()
        }
    }

    #[test]
    fn test_fanout_selects_exactly_the_matching_available_donor() {
        let as_of = day(2024, 6, 1);
        let matching = donor(Some("O-"), None, false);
        let donors = vec![
            matching.clone(),
            donor(Some("A+"), None, false),
            donor(Some("O-"), Some(as_of - Duration::days(10)), false),
            donor(Some("O-"), None, true),
            donor(None, None, false),
        ];
        let recipients = fanout_recipients(&donors, "O-", as_of);
        assert_eq!(recipients, vec![matching.profile.user_id]);
    }

    #[test]
    fn test_fanout_with_no_match_is_empty() {
        let donors = vec![donor(Some("A+"), None, false)];
        assert!(fanout_recipients(&donors, "O-", day(2024, 6, 1)).is_empty());
    }

    #[test]
    fn test_fanout_matches_blood_group_case_insensitively() {
        let donors = vec![donor(Some("ab+"), None, false)];
        assert_eq!(fanout_recipients(&donors, "AB+", day(2024, 6, 1)).len(), 1);
    }

    #[test]
    fn test_acceptance_message_gates_phone() {
        let with_phone = acceptance_message("Ada Lovelace", Some("ada@example.com"), Some("555-1111"));
        assert!(with_phone.contains("Ada Lovelace"));
        assert!(with_phone.contains("ada@example.com"));
        assert!(with_phone.contains("555-1111"));

        let without_phone = acceptance_message("Ada Lovelace", Some("ada@example.com"), None);
        assert!(!without_phone.contains("phone"));
    }

    #[test]
    fn test_hospital_fallback_precedence() {
        assert_eq!(fallback_hospital(&request(Some("City Hospital"), Some("Dhaka"))), "City Hospital");
        assert_eq!(fallback_hospital(&request(None, Some("Dhaka"))), "Dhaka");
        assert_eq!(fallback_hospital(&request(Some("  "), Some("Dhaka"))), "Dhaka");
        assert_eq!(fallback_hospital(&request(None, None)), "Unknown");
    }
}
