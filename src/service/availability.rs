use chrono::NaiveDate;

use crate::models::DonorProfile;

// Single place to change the donor rest window.
pub const REST_WINDOW_DAYS: i64 = 90;

/// Whether a donor can give blood on `as_of`.
///
/// `not_ready` is an absolute override; otherwise the donor is unavailable
/// while the last donation is younger than the rest window. A donation made
/// exactly `REST_WINDOW_DAYS` ago no longer blocks.
pub fn is_available(profile: &DonorProfile, as_of: NaiveDate) -> bool {
    if profile.not_ready {
        return false;
    }
    match profile.last_donation {
        Some(last_donation) => (as_of - last_donation).num_days() >= REST_WINDOW_DAYS,
        None => true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn profile(last_donation: Option<NaiveDate>, not_ready: bool) -> DonorProfile {
        DonorProfile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            phone: None,
            blood_group: Some("O+".to_string()),
            last_donation,
            district: None,
            share_phone: false,
            not_ready
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_donation_on_record_is_available() {
        assert!(is_available(&profile(None, false), day(2024, 6, 1)));
    }

    #[test]
    fn test_not_ready_overrides_everything() {
        let as_of = day(2024, 6, 1);
        assert!(!is_available(&profile(None, true), as_of));
        let long_ago = as_of - Duration::days(400);
        assert!(!is_available(&profile(Some(long_ago), true), as_of));
    }

    #[test]
    fn test_rest_window_boundary() {
        let donated = day(2024, 1, 1);
        let p = profile(Some(donated), false);
        assert!(!is_available(&p, donated + Duration::days(REST_WINDOW_DAYS - 1)));
        assert!(is_available(&p, donated + Duration::days(REST_WINDOW_DAYS)));
        assert!(is_available(&p, donated + Duration::days(REST_WINDOW_DAYS + 1)));
    }

    #[test]
    fn test_donation_inside_window_blocks() {
        let as_of = day(2024, 6, 1);
        let p = profile(Some(as_of - Duration::days(10)), false);
        assert!(!is_available(&p, as_of));
    }
}
