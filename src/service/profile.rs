use crate::{db, dto::{DashboardSummaryDto, UpdateProfileDto}, errors::ApiError, models::DonorProfile, PGPool};
use crate::service::auth::UserAuthData;

pub async fn get(auth: &UserAuthData, pool: &PGPool) -> Result<DonorProfile, ApiError> {
    Ok(db::profile::get_or_create(auth.user_id, pool).await?)
}

/// Applies a partial update and enforces the sharing invariant before
/// anything is written.
pub async fn update(
    auth: &UserAuthData,
    dto: UpdateProfileDto,
    pool: &PGPool
) -> Result<DonorProfile, ApiError> {
    let mut profile = db::profile::get_or_create(auth.user_id, pool).await?;
    apply(&mut profile, dto);
    validate(&profile)?;
    db::profile::update(&profile, pool).await?;
    Ok(profile)
}

fn apply(profile: &mut DonorProfile, dto: UpdateProfileDto) {
    if let Some(v) = dto.phone {
        profile.phone = Some(v);
    }
    if let Some(v) = dto.blood_group {
        profile.blood_group = Some(v);
    }
    if let Some(v) = dto.last_donation {
        profile.last_donation = Some(v);
    }
    if let Some(v) = dto.district {
        profile.district = Some(v);
    }
    if let Some(v) = dto.share_phone {
        profile.share_phone = v;
    }
    if let Some(v) = dto.not_ready {
        profile.not_ready = v;
    }
}

/// A donor cannot offer a phone number publicly without having one.
pub fn validate(profile: &DonorProfile) -> Result<(), ApiError> {
    let phone_empty = profile
        .phone
        .as_deref()
        .map_or(true, |p| p.trim().is_empty());
    if profile.share_phone && phone_empty {
        return Err(ApiError::validation(
            "phone",
            "Phone number is required when sharing phone publicly."
        ));
    }
    Ok(())
}

pub async fn dashboard(auth: &UserAuthData, pool: &PGPool) -> Result<DashboardSummaryDto, ApiError> {
    let user = crate::service::user::get_by_id(auth.user_id, pool).await?;
    let profile = db::profile::get_or_create(auth.user_id, pool).await?;
    let donation_count = db::donation::count_for_user(auth.user_id, pool).await?;
    let full_name = match (&user.first_name, &user.last_name) {
        (None, None) => None,
        _ => Some(user.display_name())
    };
    let phone = if profile.share_phone { profile.phone.clone() } else { None };
    Ok(DashboardSummaryDto {
        username: user.username,
        full_name,
        email: user.email,
        phone,
        blood_group: profile.blood_group,
        district: profile.district,
        last_donation: profile.last_donation,
        donation_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn profile(phone: Option<&str>, share_phone: bool) -> DonorProfile {
        DonorProfile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            phone: phone.map(str::to_string),
            blood_group: None,
            last_donation: None,
            district: None,
            share_phone,
            not_ready: false
        }
    }

    #[test]
    fn test_share_phone_requires_phone() {
        assert!(validate(&profile(None, true)).is_err());
        assert!(validate(&profile(Some("  "), true)).is_err());
        assert!(validate(&profile(Some("555-1111"), true)).is_ok());
    }

    #[test]
    fn test_unshared_profile_needs_no_phone() {
        assert!(validate(&profile(None, false)).is_ok());
    }

    #[test]
    fn test_apply_keeps_absent_fields() {
        let mut p = profile(Some("555-1111"), false);
        p.district = Some("Gulshan".to_string());
        apply(&mut p, UpdateProfileDto {
            phone: None,
            blood_group: Some("AB-".to_string()),
            last_donation: None,
            district: None,
            share_phone: Some(true),
            not_ready: None,
        });
        assert_eq!(p.phone.as_deref(), Some("555-1111"));
        assert_eq!(p.district.as_deref(), Some("Gulshan"));
        assert_eq!(p.blood_group.as_deref(), Some("AB-"));
        assert!(p.share_phone);
    }
}
