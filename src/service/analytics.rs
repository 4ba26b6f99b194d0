use chrono::NaiveDate;

use crate::{db, dto::AnalyticsDto, errors::ApiError, models::DonorRow, PGPool};
use crate::service::availability::is_available;

/// The eight canonical ABO/Rh groups, in presentation order.
pub const BLOOD_GROUPS: [&str; 8] = ["A+", "A-", "B+", "B-", "O+", "O-", "AB+", "AB-"];

/// Donor name lists are bounded so the rollup stays small.
pub const NAMES_PER_GROUP: usize = 50;

/// Recomputed from the store on every call; no state of its own.
pub async fn rollup(as_of: NaiveDate, pool: &PGPool) -> Result<AnalyticsDto, ApiError> {
    let demand = db::request::demand_by_group(pool).await?;
    let donors = db::profile::get_all_rows(pool).await?;
    Ok(build_rollup(&demand, &donors, as_of))
}

pub(crate) fn build_rollup(
    demand: &[(String, i64)],
    donors: &[DonorRow],
    as_of: NaiveDate
) -> AnalyticsDto {
    let mut demand_counts = Vec::with_capacity(BLOOD_GROUPS.len());
    let mut available_counts = Vec::with_capacity(BLOOD_GROUPS.len());
    let mut available_names = Vec::with_capacity(BLOOD_GROUPS.len());

    for group in BLOOD_GROUPS {
        let open_requests = demand
            .iter()
            .filter(|(bg, _)| bg.eq_ignore_ascii_case(group))
            .map(|(_, count)| count)
            .sum::<i64>();
        demand_counts.push(open_requests);

        let group_donors: Vec<&DonorRow> = donors
            .iter()
            .filter(|row| {
                row.profile
                    .blood_group
                    .as_deref()
                    .map_or(false, |bg| bg.eq_ignore_ascii_case(group))
            })
            .filter(|row| is_available(&row.profile, as_of))
            .collect();
        available_counts.push(group_donors.len() as i64);
        available_names.push(
            group_donors
                .iter()
                .take(NAMES_PER_GROUP)
                .map(|row| row.display_name())
                .collect()
        );
    }

    AnalyticsDto {
        blood_groups: BLOOD_GROUPS.iter().map(|g| g.to_string()).collect(),
        demand: demand_counts,
        available: available_counts,
        available_names,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DonorProfile;
    use chrono::Duration;
    use uuid::Uuid;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn donor(name: &str, blood_group: &str, last_donation: Option<NaiveDate>) -> DonorRow {
        DonorRow {
            profile: DonorProfile {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                phone: None,
                blood_group: Some(blood_group.to_string()),
                last_donation,
                district: None,
                share_phone: false,
                not_ready: false
            },
            username: name.to_string(),
            email: None,
            first_name: None,
            last_name: None
        }
    }

    #[test]
    fn test_rollup_covers_all_groups_in_order() {
        let rollup = build_rollup(&[], &[], day(2024, 6, 1));
        assert_eq!(rollup.blood_groups, BLOOD_GROUPS.to_vec());
        assert_eq!(rollup.demand, vec![0; 8]);
        assert_eq!(rollup.available, vec![0; 8]);
        assert!(rollup.available_names.iter().all(|names| names.is_empty()));
    }

    #[test]
    fn test_rollup_counts_available_donors_per_group() {
        let as_of = day(2024, 6, 1);
        let donors = vec![
            donor("ada", "O+", None),
            donor("grace", "o+", Some(as_of - Duration::days(200))),
            donor("resting", "O+", Some(as_of - Duration::days(5))),
            donor("edsger", "AB-", None),
        ];
        let demand = vec![("O+".to_string(), 3), ("AB-".to_string(), 1)];
        let rollup = build_rollup(&demand, &donors, as_of);

        let o_pos = BLOOD_GROUPS.iter().position(|g| *g == "O+").unwrap();
        assert_eq!(rollup.demand[o_pos], 3);
        assert_eq!(rollup.available[o_pos], 2);
        assert_eq!(rollup.available_names[o_pos], vec!["ada", "grace"]);

        let ab_neg = BLOOD_GROUPS.iter().position(|g| *g == "AB-").unwrap();
        assert_eq!(rollup.available[ab_neg], 1);
    }

    #[test]
    fn test_name_lists_are_bounded() {
        let donors: Vec<DonorRow> = (0..60).map(|i| donor(&format!("d{}", i), "B-", None)).collect();
        let rollup = build_rollup(&[], &donors, day(2024, 6, 1));
        let b_neg = BLOOD_GROUPS.iter().position(|g| *g == "B-").unwrap();
        assert_eq!(rollup.available[b_neg], 60);
        assert_eq!(rollup.available_names[b_neg].len(), NAMES_PER_GROUP);
    }
}
