use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Account document. `password_hash` stays in storage only; client-facing
/// responses go through [`UserProfile`].
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub care_mode: Option<CareMode>,
    #[serde(default)]
    pub expected_due_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_period_date: Option<NaiveDate>,
    pub cycle_length: u32,
    pub period_duration: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            date_of_birth: self.date_of_birth,
            address: self.address.clone(),
            city: self.city.clone(),
            role: self.role,
            care_mode: self.care_mode,
            expected_due_date: self.expected_due_date,
            last_period_date: self.last_period_date,
            cycle_length: self.cycle_length,
            period_duration: self.period_duration,
        }
    }
}

/// Client-facing view of a user (no password hash).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub role: Role,
    pub care_mode: Option<CareMode>,
    pub expected_due_date: Option<NaiveDate>,
    pub last_period_date: Option<NaiveDate>,
    pub cycle_length: u32,
    pub period_duration: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Admin,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CareMode {
    Planning,
    Pregnancy,
    BabyCare,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Baby {
    pub id: String,
    pub name: String,
    pub parent: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[serde(default)]
    pub weight: Option<f64>, // kg
    #[serde(default)]
    pub height: Option<f64>, // cm
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub photo: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Baby {
    /// Calendar-month age, matching `(y2-y1)*12 + (m2-m1)`.
    pub fn age_in_months_at(&self, today: NaiveDate) -> i32 {
        (today.year() - self.date_of_birth.year()) * 12
            + (today.month() as i32 - self.date_of_birth.month() as i32)
    }

    pub fn age_in_days_at(&self, today: NaiveDate) -> i64 {
        (today - self.date_of_birth).num_days()
    }

    pub fn age_in_weeks_at(&self, today: NaiveDate) -> i64 {
        self.age_in_days_at(today) / 7
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedingKind {
    Breast,
    Formula,
    Solid,
    Water,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeedingLog {
    pub id: String,
    pub baby: String,
    pub parent: String,
    pub kind: FeedingKind,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub quantity: Option<f64>, // ml or grams
    #[serde(default)]
    pub duration: Option<u32>, // minutes (breastfeeding)
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SleepLog {
    pub id: String,
    pub baby: String,
    pub parent: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Minutes, derived from start/end on every write.
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub quality: Option<SleepQuality>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SleepLog {
    /// Recompute the stored duration from the time window.
    pub fn derive_duration(&mut self) {
        self.duration = self
            .end_time
            .map(|end| (end - self.start_time).num_minutes());
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VaccinationStatus {
    Pending,
    Scheduled,
    Completed,
    Missed,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Vaccination {
    pub id: String,
    pub baby: String,
    pub parent: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Recommended age in weeks.
    pub recommended_age: u32,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
    pub status: VaccinationStatus,
    #[serde(default)]
    pub administered_by: Option<String>,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneCategory {
    Physical,
    Social,
    Language,
    Cognitive,
    #[serde(rename = "Self-Care")]
    SelfCare,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneStatus {
    Upcoming,
    Pending,
    Completed,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Milestone {
    pub id: String,
    pub baby: String,
    pub parent: String,
    pub name: String,
    pub category: MilestoneCategory,
    #[serde(default)]
    pub description: Option<String>,
    pub age_in_months: u32,
    pub status: MilestoneStatus,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// JWT claims carried in the bearer token.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthPayload {
    pub sub: String, // user id
    pub exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn baby_born(dob: NaiveDate) -> Baby {
        Baby {
            id: "b1".into(),
            name: "Test".into(),
            parent: "u1".into(),
            date_of_birth: dob,
            gender: Gender::Female,
            weight: None,
            height: None,
            blood_group: None,
            allergies: vec![],
            medical_conditions: vec![],
            photo: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn age_in_months_uses_calendar_months() {
        let baby = baby_born(date(2025, 1, 15));
        assert_eq!(baby.age_in_months_at(date(2025, 7, 1)), 6);
        assert_eq!(baby.age_in_months_at(date(2026, 1, 15)), 12);
        // Month delta only, day-of-month ignored
        assert_eq!(baby.age_in_months_at(date(2025, 2, 1)), 1);
    }

    #[test]
    fn age_in_weeks_floors_days() {
        let baby = baby_born(date(2025, 6, 1));
        assert_eq!(baby.age_in_weeks_at(date(2025, 6, 14)), 1);
        assert_eq!(baby.age_in_weeks_at(date(2025, 6, 15)), 2);
    }

    #[test]
    fn sleep_duration_derived_from_window() {
        let start = Utc::now();
        let mut log = SleepLog {
            id: "s1".into(),
            baby: "b1".into(),
            parent: "u1".into(),
            start_time: start,
            end_time: Some(start + chrono::Duration::minutes(95)),
            duration: None,
            quality: Some(SleepQuality::Good),
            notes: None,
            created_at: start,
            updated_at: start,
        };
        log.derive_duration();
        assert_eq!(log.duration, Some(95));

        log.end_time = None;
        log.derive_duration();
        assert_eq!(log.duration, None);
    }

    #[test]
    fn care_mode_uses_kebab_case_wire_values() {
        assert_eq!(
            serde_json::to_string(&CareMode::BabyCare).unwrap(),
            "\"baby-care\""
        );
        assert_eq!(
            serde_json::from_str::<CareMode>("\"planning\"").unwrap(),
            CareMode::Planning
        );
    }

    #[test]
    fn milestone_category_self_care_rename() {
        assert_eq!(
            serde_json::to_string(&MilestoneCategory::SelfCare).unwrap(),
            "\"Self-Care\""
        );
    }
}
