//! Fixed vaccination and milestone schedules, plus the generators that stamp
//! them out for a baby. Generation is idempotent by natural key: an entry is
//! skipped when the baby already has a record with the same name.

use chrono::{Months, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{
    Baby, Milestone, MilestoneCategory, MilestoneStatus, Vaccination, VaccinationStatus,
};
use crate::storage::{Storage, StorageError};

pub struct VaccineDef {
    pub name: &'static str,
    pub description: &'static str,
    /// Weeks for the immunization-card schedule, months for the auto
    /// schedule (see the two tables below).
    pub age: u32,
}

/// Week-offset immunization card seeded by `POST /api/vaccination/initialize`.
pub const VACCINE_SCHEDULE_WEEKS: &[VaccineDef] = &[
    VaccineDef { name: "BCG", description: "Bacillus Calmette-Guérin (Tuberculosis)", age: 0 },
    VaccineDef { name: "Hepatitis B - Birth Dose", description: "First dose at birth", age: 0 },
    VaccineDef { name: "OPV 0", description: "Oral Polio Vaccine (Birth dose)", age: 0 },
    VaccineDef { name: "Hepatitis B - 1", description: "First dose after birth", age: 6 },
    VaccineDef { name: "DTP 1", description: "Diphtheria, Tetanus, Pertussis", age: 6 },
    VaccineDef { name: "IPV 1", description: "Inactivated Polio Vaccine", age: 6 },
    VaccineDef { name: "Hib 1", description: "Haemophilus influenzae type B", age: 6 },
    VaccineDef { name: "PCV 1", description: "Pneumococcal Conjugate Vaccine", age: 6 },
    VaccineDef { name: "Rotavirus 1", description: "Rotavirus Vaccine", age: 6 },
    VaccineDef { name: "Hepatitis B - 2", description: "Second dose", age: 10 },
    VaccineDef { name: "DTP 2", description: "Second dose", age: 10 },
    VaccineDef { name: "IPV 2", description: "Second dose", age: 10 },
    VaccineDef { name: "Hib 2", description: "Second dose", age: 10 },
    VaccineDef { name: "PCV 2", description: "Second dose", age: 10 },
    VaccineDef { name: "Rotavirus 2", description: "Second dose", age: 10 },
    VaccineDef { name: "Hepatitis B - 3", description: "Third dose", age: 14 },
    VaccineDef { name: "DTP 3", description: "Third dose", age: 14 },
    VaccineDef { name: "IPV 3", description: "Third dose", age: 14 },
    VaccineDef { name: "Hib 3", description: "Third dose", age: 14 },
    VaccineDef { name: "PCV 3", description: "Third dose", age: 14 },
    VaccineDef { name: "Rotavirus 3", description: "Third dose", age: 14 },
    VaccineDef { name: "MMR 1", description: "Measles, Mumps, Rubella (1 year)", age: 52 },
    VaccineDef { name: "Varicella 1", description: "Chickenpox (1 year)", age: 52 },
];

/// Month-offset schedule used by `POST /api/analytics/auto-generate`; each
/// entry also gets a concrete scheduled date from the birth date.
pub const VACCINE_SCHEDULE_MONTHS: &[VaccineDef] = &[
    VaccineDef { name: "BCG", description: "Bacillus Calmette-Guerin (Tuberculosis)", age: 0 },
    VaccineDef { name: "Hepatitis B (1st dose)", description: "First dose at birth", age: 0 },
    VaccineDef { name: "OPV 0", description: "Oral Polio Vaccine (birth dose)", age: 0 },
    VaccineDef { name: "Hepatitis B (2nd dose)", description: "Second dose", age: 1 },
    VaccineDef { name: "DTaP 1", description: "Diphtheria, Tetanus, Pertussis", age: 2 },
    VaccineDef { name: "IPV 1", description: "Inactivated Polio Vaccine", age: 2 },
    VaccineDef { name: "Hib 1", description: "Haemophilus influenzae type b", age: 2 },
    VaccineDef { name: "PCV 1", description: "Pneumococcal Conjugate Vaccine", age: 2 },
    VaccineDef { name: "Rotavirus 1", description: "Rotavirus Vaccine", age: 2 },
    VaccineDef { name: "DTaP 2", description: "Second dose", age: 4 },
    VaccineDef { name: "IPV 2", description: "Second dose", age: 4 },
    VaccineDef { name: "Hib 2", description: "Second dose", age: 4 },
    VaccineDef { name: "PCV 2", description: "Second dose", age: 4 },
    VaccineDef { name: "Rotavirus 2", description: "Second dose", age: 4 },
    VaccineDef { name: "DTaP 3", description: "Third dose", age: 6 },
    VaccineDef { name: "IPV 3", description: "Third dose", age: 6 },
    VaccineDef { name: "Hib 3", description: "Third dose", age: 6 },
    VaccineDef { name: "PCV 3", description: "Third dose", age: 6 },
    VaccineDef { name: "Hepatitis B (3rd dose)", description: "Third dose", age: 6 },
    VaccineDef { name: "Influenza", description: "Annual flu vaccine", age: 6 },
    VaccineDef { name: "MMR 1", description: "Measles, Mumps, Rubella", age: 12 },
    VaccineDef { name: "Varicella 1", description: "Chickenpox vaccine", age: 12 },
    VaccineDef { name: "Hepatitis A 1", description: "First dose", age: 12 },
    VaccineDef { name: "PCV 4", description: "Booster dose", age: 15 },
    VaccineDef { name: "DTaP 4", description: "Booster dose", age: 18 },
    VaccineDef { name: "Hepatitis A 2", description: "Second dose", age: 18 },
];

pub struct MilestoneDef {
    pub name: &'static str,
    pub category: MilestoneCategory,
    pub description: &'static str,
    pub age_months: u32,
}

pub const MILESTONE_SCHEDULE: &[MilestoneDef] = &[
    MilestoneDef { name: "First Smile", category: MilestoneCategory::Social, description: "Smiles at people", age_months: 2 },
    MilestoneDef { name: "Holds Head Up", category: MilestoneCategory::Physical, description: "Holds head steady when upright", age_months: 3 },
    MilestoneDef { name: "Laughs", category: MilestoneCategory::Social, description: "Laughs out loud", age_months: 4 },
    MilestoneDef { name: "Rolls Over", category: MilestoneCategory::Physical, description: "Rolls from tummy to back", age_months: 4 },
    MilestoneDef { name: "Reaches for Toys", category: MilestoneCategory::Physical, description: "Reaches for and grasps toys", age_months: 5 },
    MilestoneDef { name: "Sits Without Support", category: MilestoneCategory::Physical, description: "Sits without support", age_months: 6 },
    MilestoneDef { name: "Babbles", category: MilestoneCategory::Language, description: "Makes babbling sounds", age_months: 6 },
    MilestoneDef { name: "Crawls", category: MilestoneCategory::Physical, description: "Crawls forward on belly", age_months: 8 },
    MilestoneDef { name: "Says \"Mama\" or \"Dada\"", category: MilestoneCategory::Language, description: "First words", age_months: 9 },
    MilestoneDef { name: "Pulls to Stand", category: MilestoneCategory::Physical, description: "Pulls self to standing position", age_months: 9 },
    MilestoneDef { name: "Waves Bye-bye", category: MilestoneCategory::Social, description: "Waves goodbye", age_months: 10 },
    MilestoneDef { name: "Walks Holding On", category: MilestoneCategory::Physical, description: "Walks while holding furniture", age_months: 11 },
    MilestoneDef { name: "First Steps", category: MilestoneCategory::Physical, description: "Takes first independent steps", age_months: 12 },
    MilestoneDef { name: "Uses Simple Gestures", category: MilestoneCategory::Social, description: "Shakes head no, points", age_months: 12 },
    MilestoneDef { name: "Drinks from Cup", category: MilestoneCategory::SelfCare, description: "Drinks from cup with help", age_months: 13 },
    MilestoneDef { name: "Walks Independently", category: MilestoneCategory::Physical, description: "Walks without support", age_months: 15 },
    MilestoneDef { name: "Uses Spoon", category: MilestoneCategory::SelfCare, description: "Feeds self with spoon", age_months: 18 },
    MilestoneDef { name: "Runs", category: MilestoneCategory::Physical, description: "Runs steadily", age_months: 18 },
    MilestoneDef { name: "Two-Word Phrases", category: MilestoneCategory::Language, description: "Combines two words", age_months: 24 },
    MilestoneDef { name: "Kicks Ball", category: MilestoneCategory::Physical, description: "Kicks ball forward", age_months: 24 },
];

/// Seed the week-offset immunization card for a baby, all entries pending.
/// Mirrors the original initialize endpoint, which inserts unconditionally.
pub fn seed_initial_vaccinations(
    storage: &Storage,
    baby: &Baby,
) -> Result<Vec<Vaccination>, StorageError> {
    let now = Utc::now();
    let mut created = Vec::with_capacity(VACCINE_SCHEDULE_WEEKS.len());
    for def in VACCINE_SCHEDULE_WEEKS {
        let vac = Vaccination {
            id: Uuid::new_v4().to_string(),
            baby: baby.id.clone(),
            parent: baby.parent.clone(),
            name: def.name.to_string(),
            description: Some(def.description.to_string()),
            recommended_age: def.age,
            scheduled_date: None,
            completed_date: None,
            status: VaccinationStatus::Pending,
            administered_by: None,
            batch_number: None,
            notes: None,
            reminder_sent: false,
            created_at: now,
            updated_at: now,
        };
        storage.put_vaccination(&vac)?;
        created.push(vac);
    }
    Ok(created)
}

/// Age a vaccine comes due, as a concrete date: birth plus the month offset.
fn due_date(birth: NaiveDate, age_months: u32) -> NaiveDate {
    birth + Months::new(age_months)
}

/// Generate the month-offset vaccination schedule and the milestone
/// schedule for a baby, skipping entries that already exist by name.
/// Past-due vaccines are marked missed; milestones the baby has already
/// reached the age for start pending instead of upcoming.
pub fn auto_generate(
    storage: &Storage,
    baby: &Baby,
    today: NaiveDate,
) -> Result<(usize, usize), StorageError> {
    let now = Utc::now();
    let age_months = baby.age_in_months_at(today);

    let mut vaccinations_created = 0;
    for def in VACCINE_SCHEDULE_MONTHS {
        if storage.vaccination_exists(&baby.id, def.name)? {
            continue;
        }
        let due = due_date(baby.date_of_birth, def.age);
        let vac = Vaccination {
            id: Uuid::new_v4().to_string(),
            baby: baby.id.clone(),
            parent: baby.parent.clone(),
            name: def.name.to_string(),
            description: Some(def.description.to_string()),
            recommended_age: ((due - baby.date_of_birth).num_days() / 7).max(0) as u32,
            scheduled_date: Some(due),
            completed_date: None,
            status: if due < today {
                VaccinationStatus::Missed
            } else {
                VaccinationStatus::Pending
            },
            administered_by: None,
            batch_number: None,
            notes: None,
            reminder_sent: false,
            created_at: now,
            updated_at: now,
        };
        storage.put_vaccination(&vac)?;
        vaccinations_created += 1;
    }

    let mut milestones_created = 0;
    for def in MILESTONE_SCHEDULE {
        if storage.milestone_exists(&baby.id, def.name)? {
            continue;
        }
        let milestone = Milestone {
            id: Uuid::new_v4().to_string(),
            baby: baby.id.clone(),
            parent: baby.parent.clone(),
            name: def.name.to_string(),
            category: def.category,
            description: Some(def.description.to_string()),
            age_in_months: def.age_months,
            status: if age_months >= def.age_months as i32 {
                MilestoneStatus::Pending
            } else {
                MilestoneStatus::Upcoming
            },
            completed_date: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        storage.put_milestone(&milestone)?;
        milestones_created += 1;
    }

    Ok((vaccinations_created, milestones_created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn baby_in(storage: &Storage, dob: NaiveDate) -> Baby {
        let now = Utc::now();
        let baby = Baby {
            id: Uuid::new_v4().to_string(),
            name: "Mira".into(),
            parent: "parent-1".into(),
            date_of_birth: dob,
            gender: Gender::Female,
            weight: None,
            height: None,
            blood_group: None,
            allergies: vec![],
            medical_conditions: vec![],
            photo: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        storage.put_baby(&baby).unwrap();
        baby
    }

    #[test]
    fn initialize_seeds_full_card() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path().to_str().unwrap()).unwrap();
        let baby = baby_in(&storage, NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());

        let created = seed_initial_vaccinations(&storage, &baby).unwrap();
        assert_eq!(created.len(), VACCINE_SCHEDULE_WEEKS.len());
        assert!(created
            .iter()
            .all(|v| v.status == VaccinationStatus::Pending));
        assert_eq!(
            storage.vaccinations_for_baby(&baby.id, "parent-1").unwrap().len(),
            VACCINE_SCHEDULE_WEEKS.len()
        );
    }

    #[test]
    fn auto_generate_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path().to_str().unwrap()).unwrap();
        let baby = baby_in(&storage, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();

        let (vacs, miles) = auto_generate(&storage, &baby, today).unwrap();
        assert_eq!(vacs, VACCINE_SCHEDULE_MONTHS.len());
        assert_eq!(miles, MILESTONE_SCHEDULE.len());

        // Second run creates nothing
        let (vacs2, miles2) = auto_generate(&storage, &baby, today).unwrap();
        assert_eq!((vacs2, miles2), (0, 0));
    }

    #[test]
    fn auto_generate_statuses_follow_due_dates() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path().to_str().unwrap()).unwrap();
        // 7-month-old: birth-dose vaccines are past due, 12-month ones are not
        let baby = baby_in(&storage, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        auto_generate(&storage, &baby, today).unwrap();

        let vacs = storage.vaccinations_for_baby(&baby.id, "parent-1").unwrap();
        let bcg = vacs.iter().find(|v| v.name == "BCG").unwrap();
        assert_eq!(bcg.status, VaccinationStatus::Missed);
        assert_eq!(bcg.scheduled_date, Some(baby.date_of_birth));

        let mmr = vacs.iter().find(|v| v.name == "MMR 1").unwrap();
        assert_eq!(mmr.status, VaccinationStatus::Pending);
        assert_eq!(
            mmr.scheduled_date,
            Some(NaiveDate::from_ymd_opt(2027, 1, 15).unwrap())
        );

        let milestones = storage.milestones_for_baby(&baby.id, "parent-1").unwrap();
        let smile = milestones.iter().find(|m| m.name == "First Smile").unwrap();
        assert_eq!(smile.status, MilestoneStatus::Pending);
        let steps = milestones.iter().find(|m| m.name == "First Steps").unwrap();
        assert_eq!(steps.status, MilestoneStatus::Upcoming);
    }
}
