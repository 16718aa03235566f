//! Seed script for CareNest.
//!
//! Populates the store with a demo account, a baby profile, a day of
//! feeding/sleep logs, and the generated vaccination/milestone schedules.
//! Run: cargo run --bin seed_data

use chrono::{Duration, Months, Utc};
use uuid::Uuid;

use carenest::auth::hash_password;
use carenest::models::{
    Baby, FeedingKind, FeedingLog, Gender, Role, SleepLog, SleepQuality, User,
};
use carenest::schedule;
use carenest::storage::{Storage, StorageError};

const DEMO_EMAIL: &str = "demo@carenest.app";
const DEMO_PASSWORD: &str = "demo1234";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path =
        std::env::var("CARENEST_DB_PATH").unwrap_or_else(|_| "carenest_data".to_string());
    let storage = Storage::open(&db_path)?;

    let now = Utc::now();
    let today = now.date_naive();

    let user = User {
        id: Uuid::new_v4().to_string(),
        name: "Demo Parent".to_string(),
        email: DEMO_EMAIL.to_string(),
        password_hash: hash_password(DEMO_PASSWORD)?,
        phone: None,
        date_of_birth: None,
        address: None,
        city: None,
        role: Role::Parent,
        care_mode: Some(carenest::models::CareMode::BabyCare),
        expected_due_date: None,
        last_period_date: None,
        cycle_length: 28,
        period_duration: 5,
        created_at: now,
        updated_at: now,
    };

    let parent_id = match storage.create_user(&user) {
        Ok(()) => user.id.clone(),
        Err(StorageError::EmailTaken) => {
            println!("Demo account already exists, reusing it");
            storage
                .get_user_by_email(DEMO_EMAIL)?
                .map(|u| u.id)
                .ok_or("email index points at a missing user")?
        }
        Err(e) => return Err(e.into()),
    };

    let baby = Baby {
        id: Uuid::new_v4().to_string(),
        name: "Aarav".to_string(),
        parent: parent_id.clone(),
        date_of_birth: today
            .checked_sub_months(Months::new(4))
            .ok_or("birth date out of range")?,
        gender: Gender::Male,
        weight: Some(6.4),
        height: Some(62.0),
        blood_group: Some("O+".to_string()),
        allergies: vec![],
        medical_conditions: vec![],
        photo: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    storage.put_baby(&baby)?;
    println!("Created baby {} ({})", baby.name, baby.id);

    // One day of feedings, every three hours from 06:00
    for (i, kind) in [
        FeedingKind::Breast,
        FeedingKind::Formula,
        FeedingKind::Breast,
        FeedingKind::Formula,
        FeedingKind::Breast,
    ]
    .into_iter()
    .enumerate()
    {
        let time = now - Duration::hours(15 - 3 * i as i64);
        let log = FeedingLog {
            id: Uuid::new_v4().to_string(),
            baby: baby.id.clone(),
            parent: parent_id.clone(),
            kind,
            time,
            quantity: matches!(kind, FeedingKind::Formula).then_some(120.0),
            duration: matches!(kind, FeedingKind::Breast).then_some(20),
            notes: None,
            created_at: now,
            updated_at: now,
        };
        storage.put_feeding_log(&log)?;
    }
    println!("Logged 5 feedings");

    // A night sleep and two naps
    for (start_offset_hours, length_hours, quality) in [
        (14, 6, SleepQuality::Good),
        (6, 1, SleepQuality::Fair),
        (3, 2, SleepQuality::Excellent),
    ] {
        let start = now - Duration::hours(start_offset_hours);
        let mut log = SleepLog {
            id: Uuid::new_v4().to_string(),
            baby: baby.id.clone(),
            parent: parent_id.clone(),
            start_time: start,
            end_time: Some(start + Duration::hours(length_hours)),
            duration: None,
            quality: Some(quality),
            notes: None,
            created_at: now,
            updated_at: now,
        };
        log.derive_duration();
        storage.put_sleep_log(&log)?;
    }
    println!("Logged 3 sleep sessions");

    let (vaccinations, milestones) = schedule::auto_generate(&storage, &baby, today)?;
    println!(
        "Generated {} vaccinations and {} milestones",
        vaccinations, milestones
    );

    println!("Done. Log in with {DEMO_EMAIL} / {DEMO_PASSWORD}");
    Ok(())
}
