use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use sled::{Db, Tree};
use thiserror::Error;

use crate::models::{Baby, FeedingLog, Milestone, SleepLog, User, Vaccination};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("email already registered")]
    EmailTaken,
    #[error("document not found")]
    NotFound,
}

/// Unified document store over Sled. One tree per collection, documents
/// serialized as JSON by id, plus an email index for unique user lookup.
#[derive(Clone)]
pub struct Storage {
    #[allow(dead_code)] // kept for flush/close on shutdown
    db: Db,
    users: Tree,
    users_by_email: Tree, // lowercased email -> user id
    babies: Tree,
    feeding_logs: Tree,
    sleep_logs: Tree,
    vaccinations: Tree,
    milestones: Tree,
}

impl Storage {
    /// Open or create the Sled database at the given path and its
    /// per-collection trees.
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Ok(Self {
            users: db.open_tree("users")?,
            users_by_email: db.open_tree("users_by_email")?,
            babies: db.open_tree("babies")?,
            feeding_logs: db.open_tree("feeding_logs")?,
            sleep_logs: db.open_tree("sleep_logs")?,
            vaccinations: db.open_tree("vaccinations")?,
            milestones: db.open_tree("milestones")?,
            db,
        })
    }

    fn put<T: Serialize>(tree: &Tree, id: &str, doc: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(doc)?;
        tree.insert(id.as_bytes(), bytes)?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(tree: &Tree, id: &str) -> Result<Option<T>, StorageError> {
        match tree.get(id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Full scan of a tree with a filter. Collections here are per-family
    /// sized; scans stand in for the original's indexed queries.
    fn scan<T, F>(tree: &Tree, mut keep: F) -> Result<Vec<T>, StorageError>
    where
        T: DeserializeOwned,
        F: FnMut(&T) -> bool,
    {
        let mut out = Vec::new();
        for item in tree.iter() {
            let (_, bytes) = item?;
            let doc: T = serde_json::from_slice(&bytes)?;
            if keep(&doc) {
                out.push(doc);
            }
        }
        Ok(out)
    }

    // --- Users ---

    /// Create a user; fails when the (lowercased) email is already indexed.
    pub fn create_user(&self, user: &User) -> Result<(), StorageError> {
        let email_key = user.email.to_lowercase();
        if self.users_by_email.contains_key(email_key.as_bytes())? {
            return Err(StorageError::EmailTaken);
        }
        Self::put(&self.users, &user.id, user)?;
        self.users_by_email
            .insert(email_key.as_bytes(), user.id.as_bytes())?;
        Ok(())
    }

    pub fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        Self::get(&self.users, id)
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        match self.users_by_email.get(email.to_lowercase().as_bytes())? {
            Some(id_bytes) => {
                let id = String::from_utf8_lossy(&id_bytes).to_string();
                self.get_user(&id)
            }
            None => Ok(None),
        }
    }

    /// Upsert an existing user document. Email is immutable, so the index
    /// never needs rewriting.
    pub fn update_user(&self, user: &User) -> Result<(), StorageError> {
        Self::put(&self.users, &user.id, user)
    }

    // --- Babies ---

    pub fn put_baby(&self, baby: &Baby) -> Result<(), StorageError> {
        Self::put(&self.babies, &baby.id, baby)
    }

    /// Active babies owned by a parent.
    pub fn babies_for_parent(&self, parent: &str) -> Result<Vec<Baby>, StorageError> {
        Self::scan(&self.babies, |b: &Baby| b.parent == parent && b.is_active)
    }

    /// Ownership-scoped fetch; `None` both for missing ids and other
    /// parents' babies.
    pub fn get_baby_owned(&self, id: &str, parent: &str) -> Result<Option<Baby>, StorageError> {
        Ok(Self::get::<Baby>(&self.babies, id)?.filter(|b| b.parent == parent))
    }

    // --- Feeding logs ---

    pub fn put_feeding_log(&self, log: &FeedingLog) -> Result<(), StorageError> {
        Self::put(&self.feeding_logs, &log.id, log)
    }

    pub fn get_feeding_log_owned(
        &self,
        id: &str,
        parent: &str,
    ) -> Result<Option<FeedingLog>, StorageError> {
        Ok(Self::get::<FeedingLog>(&self.feeding_logs, id)?.filter(|l| l.parent == parent))
    }

    pub fn delete_feeding_log(&self, id: &str, parent: &str) -> Result<bool, StorageError> {
        if self.get_feeding_log_owned(id, parent)?.is_none() {
            return Ok(false);
        }
        self.feeding_logs.remove(id.as_bytes())?;
        Ok(true)
    }

    /// Feeding logs for a baby, optionally bounded by a time range,
    /// newest first.
    pub fn feeding_logs_in_range(
        &self,
        baby: &str,
        parent: &str,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<FeedingLog>, StorageError> {
        let mut logs = Self::scan(&self.feeding_logs, |l: &FeedingLog| {
            l.baby == baby
                && l.parent == parent
                && range.map_or(true, |(start, end)| l.time >= start && l.time <= end)
        })?;
        logs.sort_by(|a, b| b.time.cmp(&a.time));
        Ok(logs)
    }

    // --- Sleep logs ---

    pub fn put_sleep_log(&self, log: &SleepLog) -> Result<(), StorageError> {
        Self::put(&self.sleep_logs, &log.id, log)
    }

    pub fn get_sleep_log_owned(
        &self,
        id: &str,
        parent: &str,
    ) -> Result<Option<SleepLog>, StorageError> {
        Ok(Self::get::<SleepLog>(&self.sleep_logs, id)?.filter(|l| l.parent == parent))
    }

    pub fn delete_sleep_log(&self, id: &str, parent: &str) -> Result<bool, StorageError> {
        if self.get_sleep_log_owned(id, parent)?.is_none() {
            return Ok(false);
        }
        self.sleep_logs.remove(id.as_bytes())?;
        Ok(true)
    }

    /// Sleep logs for a baby bounded on start_time, newest first.
    pub fn sleep_logs_in_range(
        &self,
        baby: &str,
        parent: &str,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<SleepLog>, StorageError> {
        let mut logs = Self::scan(&self.sleep_logs, |l: &SleepLog| {
            l.baby == baby
                && l.parent == parent
                && range.map_or(true, |(start, end)| {
                    l.start_time >= start && l.start_time <= end
                })
        })?;
        logs.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(logs)
    }

    // --- Vaccinations ---

    pub fn put_vaccination(&self, vac: &Vaccination) -> Result<(), StorageError> {
        Self::put(&self.vaccinations, &vac.id, vac)
    }

    pub fn get_vaccination_owned(
        &self,
        id: &str,
        parent: &str,
    ) -> Result<Option<Vaccination>, StorageError> {
        Ok(Self::get::<Vaccination>(&self.vaccinations, id)?.filter(|v| v.parent == parent))
    }

    pub fn vaccinations_for_baby(
        &self,
        baby: &str,
        parent: &str,
    ) -> Result<Vec<Vaccination>, StorageError> {
        Self::scan(&self.vaccinations, |v: &Vaccination| {
            v.baby == baby && v.parent == parent
        })
    }

    /// Natural-key check used by the schedule generators.
    pub fn vaccination_exists(&self, baby: &str, name: &str) -> Result<bool, StorageError> {
        Ok(!Self::scan(&self.vaccinations, |v: &Vaccination| {
            v.baby == baby && v.name == name
        })?
        .is_empty())
    }

    // --- Milestones ---

    pub fn put_milestone(&self, milestone: &Milestone) -> Result<(), StorageError> {
        Self::put(&self.milestones, &milestone.id, milestone)
    }

    pub fn get_milestone_owned(
        &self,
        id: &str,
        parent: &str,
    ) -> Result<Option<Milestone>, StorageError> {
        Ok(Self::get::<Milestone>(&self.milestones, id)?.filter(|m| m.parent == parent))
    }

    pub fn milestones_for_baby(
        &self,
        baby: &str,
        parent: &str,
    ) -> Result<Vec<Milestone>, StorageError> {
        Self::scan(&self.milestones, |m: &Milestone| {
            m.baby == baby && m.parent == parent
        })
    }

    pub fn milestone_exists(&self, baby: &str, name: &str) -> Result<bool, StorageError> {
        Ok(!Self::scan(&self.milestones, |m: &Milestone| {
            m.baby == baby && m.name == name
        })?
        .is_empty())
    }
}
