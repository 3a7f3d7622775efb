//! Roster snapshot repository.
//!
//! # Responsibility
//! - Serialize the ordered student list into one slot and read it back.
//! - Surface persistence failures as typed errors.
//!
//! # Invariants
//! - The slot holds a JSON array of flat student objects.
//! - Order is preserved across save/load.
//! - An absent slot means "no prior data", not an error.

use crate::db::DbError;
use crate::model::student::Student;
use crate::repo::slot_store::SlotStore;
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default slot key for the student roster.
pub const DEFAULT_SLOT_KEY: &str = "student_roster";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for slot access and roster encoding.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Roster could not be encoded.
    Serialization(serde_json::Error),
    /// JSON has no NaN or infinity; such a GPA would reload as `null`.
    NonFiniteGpa { id: String },
    /// Persisted slot content is not a valid roster document.
    InvalidData(String),
    /// Connection was opened without running migrations.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to encode roster: {err}"),
            Self::NonFiniteGpa { id } => {
                write!(f, "student `{id}` has a non-finite GPA and cannot be stored")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted roster data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Load/save contract used by the roster service.
pub trait RosterRepository {
    /// Returns `None` when nothing has been saved yet.
    fn load_roster(&self) -> RepoResult<Option<Vec<Student>>>;
    fn save_roster(&self, students: &[Student]) -> RepoResult<()>;
}

/// Roster repository storing JSON in one slot of a [`SlotStore`].
pub struct SlotRosterRepository<S: SlotStore> {
    store: S,
    key: String,
}

impl<S: SlotStore> SlotRosterRepository<S> {
    /// Uses [`DEFAULT_SLOT_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_SLOT_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

}

impl<S: SlotStore> RosterRepository for SlotRosterRepository<S> {
    fn load_roster(&self) -> RepoResult<Option<Vec<Student>>> {
        let Some(raw) = self.store.read_slot(&self.key)? else {
            debug!("event=roster_read module=repo status=empty key={}", self.key);
            return Ok(None);
        };

        decode_roster(&raw).map(Some).map_err(|err| {
            error!(
                "event=roster_read module=repo status=error key={} error_code=invalid_data",
                self.key
            );
            err
        })
    }

    fn save_roster(&self, students: &[Student]) -> RepoResult<()> {
        let encoded = encode_roster(students)?;
        self.store.write_slot(&self.key, &encoded)?;
        debug!(
            "event=roster_write module=repo status=ok key={} count={} bytes={}",
            self.key,
            students.len(),
            encoded.len()
        );
        Ok(())
    }
}

/// Encodes students as the persisted JSON array.
///
/// # Errors
/// - `NonFiniteGpa` for the first student whose GPA is NaN or infinite.
pub fn encode_roster(students: &[Student]) -> RepoResult<String> {
    if let Some(student) = students.iter().find(|student| !student.gpa().is_finite()) {
        return Err(RepoError::NonFiniteGpa {
            id: student.id().to_string(),
        });
    }
    serde_json::to_string(students).map_err(RepoError::Serialization)
}

/// Decodes the persisted JSON array.
pub fn decode_roster(raw: &str) -> RepoResult<Vec<Student>> {
    serde_json::from_str(raw).map_err(|err| RepoError::InvalidData(err.to_string()))
}
