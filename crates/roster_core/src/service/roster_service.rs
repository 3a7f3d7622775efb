//! Roster use-case service.
//!
//! # Responsibility
//! - Own the ordered in-memory student list for one session.
//! - Provide CRUD, search, band filter and summary entry points.
//! - Persist the full roster after every mutation.
//!
//! # Invariants
//! - Student ids are unique; insertion order is preserved.
//! - Duplicate and missing ids are reported as failed outcomes, never `Err`.
//! - A failed save rolls the in-memory change back and returns `Err`.

use crate::model::student::{BandFilter, Student, StudentField, StudentPatch};
use crate::repo::roster_repo::{RepoResult, RosterRepository};
use crate::search::normalize::{normalize_search_text, student_matches};
use log::{debug, error, info, warn};

/// Why a mutation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `add` with an id that already exists.
    DuplicateKey,
    /// `remove`/`update` with an unknown id.
    NotFound,
}

/// Result descriptor returned by mutating calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Whether the mutation was applied and persisted.
    pub success: bool,
    /// Human-readable message for UI feedback.
    pub message: String,
    /// Set when `success` is `false`.
    pub rejection: Option<Rejection>,
}

impl ActionOutcome {
    fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            rejection: None,
        }
    }

    fn rejected(rejection: Rejection, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            rejection: Some(rejection),
        }
    }
}

/// Combined search + band query, as applied by list views.
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    /// Blank or missing keywords disable keyword matching.
    pub keyword: Option<String>,
    pub band: BandFilter,
}

/// Summary values shown next to the roster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterStats {
    pub total: usize,
    /// Rounded to two decimals; `0.0` for an empty roster.
    pub average_gpa: f64,
    pub excellent_count: usize,
}

/// Student roster bound to a persistence repository.
pub struct RosterService<R: RosterRepository> {
    repo: R,
    students: Vec<Student>,
}

impl<R: RosterRepository> RosterService<R> {
    /// Creates a service and hydrates it once from `repo`.
    ///
    /// # Errors
    /// Returns the repository error when persisted data cannot be read or
    /// decoded. Nothing is written in that case.
    pub fn open(repo: R) -> RepoResult<Self> {
        let students = repo.load_roster()?.unwrap_or_default();
        info!(
            "event=roster_load module=service status=ok count={}",
            students.len()
        );
        Ok(Self { repo, students })
    }

    /// Appends a student unless its id is already taken.
    pub fn add(&mut self, student: Student) -> RepoResult<ActionOutcome> {
        if self.position(student.id()).is_some() {
            warn!(
                "event=student_add module=service status=rejected reason=duplicate_key id={}",
                student.id()
            );
            return Ok(ActionOutcome::rejected(
                Rejection::DuplicateKey,
                format!("Student id `{}` already exists.", student.id()),
            ));
        }

        let id = student.id().to_string();
        self.students.push(student);
        if let Err(err) = self.persist("student_add") {
            self.students.pop();
            return Err(err);
        }

        info!("event=student_add module=service status=ok id={id}");
        Ok(ActionOutcome::success(format!("Student `{id}` added.")))
    }

    /// Deletes the student with `id`.
    pub fn remove(&mut self, id: &str) -> RepoResult<ActionOutcome> {
        let Some(index) = self.position(id) else {
            warn!("event=student_remove module=service status=rejected reason=not_found id={id}");
            return Ok(not_found(id));
        };

        let removed = self.students.remove(index);
        if let Err(err) = self.persist("student_remove") {
            self.students.insert(index, removed);
            return Err(err);
        }

        info!("event=student_remove module=service status=ok id={id}");
        Ok(ActionOutcome::success(format!("Student `{id}` removed.")))
    }

    /// Applies `patch` to the student with `id`.
    ///
    /// Invalid patch values are skipped without failing the call.
    pub fn update(&mut self, id: &str, patch: StudentPatch) -> RepoResult<ActionOutcome> {
        let Some(index) = self.position(id) else {
            warn!("event=student_update module=service status=rejected reason=not_found id={id}");
            return Ok(not_found(id));
        };

        let previous = self.students[index].clone();
        let rejected = self.students[index].update_fields(patch);
        if !rejected.is_empty() {
            debug!(
                "event=student_update module=service status=partial id={id} rejected_fields={}",
                join_fields(&rejected)
            );
        }

        if let Err(err) = self.persist("student_update") {
            self.students[index] = previous;
            return Err(err);
        }

        info!("event=student_update module=service status=ok id={id}");
        Ok(ActionOutcome::success(format!("Student `{id}` updated.")))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|student| student.id() == id)
    }

    /// Case- and diacritic-insensitive match on id, name and class label.
    pub fn search(&self, keyword: &str) -> Vec<&Student> {
        let needle = normalize_search_text(keyword);
        self.students
            .iter()
            .filter(|student| student_matches(student, &needle))
            .collect()
    }

    pub fn filter_by_band(&self, filter: BandFilter) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|student| filter.accepts(student.classify()))
            .collect()
    }

    /// Keyword search (when non-blank) followed by a band filter.
    pub fn list(&self, query: &StudentListQuery) -> Vec<&Student> {
        let needle = query
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(normalize_search_text);

        self.students
            .iter()
            .filter(|student| {
                needle
                    .as_deref()
                    .map_or(true, |needle| student_matches(student, needle))
            })
            .filter(|student| query.band.accepts(student.classify()))
            .collect()
    }

    /// Mean GPA rounded to two decimals, `0.0` when empty.
    pub fn average_gpa(&self) -> f64 {
        if self.students.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.students.iter().map(Student::gpa).sum();
        round_to_cents(sum / self.students.len() as f64)
    }

    pub fn count_excellent(&self) -> usize {
        self.students
            .iter()
            .filter(|student| student.is_excellent())
            .count()
    }

    pub fn stats(&self) -> RosterStats {
        RosterStats {
            total: self.students.len(),
            average_gpa: self.average_gpa(),
            excellent_count: self.count_excellent(),
        }
    }

    /// All students in insertion order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.students.iter().position(|student| student.id() == id)
    }

    fn persist(&self, event: &str) -> RepoResult<()> {
        self.repo.save_roster(&self.students).map_err(|err| {
            error!(
                "event={event} module=service status=error error_code=persist_failed error={err}"
            );
            err
        })
    }
}

fn not_found(id: &str) -> ActionOutcome {
    ActionOutcome::rejected(Rejection::NotFound, format!("Student `{id}` not found."))
}

fn join_fields(fields: &[StudentField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
