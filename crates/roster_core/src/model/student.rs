//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical student record persisted by the roster.
//! - Apply field assignments through validating setters.
//! - Derive the GPA band used by filters and badges.
//!
//! # Invariants
//! - Setters never leave a field in an invalid state: an empty string or an
//!   out-of-range GPA is ignored and the prior value is kept.
//! - Construction does not validate; imported values are accepted as-is.
//! - The wire shape is exactly `id`, `name`, `birthDate`, `classLabel`, `gpa`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Inclusive lower bound of a valid GPA.
pub const GPA_MIN: f64 = 0.0;
/// Inclusive upper bound of a valid GPA.
pub const GPA_MAX: f64 = 4.0;

const EXCELLENT_THRESHOLD: f64 = 3.6;
const GOOD_THRESHOLD: f64 = 3.2;
const AVERAGE_THRESHOLD: f64 = 2.5;

/// GPA-derived classification tier, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpaBand {
    /// `gpa >= 3.6`
    Excellent,
    /// `3.2 <= gpa < 3.6`
    Good,
    /// `2.5 <= gpa < 3.2`
    Average,
    /// `gpa < 2.5`
    BelowAverage,
}

impl GpaBand {
    /// Classifies a GPA value. Lower band edges are inclusive.
    pub fn from_gpa(gpa: f64) -> Self {
        if gpa >= EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if gpa >= GOOD_THRESHOLD {
            Self::Good
        } else if gpa >= AVERAGE_THRESHOLD {
            Self::Average
        } else {
            Self::BelowAverage
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::BelowAverage => "Below-average",
        }
    }

    /// Short token shared with the [`BandFilter`] vocabulary.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::BelowAverage => "below",
        }
    }

    /// Style hook for renderers that draw a colored badge per band.
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Excellent => "gpa-excellent",
            Self::Good => "gpa-good",
            Self::Average => "gpa-average",
            Self::BelowAverage => "gpa-below",
        }
    }
}

impl Display for GpaBand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Band selector accepted by roster filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BandFilter {
    Excellent,
    Good,
    Average,
    Below,
    /// No filtering.
    #[default]
    All,
}

impl BandFilter {
    /// Returns whether a band passes this filter.
    pub fn accepts(self, band: GpaBand) -> bool {
        match self {
            Self::All => true,
            Self::Excellent => band == GpaBand::Excellent,
            Self::Good => band == GpaBand::Good,
            Self::Average => band == GpaBand::Average,
            Self::Below => band == GpaBand::BelowAverage,
        }
    }
}

/// Error returned when a band filter token is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBandFilter(pub String);

impl Display for UnknownBandFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown band filter `{}`; expected excellent|good|average|below|all",
            self.0
        )
    }
}

impl std::error::Error for UnknownBandFilter {}

impl FromStr for BandFilter {
    type Err = UnknownBandFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "average" => Ok(Self::Average),
            "below" => Ok(Self::Below),
            "all" => Ok(Self::All),
            other => Err(UnknownBandFilter(other.to_string())),
        }
    }
}

/// Field names reported when an update value is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Name,
    BirthDate,
    ClassLabel,
    Gpa,
}

impl StudentField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::BirthDate => "birth_date",
            Self::ClassLabel => "class_label",
            Self::Gpa => "gpa",
        }
    }
}

/// Partial update applied by [`Student::update_fields`].
///
/// `None` leaves a field unchanged. Empty strings are treated the same as
/// `None`. For `gpa`, `Some(0.0)` is a real update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub class_label: Option<String>,
    pub gpa: Option<f64>,
}

/// Canonical student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Student {
    id: String,
    name: String,
    birth_date: NaiveDate,
    class_label: String,
    gpa: f64,
}

impl Student {
    /// Creates a record from raw values without validation.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        birth_date: NaiveDate,
        class_label: impl Into<String>,
        gpa: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth_date,
            class_label: class_label.into(),
            gpa,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn class_label(&self) -> &str {
        &self.class_label
    }

    pub fn gpa(&self) -> f64 {
        self.gpa
    }

    /// Sets the id when the trimmed value is non-empty.
    pub fn set_id(&mut self, value: &str) -> bool {
        assign_trimmed(&mut self.id, value)
    }

    /// Sets the full name when the trimmed value is non-empty.
    pub fn set_name(&mut self, value: &str) -> bool {
        assign_trimmed(&mut self.name, value)
    }

    pub fn set_birth_date(&mut self, value: NaiveDate) -> bool {
        self.birth_date = value;
        true
    }

    /// Sets the class label when the trimmed value is non-empty.
    pub fn set_class_label(&mut self, value: &str) -> bool {
        assign_trimmed(&mut self.class_label, value)
    }

    /// Sets the GPA when it is a number inside `[0, 4]`.
    pub fn set_gpa(&mut self, value: f64) -> bool {
        if !is_valid_gpa(value) {
            return false;
        }
        self.gpa = value;
        true
    }

    /// Parses GPA text (form input) and applies it through [`Self::set_gpa`].
    pub fn set_gpa_text(&mut self, value: &str) -> bool {
        match value.trim().parse::<f64>() {
            Ok(parsed) => self.set_gpa(parsed),
            Err(_) => false,
        }
    }

    /// Applies every provided patch field through its validating setter.
    ///
    /// Returns the fields whose provided value was rejected. Omitted fields
    /// and empty strings are never reported.
    pub fn update_fields(&mut self, patch: StudentPatch) -> Vec<StudentField> {
        let mut rejected = Vec::new();

        if let Some(name) = patch.name.as_deref().filter(|value| !value.is_empty()) {
            if !self.set_name(name) {
                rejected.push(StudentField::Name);
            }
        }
        if let Some(birth_date) = patch.birth_date {
            self.set_birth_date(birth_date);
        }
        if let Some(class_label) = patch.class_label.as_deref().filter(|value| !value.is_empty())
        {
            if !self.set_class_label(class_label) {
                rejected.push(StudentField::ClassLabel);
            }
        }
        if let Some(gpa) = patch.gpa {
            if !self.set_gpa(gpa) {
                rejected.push(StudentField::Gpa);
            }
        }

        rejected
    }

    /// Returns the GPA band of this record.
    pub fn classify(&self) -> GpaBand {
        GpaBand::from_gpa(self.gpa)
    }

    /// Whether the record counts towards the excellent summary.
    pub fn is_excellent(&self) -> bool {
        self.classify() == GpaBand::Excellent
    }

    /// Day-first date rendering, e.g. `05/09/2003`.
    pub fn formatted_birth_date(&self) -> String {
        self.birth_date.format("%d/%m/%Y").to_string()
    }

    /// Two-decimal GPA rendering, e.g. `3.80`.
    pub fn formatted_gpa(&self) -> String {
        format!("{:.2}", self.gpa)
    }
}

/// Returns whether `value` is an assignable GPA.
pub fn is_valid_gpa(value: f64) -> bool {
    !value.is_nan() && (GPA_MIN..=GPA_MAX).contains(&value)
}

fn assign_trimmed(slot: &mut String, value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    *slot = trimmed.to_string();
    true
}

#[cfg(test)]
mod tests {
    use super::{assign_trimmed, is_valid_gpa};

    #[test]
    fn assign_trimmed_keeps_prior_value_for_blank_input() {
        let mut slot = "kept".to_string();
        assert!(!assign_trimmed(&mut slot, "   \t"));
        assert_eq!(slot, "kept");

        assert!(assign_trimmed(&mut slot, "  next "));
        assert_eq!(slot, "next");
    }

    #[test]
    fn gpa_bounds_are_inclusive() {
        assert!(is_valid_gpa(0.0));
        assert!(is_valid_gpa(4.0));
        assert!(!is_valid_gpa(-0.01));
        assert!(!is_valid_gpa(4.01));
        assert!(!is_valid_gpa(f64::NAN));
        assert!(!is_valid_gpa(f64::INFINITY));
    }
}
