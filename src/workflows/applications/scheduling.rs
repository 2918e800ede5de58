use chrono::NaiveDate;
use serde::Serialize;

use super::domain::time_of_day;
use crate::api::AcceptApplicationRequest;

pub const DATE_REQUIRED: &str = "Interview date is required";
pub const DATE_NOT_FUTURE: &str = "Interview date must be in the future";
pub const DATE_INVALID: &str = "Interview date must be a valid YYYY-MM-DD date";
pub const TIME_REQUIRED: &str = "Please provide interview time";
pub const TIME_INVALID: &str = "Interview time must be a valid HH:mm time";

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleField {
    InterviewDate,
    InterviewTime,
}

/// Field-scoped validation failures. Any entry blocks submission entirely;
/// nothing is sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleValidationErrors {
    entries: Vec<(ScheduleField, &'static str)>,
}

impl ScheduleValidationErrors {
    fn push(&mut self, field: ScheduleField, message: &'static str) {
        self.entries.push((field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(ScheduleField, &'static str)] {
        &self.entries
    }

    pub fn message_for(&self, field: ScheduleField) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == field)
            .map(|(_, message)| *message)
    }
}

/// First selectable interview day: strictly after today.
pub fn earliest_interview_date(today: NaiveDate) -> NaiveDate {
    today.succ_opt().unwrap_or(today)
}

/// Raw interview-scheduling form state, field-for-field what the user typed.
///
/// The form survives a failed submission: field values and the top-level
/// error stay in place so the user corrects and resubmits without
/// re-entering already-valid fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterviewForm {
    pub interview_date: String,
    pub interview_time: String,
    pub location: String,
    pub notes: String,
    /// Single top-level error from the last failed submission.
    pub submit_error: Option<String>,
}

impl InterviewForm {
    pub fn new(
        interview_date: impl Into<String>,
        interview_time: impl Into<String>,
        location: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            interview_date: interview_date.into(),
            interview_time: interview_time.into(),
            location: location.into(),
            notes: notes.into(),
            submit_error: None,
        }
    }

    /// Validate the form against the current calendar day.
    ///
    /// The date must be strictly later than `today`, compared at the
    /// midnight boundary: today itself is rejected, tomorrow is the first
    /// acceptable day. Location and notes are trimmed, with
    /// empty-after-trim submitted as unset rather than empty string.
    pub fn validate(
        &self,
        today: NaiveDate,
    ) -> Result<AcceptApplicationRequest, ScheduleValidationErrors> {
        let mut errors = ScheduleValidationErrors::default();

        let date = match self.interview_date.trim() {
            "" => {
                errors.push(ScheduleField::InterviewDate, DATE_REQUIRED);
                None
            }
            raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(parsed) if parsed <= today => {
                    errors.push(ScheduleField::InterviewDate, DATE_NOT_FUTURE);
                    None
                }
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    errors.push(ScheduleField::InterviewDate, DATE_INVALID);
                    None
                }
            },
        };

        let time = match self.interview_time.trim() {
            "" => {
                errors.push(ScheduleField::InterviewTime, TIME_REQUIRED);
                None
            }
            raw => match time_of_day::parse(raw) {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    errors.push(ScheduleField::InterviewTime, TIME_INVALID);
                    None
                }
            },
        };

        match (date, time) {
            (Some(interview_date), Some(interview_time)) if errors.is_empty() => {
                Ok(AcceptApplicationRequest {
                    interview_date,
                    interview_time,
                    location: trimmed_or_none(&self.location),
                    notes: trimmed_or_none(&self.notes),
                })
            }
            _ => Err(errors),
        }
    }

    /// Clear all fields and the submit error, as when the form closes after
    /// a successful submission.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn trimmed_or_none(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
