use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Application status as reported by the server.
///
/// Known states drive the workflow; anything else is carried through
/// verbatim as `Other` so an unrecognized status renders instead of
/// failing. `Reviewed` appears in the display mapping only; nothing in the
/// candidate or company flow transitions into or out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
    Reviewed,
    Other(String),
}

impl ApplicationStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "accepted" => Self::Accepted,
            "rejected" => Self::Rejected,
            "reviewed" => Self::Reviewed,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Canonical wire representation. Unknown statuses keep their original
    /// spelling.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Reviewed => "reviewed",
            Self::Other(raw) => raw,
        }
    }

    /// Human-facing label. Unknown statuses pass through unchanged.
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Reviewed => "Reviewed",
            Self::Other(raw) => raw,
        }
    }

    /// Style key for the status badge.
    pub const fn display_class(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Reviewed => "reviewed",
            Self::Other(_) => "default",
        }
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl From<String> for ApplicationStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Company details embedded on a job summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub company_name: String,
}

/// Job posting details embedded on an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    pub company: CompanySummary,
}

/// Candidate details embedded on a company-side application listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// CV metadata embedded on an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvSummary {
    pub id: String,
    pub file_name: String,
}

/// A scheduled meeting tied 1:1 to an accepted application.
///
/// Created atomically by the accept transition and immutable afterwards.
/// The date and time cross the wire as `YYYY-MM-DD` and `HH:mm[:ss]`
/// without a timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: String,
    pub application_id: ApplicationId,
    pub interview_date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub interview_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One candidate's submission to one job posting.
///
/// Embedded `job`, `candidate`, and `cv` summaries are present depending on
/// which endpoint produced the record; consumers must treat them as
/// optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_id: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview: Option<Interview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<JobSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<CandidateSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv: Option<CvSummary>,
}

/// Derived acceptance state for a job's application collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AcceptanceSummary {
    pub has_accepted_candidate: bool,
    pub accepted_candidate_name: Option<String>,
}

/// Scan a job's applications for an accepted one.
///
/// This aggregate is recomputed from the collection on every fetch and is
/// never stored as independent mutable state.
pub fn acceptance_summary(applications: &[Application]) -> AcceptanceSummary {
    let accepted = applications
        .iter()
        .find(|application| application.status.is_accepted());

    AcceptanceSummary {
        has_accepted_candidate: accepted.is_some(),
        accepted_candidate_name: accepted
            .and_then(|application| application.candidate.as_ref())
            .map(|candidate| candidate.name.clone()),
    }
}

/// Serde adapter for `HH:mm[:ss]` time-of-day strings.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        let trimmed = raw.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
    }

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}
