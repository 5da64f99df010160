use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{EmploymentStatus, MemberId, Status};

/// A member as supplied by the caller, before the store has assigned an
/// identifier or timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_tenure", skip_on_field_errors = false))]
pub struct NewMember {
    pub no: String,
    pub profile_img: String,
    pub full_name: String,
    pub kana_name: String,
    pub motto: String,
    pub biography: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub employment_status_id: i64,
    pub status_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub no: String,
    pub profile_img: String,
    pub full_name: String,
    pub kana_name: String,
    pub motto: String,
    pub biography: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub employment_status_id: i64,
    pub status_id: i64,
    pub employment_status: Option<EmploymentStatus>,
    pub status: Option<Status>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Builds the persisted form of `member`. Associations are left
    /// unhydrated.
    pub fn from_new(
        id: MemberId,
        member: NewMember,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            no: member.no,
            profile_img: member.profile_img,
            full_name: member.full_name,
            kana_name: member.kana_name,
            motto: member.motto,
            biography: member.biography,
            start_date: member.start_date,
            end_date: member.end_date,
            employment_status_id: member.employment_status_id,
            status_id: member.status_id,
            employment_status: None,
            status: None,
            created_at,
            updated_at,
        }
    }

    /// The caller-supplied part of this member.
    pub fn details(&self) -> NewMember {
        NewMember {
            no: self.no.clone(),
            profile_img: self.profile_img.clone(),
            full_name: self.full_name.clone(),
            kana_name: self.kana_name.clone(),
            motto: self.motto.clone(),
            biography: self.biography.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            employment_status_id: self.employment_status_id,
            status_id: self.status_id,
        }
    }
}

fn validate_tenure(
    member: &NewMember,
) -> Result<(), validator::ValidationError> {
    match member.end_date {
        Some(end_date) if end_date < member.start_date => Err(
            validator::ValidationError::new("end_date_before_start_date"),
        ),
        _ => Ok(()),
    }
}
