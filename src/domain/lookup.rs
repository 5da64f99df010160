use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row of the `employment_statuses` lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentStatus {
    pub id: i64,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Row of the `statuses` lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub id: i64,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
