use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of a member row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(i64);

impl MemberId {
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let parsed = id.trim().parse::<i64>().map_err(|e| {
            ValidationError::new(format!("Invalid member ID: {e}"))
        })?;
        Self::new(parsed)
    }

    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::new(format!(
                "Invalid member ID: {id} is not positive"
            )));
        }
        Ok(Self(id))
    }

    pub fn value_of(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<i64> for MemberId {
    fn as_ref(&self) -> &i64 {
        &self.0
    }
}

#[test]
fn test_valid_ids() {
    for valid_id in ["1", "999", " 42 "] {
        let parsed = MemberId::parse(valid_id).expect(valid_id);
        assert_eq!(
            parsed.to_string(),
            valid_id.trim(),
            "ID does not match expected value"
        );
    }
}

#[test]
fn test_invalid_ids() {
    let error = MemberId::parse("abc").expect_err("abc");
    assert_eq!(
        error.as_ref(),
        "Invalid member ID: invalid digit found in string"
    );

    let error = MemberId::parse("").expect_err("empty");
    assert_eq!(
        error.as_ref(),
        "Invalid member ID: cannot parse integer from empty string"
    );
}

#[test]
fn test_non_positive_ids() {
    for id in [0, -1] {
        let error = MemberId::new(id).expect_err("non-positive");
        assert_eq!(
            error.as_ref(),
            &format!("Invalid member ID: {id} is not positive")
        );
    }
}
