//! Story-point estimates.

use std::borrow::Cow;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A story-point estimate from the fixed Fibonacci-like scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StoryPoints(u32);

impl StoryPoints {
    /// Every estimate the board accepts.
    pub const SCALE: [u32; 7] = [1, 2, 3, 5, 8, 13, 21];

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `value` is not on [`Self::SCALE`].
    pub fn new(value: u32) -> Result<Self, CoreError> {
        if Self::SCALE.contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::Validation(format!(
                "story points must be one of {:?}, got {value}",
                Self::SCALE
            )))
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for StoryPoints {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u32> for StoryPoints {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StoryPoints> for u32 {
    fn from(points: StoryPoints) -> Self {
        points.0
    }
}

impl fmt::Display for StoryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl JsonSchema for StoryPoints {
    fn schema_name() -> Cow<'static, str> {
        "StoryPoints".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "integer",
            "enum": [1, 2, 3, 5, 8, 13, 21]
        })
    }
}
