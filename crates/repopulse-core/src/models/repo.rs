//! Repository identity and the repo detail payload

use crate::error::{CoreError, Result};
use crate::models::series::Series;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `owner/name` repository identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidRepoId {
            input: s.to_string(),
        };

        let (owner, name) = s.trim().split_once('/').ok_or_else(invalid)?;
        let valid_segment = |seg: &str| {
            !seg.is_empty() && !seg.contains('/') && !seg.chars().any(char::is_whitespace)
        };
        if !valid_segment(owner) || !valid_segment(name) {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Precomputed repository series returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoDetail {
    /// Stars gained per day
    #[serde(rename = "s", default)]
    pub stars: Series,
    /// Influence index per period
    #[serde(rename = "i", default)]
    pub influence: Series,
}
