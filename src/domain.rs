use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OrthologError;
use crate::organism;

/// A FungiDB organism key such as `AfumigatusA1163`.
///
/// Parsing canonicalizes names the registry knows (`A. fumigatus A1163`
/// becomes `AfumigatusA1163`) and keeps anything else verbatim, since
/// FungiDB carries far more genomes than the static table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganismKey(String);

impl OrganismKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        organism::display_name(&self.0).is_some()
    }

    /// Value sent as the `organism` search parameter.
    pub fn api_name(&self) -> &str {
        organism::api_name(&self.0)
    }
}

impl fmt::Display for OrganismKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrganismKey {
    type Err = OrthologError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.contains(['\n', '\r', '\t']) {
            return Err(OrthologError::InvalidOrganismKey(value.to_string()));
        }
        let key = organism::resolve(trimmed).unwrap_or(trimmed);
        Ok(Self(key.to_string()))
    }
}
