//! Organizational vocabulary shared across layers.

use serde::{Deserialize, Serialize};

/// Closed set of department kinds an organization operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepartmentType {
    /// School of Technology
    Sot,
    /// School of Management
    Som,
    /// School of Healthcare
    Soh,
}

impl DepartmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepartmentType::Sot => "SOT",
            DepartmentType::Som => "SOM",
            DepartmentType::Soh => "SOH",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown department type: {0}")]
pub struct ParseDepartmentTypeError(String);

impl std::str::FromStr for DepartmentType {
    type Err = ParseDepartmentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SOT" => Ok(DepartmentType::Sot),
            "SOM" => Ok(DepartmentType::Som),
            "SOH" => Ok(DepartmentType::Soh),
            other => Err(ParseDepartmentTypeError(other.to_string())),
        }
    }
}

impl std::fmt::Display for DepartmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
