use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What an actor wants to do with a subject.
///
/// `Manage` is the wildcard action: a grant for `Manage` covers every action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Manage,
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    /// True if a grant for `self` allows `requested`.
    #[must_use]
    pub fn covers(self, requested: Action) -> bool {
        self == Action::Manage || self == requested
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Manage => "manage",
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manage" => Ok(Action::Manage),
            "create" => Ok(Action::Create),
            "read" => Ok(Action::Read),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            other => Err(format!("unknown action '{other}'")),
        }
    }
}

/// Well-known subject type names.
pub mod subjects {
    /// Matches every subject type.
    pub const ALL: &str = "all";

    pub const PROPERTY_CONTACT: &str = "PropertyContact";
    pub const CONTRACT: &str = "Contract";
    pub const SERVICE: &str = "Service";
    pub const CATEGORY: &str = "Category";
    pub const COUNTY: &str = "County";
    pub const COUNTRY: &str = "Country";
    pub const TENANT: &str = "Tenant";
    pub const STORAGE: &str = "Storage";
    pub const USER: &str = "User";

    /// Subjects whose rows carry a `tenantId` column.
    pub const TENANT_OWNED: &[&str] = &[PROPERTY_CONTACT, CONTRACT, SERVICE, STORAGE];

    /// Shared lookup data every authenticated actor may read.
    pub const REFERENCE_DATA: &[&str] = &[COUNTRY, COUNTY, CATEGORY];
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn manage_covers_everything() {
        for action in [
            Action::Manage,
            Action::Create,
            Action::Read,
            Action::Update,
            Action::Delete,
        ] {
            assert!(Action::Manage.covers(action));
        }
        assert!(Action::Read.covers(Action::Read));
        assert!(!Action::Read.covers(Action::Update));
        assert!(!Action::Read.covers(Action::Manage));
    }

    #[test]
    fn parses_any_case() {
        assert_eq!("Update".parse::<Action>(), Ok(Action::Update));
        assert!("approve".parse::<Action>().is_err());
    }
}
