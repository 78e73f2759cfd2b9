//! Static error catalog shared by all propdesk crates.
//!
//! Each crate maps its own error enum onto one of these definitions in its
//! `problem_mapping` module, so status codes and codes live in one place.

use crate::problem::Problem;
use http::StatusCode;

const TYPE_BASE: &str = "https://errors.propdesk.dev/";

/// Static error definition from the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
}

impl ErrDef {
    /// Convert this definition into a [`Problem`] with the given detail.
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Problem::new(status, self.title, detail)
            .with_code(self.code)
            .with_type(format!("{TYPE_BASE}{}", self.code))
    }
}

pub const SCHEMA_NOT_FOUND: ErrDef = ErrDef {
    status: 500,
    title: "Schema Not Found",
    code: "propdesk.schema.not_found",
};

pub const SCHEMA_INVALID: ErrDef = ErrDef {
    status: 500,
    title: "Invalid Schema",
    code: "propdesk.schema.invalid",
};

pub const INVALID_SORT_KEY: ErrDef = ErrDef {
    status: 406,
    title: "Invalid Sort Key",
    code: "propdesk.query.invalid_sort_key",
};

pub const SORT_TOO_DEEP: ErrDef = ErrDef {
    status: 406,
    title: "Sort Too Deep",
    code: "propdesk.query.sort_too_deep",
};

pub const ACTOR_UNRESOLVED: ErrDef = ErrDef {
    status: 401,
    title: "Unauthorized",
    code: "propdesk.auth.actor_unresolved",
};

pub const FORBIDDEN: ErrDef = ErrDef {
    status: 403,
    title: "Forbidden",
    code: "propdesk.auth.forbidden",
};

pub const INTERNAL: ErrDef = ErrDef {
    status: 500,
    title: "Internal Server Error",
    code: "propdesk.internal",
};

/// Every catalog entry, in declaration order.
pub const ALL: &[ErrDef] = &[
    SCHEMA_NOT_FOUND,
    SCHEMA_INVALID,
    INVALID_SORT_KEY,
    SORT_TOO_DEEP,
    ACTOR_UNRESOLVED,
    FORBIDDEN,
    INTERNAL,
];

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn err_def_to_problem() {
        let problem = SORT_TOO_DEEP.as_problem("max depth is 2");
        assert_eq!(problem.status, StatusCode::NOT_ACCEPTABLE);
        assert_eq!(problem.title, "Sort Too Deep");
        assert_eq!(problem.detail, "max depth is 2");
        assert_eq!(problem.code, "propdesk.query.sort_too_deep");
        assert_eq!(
            problem.type_url,
            "https://errors.propdesk.dev/propdesk.query.sort_too_deep"
        );
    }

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = ALL.iter().map(|d| d.code).collect();
        assert_eq!(codes.len(), ALL.len());
    }

    #[test]
    fn statuses_are_valid() {
        for def in ALL {
            assert!(StatusCode::from_u16(def.status).is_ok(), "{}", def.code);
        }
    }
}
