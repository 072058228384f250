//! User [`Role`] definitions and access resolution.

pub mod access;
pub mod path;
pub mod session;

use std::str::FromStr as _;

use common::define_kind;
use serde::{Deserialize, Serialize};

pub use self::{
    access::{Access, Denial},
    session::{extract_role, Claims, Token},
};

define_kind! {
    #[doc = "Role of a platform user."]
    #[case = "lowercase"]
    #[derive(Deserialize, Ord, PartialOrd, Serialize)]
    #[serde(rename_all = "lowercase")]
    enum Role {
        #[doc = "Customer booking venues."]
        User = 1,

        #[doc = "Owner managing own venues."]
        TurfAdmin = 2,

        #[doc = "Platform administrator moderating venues and users."]
        Admin = 3,

        #[doc = "Administrator of administrators."]
        SuperAdmin = 4,
    }
}

/// [`Role`]s each [`Role`] may act as, itself included.
static HIERARCHY: [(Role, &[Role]); 4] = [
    (Role::User, &[Role::User]),
    (Role::TurfAdmin, &[Role::TurfAdmin, Role::User]),
    (Role::Admin, &[Role::Admin, Role::TurfAdmin, Role::User]),
    (
        Role::SuperAdmin,
        &[Role::SuperAdmin, Role::Admin, Role::TurfAdmin, Role::User],
    ),
];

impl Role {
    /// Returns the [`Role`]s this [`Role`] may act as, itself included.
    #[must_use]
    pub fn includes(self) -> &'static [Self] {
        HIERARCHY
            .iter()
            .find_map(|(role, roles)| (*role == self).then_some(*roles))
            .unwrap_or(&[])
    }

    /// Indicates whether this [`Role`] may act as the `other` one.
    #[must_use]
    pub fn can_act_as(self, other: Self) -> bool {
        self.includes().contains(&other)
    }
}

/// Way of matching a user [`Role`] against the required ones.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Matching {
    /// A [`Role`] matches any [`Role`] it may act as.
    #[default]
    Hierarchical,

    /// A [`Role`] matches only itself.
    Exact,
}

/// Indicates whether the `user_role` satisfies any of the `required` ones.
///
/// Roles are compared case-insensitively. Roles unknown to the hierarchy
/// match only themselves, and only in [`Matching::Exact`] mode.
#[must_use]
pub fn has_access<R: AsRef<str>>(
    user_role: &str,
    required: &[R],
    matching: Matching,
) -> bool {
    let user_role = user_role.trim();
    if user_role.is_empty() {
        return false;
    }

    required.iter().map(AsRef::as_ref).any(|req| match matching {
        Matching::Exact => user_role.eq_ignore_ascii_case(req.trim()),
        Matching::Hierarchical => Role::from_str(user_role)
            .ok()
            .zip(Role::from_str(req.trim()).ok())
            .is_some_and(|(user, req)| user.can_act_as(req)),
    })
}
