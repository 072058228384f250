//! Navigation paths of [`Role`]s.

use std::str::FromStr as _;

use super::Role;

/// Path of the sign-in page.
pub const LOGIN: &str = "/login";

/// Path of the landing page.
pub const ROOT: &str = "/";

impl Role {
    /// Returns the prefix of the pages dedicated to this [`Role`], if any.
    #[must_use]
    pub const fn path_prefix(self) -> Option<&'static str> {
        match self {
            Self::User => Some("/user/"),
            Self::TurfAdmin => Some("/turfadmin/"),
            Self::Admin => Some("/admin/"),
            Self::SuperAdmin => None,
        }
    }

    /// Returns the dashboard path of this [`Role`].
    #[must_use]
    pub const fn dashboard(self) -> &'static str {
        match self {
            Self::User => "/user/dashboard",
            Self::TurfAdmin => "/turfadmin/dashboard",
            Self::Admin => "/admin/dashboard",
            Self::SuperAdmin => ROOT,
        }
    }
}

/// Returns the path to redirect the provided `role` to after signing in.
///
/// Unknown roles land on [`ROOT`], and no role at all on [`LOGIN`].
#[must_use]
pub fn default_path(role: Option<&str>) -> &'static str {
    match role.map(str::trim).filter(|r| !r.is_empty()) {
        None => LOGIN,
        Some(role) => Role::from_str(role).map_or(ROOT, Role::dashboard),
    }
}

/// Remaps the `intended` path to the one the provided `role` may visit.
///
/// A [`Role::User`] heading to the owner pages is sent to the same page of
/// the customer area, and vice versa. The area segment is swapped wherever it
/// occurs first, so nested and absolute paths keep their surroundings. Any
/// other path resolves to the [`default_path()`].
#[must_use]
pub fn remap_path(intended: &str, role: Option<&str>) -> String {
    let swap = match role.and_then(|r| Role::from_str(r.trim()).ok()) {
        Some(Role::User) => Some((Role::TurfAdmin, Role::User)),
        Some(Role::TurfAdmin) => Some((Role::User, Role::TurfAdmin)),
        Some(Role::Admin | Role::SuperAdmin) | None => None,
    };

    if let Some((from, to)) = swap {
        if let Some((from, to)) = from.path_prefix().zip(to.path_prefix()) {
            if intended.contains(from) {
                return intended.replacen(from, to, 1);
            }
        }
    }

    default_path(role).to_owned()
}
