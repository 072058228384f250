//! Validation of a session [`Token`] against required [`Role`]s.

use common::define_kind;
use derive_more::{Display, Error};
use jsonwebtoken::DecodingKey;
use serde::Serialize;

#[cfg(doc)]
use super::{Role, Token};
use super::{has_access, session, Claims, Matching};

/// Granted access.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Access {
    /// Role the access is granted to.
    pub role: String,

    /// [`Claims`] of the validated [`Token`].
    #[serde(skip)]
    pub claims: Claims,
}

/// Denied access.
#[derive(Clone, Debug, Display, Error, PartialEq, Serialize)]
#[display("{code}: {explanation}")]
pub struct Denial {
    /// Machine-readable [`Code`] of this [`Denial`].
    pub code: Code,

    /// Role of the [`Token`], if it carries any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Roles any of which would grant the access.
    pub required: Vec<String>,

    /// Human-readable explanation of this [`Denial`].
    pub explanation: String,
}

define_kind! {
    #[doc = "Reason of a [`Denial`]."]
    #[case = "SCREAMING_SNAKE_CASE"]
    #[derive(Serialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    enum Code {
        #[doc = "No [`Token`] is provided."]
        NoToken = 1,

        #[doc = "[`Token`] carries no readable role."]
        InvalidToken = 2,

        #[doc = "Role of the [`Token`] doesn't grant the access."]
        InsufficientRole = 3,

        #[doc = "[`Token`] failed the verification."]
        TokenError = 4,
    }
}

/// Validates the provided `token` against the `required` roles.
///
/// Roles are matched [hierarchically][`Matching::Hierarchical`], any of the
/// `required` ones granting the access. With a `key` provided, the `token`
/// must also pass the signature and expiration verification.
///
/// # Errors
///
/// With a [`Denial`] explaining why the access is not granted.
pub fn validate<R: AsRef<str>>(
    token: Option<&str>,
    required: &[R],
    key: Option<&DecodingKey>,
) -> Result<Access, Denial> {
    let required = required
        .iter()
        .map(|r| r.as_ref().trim().to_lowercase())
        .collect::<Vec<_>>();
    let deny = |code, role: Option<String>| {
        let explanation = explain(code, role.as_deref(), &required);
        Err(Denial {
            code,
            role,
            required: required.clone(),
            explanation,
        })
    };

    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return deny(Code::NoToken, None);
    };

    let claims = match session::decode(token, key) {
        Ok(claims) => claims,
        Err(_) if key.is_none() => return deny(Code::InvalidToken, None),
        Err(_) => return deny(Code::TokenError, None),
    };
    let Some(role) = claims.role().map(str::to_lowercase) else {
        return deny(Code::InvalidToken, None);
    };

    if !has_access(&role, &required, Matching::Hierarchical) {
        return deny(Code::InsufficientRole, Some(role));
    }

    Ok(Access { role, claims })
}

/// Explains a [`Denial`] with the provided [`Code`].
fn explain(code: Code, role: Option<&str>, required: &[String]) -> String {
    match code {
        Code::NoToken => "Please sign in to continue.".into(),
        Code::InvalidToken => {
            "Your session is invalid. Please sign in again.".into()
        }
        Code::TokenError => {
            "Your session could not be verified. Please sign in again.".into()
        }
        Code::InsufficientRole => {
            let role = role.unwrap_or_default();
            required
                .iter()
                .find_map(|req| explanation(role, req))
                .map_or_else(
                    || {
                        format!(
                            "Your role `{role}` does not have access to this \
                             page. Required: {}.",
                            required.join(" or "),
                        )
                    },
                    ToOwned::to_owned,
                )
        }
    }
}

/// Returns the explanation of the `current` role lacking the `required` one.
fn explanation(current: &str, required: &str) -> Option<&'static str> {
    /// Explanations by `(current, required)` roles.
    const EXPLANATIONS: &[(&str, &str, &str)] = &[
        (
            "user",
            "turfadmin",
            "This page is for turf owners. Register your turf to manage \
             bookings.",
        ),
        (
            "user",
            "admin",
            "This page is for platform administrators only.",
        ),
        (
            "user",
            "superadmin",
            "This page is for super administrators only.",
        ),
        (
            "turfadmin",
            "admin",
            "Turf owners cannot access the administration panel.",
        ),
        (
            "turfadmin",
            "superadmin",
            "Turf owners cannot access super administrator settings.",
        ),
        (
            "admin",
            "superadmin",
            "This action requires super administrator privileges.",
        ),
    ];

    EXPLANATIONS
        .iter()
        .find(|(c, r, _)| *c == current && *r == required)
        .map(|(_, _, text)| *text)
}
