//! Session [`Token`] decoding.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr};
use jsonwebtoken::{
    errors::{Error, ErrorKind},
    Algorithm, DecodingKey, Validation,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

/// Bearer token of a user session, in the [JWT] compact form.
///
/// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
#[derive(AsRef, Clone, Debug, Display, From, FromStr)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Token(String);

/// Claims of a [`Token`] relevant to access resolution.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Claims {
    /// Subject the [`Token`] was issued to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Role of the subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Legacy name of the [`Claims::role`].
    #[serde(
        default,
        rename = "userType",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_type: Option<String>,

    /// [`DateTime`] when the [`Token`] was issued.
    #[serde(
        default,
        rename = "iat",
        skip_serializing_if = "Option::is_none",
        with = "common::datetime::serde::unix_timestamp::option"
    )]
    pub issued_at: Option<IssuanceDateTime>,

    /// [`DateTime`] when the [`Token`] expires.
    #[serde(
        default,
        rename = "exp",
        skip_serializing_if = "Option::is_none",
        with = "common::datetime::serde::unix_timestamp::option"
    )]
    pub expires_at: Option<ExpirationDateTime>,
}

impl Claims {
    /// Returns the role of the subject.
    ///
    /// [`Claims::role`] wins over [`Claims::user_type`], blank values are
    /// ignored.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        [&self.role, &self.user_type]
            .into_iter()
            .filter_map(Option::as_deref)
            .map(str::trim)
            .find(|r| !r.is_empty())
    }
}

/// Decodes [`Claims`] of the provided compact `token`.
///
/// With a `key` provided, the `HS256` signature and the expiration of the
/// `token` are verified. Otherwise, only its payload is read, which is
/// suitable for UX decisions only.
///
/// # Errors
///
/// If the `token` is malformed, or fails the verification.
pub fn decode(
    token: &str,
    key: Option<&DecodingKey>,
) -> Result<Claims, Error> {
    match key {
        Some(key) => Ok(jsonwebtoken::decode::<Claims>(
            token,
            key,
            &Validation::new(Algorithm::HS256),
        )?
        .claims),
        None => read_payload(token),
    }
}

/// Reads [`Claims`] from the payload segment of the provided compact
/// `token`.
///
/// Neither the header nor the signature segments are inspected, and claims
/// of unexpected types are treated as absent.
fn read_payload(token: &str) -> Result<Claims, Error> {
    /// Base64url engine tolerating both padded and unpadded input.
    const BASE64: GeneralPurpose = GeneralPurpose::new(
        &alphabet::URL_SAFE,
        GeneralPurposeConfig::new()
            .with_decode_padding_mode(DecodePaddingMode::Indifferent),
    );

    let segments = token.split('.').collect::<Vec<_>>();
    let &[_, payload, _] = segments.as_slice() else {
        return Err(ErrorKind::InvalidToken.into());
    };

    let Payload {
        sub,
        role,
        user_type,
        issued_at,
        expires_at,
    } = serde_json::from_slice(&BASE64.decode(payload)?)?;

    Ok(Claims {
        sub,
        role,
        user_type,
        issued_at: issued_at.and_then(DateTimeOf::from_unix_timestamp),
        expires_at: expires_at.and_then(DateTimeOf::from_unix_timestamp),
    })
}

/// Loosely typed payload of an unverified [`Token`].
#[derive(Deserialize)]
struct Payload {
    #[serde(default, deserialize_with = "loosely")]
    sub: Option<String>,

    #[serde(default, deserialize_with = "loosely")]
    role: Option<String>,

    #[serde(default, rename = "userType", deserialize_with = "loosely")]
    user_type: Option<String>,

    #[serde(default, rename = "iat", deserialize_with = "loosely")]
    issued_at: Option<i64>,

    #[serde(default, rename = "exp", deserialize_with = "loosely")]
    expires_at: Option<i64>,
}

/// Deserializes a `T` value, or [`None`] if the value is of another type.
fn loosely<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Extracts the role from the provided compact `token` without verifying it.
///
/// [`None`] is returned if the `token` is malformed or carries no role.
#[must_use]
pub fn extract_role(token: &str) -> Option<String> {
    decode(token, None).ok()?.role().map(ToOwned::to_owned)
}

/// [`DateTime`] of a [`Token`] issuance.
pub type IssuanceDateTime = DateTimeOf<(Claims, unit::Issuance)>;

/// [`DateTime`] of a [`Token`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Claims, unit::Expiration)>;
