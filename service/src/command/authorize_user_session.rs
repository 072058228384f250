//! [`Command`] for authorizing a user session.

use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::user::{access, session, Access, Denial},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a user session against the required roles.
///
/// With [`Config::jwt_decoding_key`] set, the [`session::Token`] signature
/// and expiration are verified too.
///
/// [`Config::jwt_decoding_key`]: crate::Config::jwt_decoding_key
#[derive(Clone, Debug, Default)]
pub struct AuthorizeUserSession {
    /// [`session::Token`] to authorize, if the user has signed in.
    pub token: Option<session::Token>,

    /// Roles any of which grants the access.
    pub required: Vec<String>,
}

impl<Db> Command<AuthorizeUserSession> for Service<Db> {
    type Ok = Access;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        let AuthorizeUserSession { token, required } = cmd;

        access::validate(
            token.as_ref().map(AsRef::<str>::as_ref),
            &required,
            self.config().jwt_decoding_key.as_ref(),
        )
        .map_err(tracerr::from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`AuthorizeUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Access is denied.
    #[display("Access denied: {_0}")]
    Denied(Denial),
}

#[cfg(test)]
mod spec {
    use common::Handler as _;
    use jsonwebtoken::DecodingKey;
    use serde_json::json;

    use crate::{
        domain::user::{access::Code, session::spec::signed},
        spec::{service, service_with},
        Config,
    };

    use super::{AuthorizeUserSession, ExecutionError};

    #[tokio::test]
    async fn authorizes_hierarchically() {
        let token = signed(&json!({"role": "superadmin"}));

        let access = service()
            .execute(AuthorizeUserSession {
                token: Some(token.into()),
                required: vec!["turfadmin".into()],
            })
            .await
            .unwrap();
        assert_eq!(access.role, "superadmin");
    }

    #[tokio::test]
    async fn denies_missing_token() {
        let err = service()
            .execute(AuthorizeUserSession {
                token: None,
                required: vec!["user".into()],
            })
            .await
            .unwrap_err();

        let err: &ExecutionError = err.as_ref();
        let ExecutionError::Denied(denial) = err;
        assert_eq!(denial.code, Code::NoToken);
    }

    #[tokio::test]
    async fn verifies_tokens_when_configured() {
        let svc = service_with(Config {
            jwt_decoding_key: Some(DecodingKey::from_secret(b"other-secret")),
        });
        let token = signed(&json!({"role": "admin", "exp": 4_102_444_800_i64}));

        let err = svc
            .execute(AuthorizeUserSession {
                token: Some(token.into()),
                required: vec!["admin".into()],
            })
            .await
            .unwrap_err();

        let err: &ExecutionError = err.as_ref();
        let ExecutionError::Denied(denial) = err;
        assert_eq!(denial.code, Code::TokenError);
    }
}
