//! Identity resolution: an ordered chain of identity providers.
//!
//! Each provider inspects the request and either produces a verified user id
//! or passes. The resolver runs the providers in fixed priority order,
//! custom token cookie first and federated session second, and returns the
//! first success, so a stale or corrupt token cookie silently falls through
//! to a still-valid federated session instead of locking the user out.
//!
//! Resolution is a pure read: no provider mutates any store.

use std::sync::Arc;

use actix_session::SessionExt;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::debug;

use crate::domain::ports::TokenCodec;
use crate::domain::{Error, ResolvedIdentity, UserId};
use crate::middleware::TOKEN_COOKIE;

use super::session::USER_ID_KEY;

/// One identity source in the resolution chain.
pub trait IdentityProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Produce a verified user id from the request, or pass.
    fn try_resolve(&self, req: &HttpRequest) -> Option<UserId>;
}

/// Verifies the custom `token` cookie.
///
/// Verification failure (expired, tampered, wrong key) is not an error:
/// the provider simply passes and the next provider gets a chance.
pub struct TokenCookieProvider {
    tokens: Arc<dyn TokenCodec>,
}

impl TokenCookieProvider {
    /// Create a provider verifying with `tokens`.
    pub fn new(tokens: Arc<dyn TokenCodec>) -> Self {
        Self { tokens }
    }
}

impl IdentityProvider for TokenCookieProvider {
    fn name(&self) -> &'static str {
        "token_cookie"
    }

    fn try_resolve(&self, req: &HttpRequest) -> Option<UserId> {
        let cookie = req.cookie(TOKEN_COOKIE)?;
        match self.tokens.verify(cookie.value()) {
            Ok(claims) => Some(claims.user_id),
            Err(error) => {
                debug!(%error, "token cookie failed verification; trying next provider");
                None
            }
        }
    }
}

/// Reads the user id persisted in the federated session cookie.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionProvider;

impl IdentityProvider for SessionProvider {
    fn name(&self) -> &'static str {
        "session"
    }

    fn try_resolve(&self, req: &HttpRequest) -> Option<UserId> {
        let session = req.get_session();
        let raw = session.get::<String>(USER_ID_KEY).ok().flatten()?;
        match UserId::new(&raw) {
            Ok(id) => Some(id),
            Err(error) => {
                debug!(%error, "session carried an unparseable user id");
                None
            }
        }
    }
}

/// Fixed-priority chain of identity providers.
pub struct IdentityResolver {
    providers: Vec<Arc<dyn IdentityProvider>>,
}

impl IdentityResolver {
    /// Build a resolver running `providers` in the given order.
    pub fn new(providers: Vec<Arc<dyn IdentityProvider>>) -> Self {
        Self { providers }
    }

    /// The standard chain: token cookie, then federated session.
    pub fn standard(tokens: Arc<dyn TokenCodec>) -> Self {
        Self::new(vec![
            Arc::new(TokenCookieProvider::new(tokens)),
            Arc::new(SessionProvider),
        ])
    }

    /// Resolve the acting user for `req`, or anonymous.
    pub fn resolve(&self, req: &HttpRequest) -> ResolvedIdentity {
        for provider in &self.providers {
            if let Some(user_id) = provider.try_resolve(req) {
                debug!(provider = provider.name(), %user_id, "identity resolved");
                return ResolvedIdentity::User(user_id);
            }
        }
        ResolvedIdentity::Anonymous
    }
}

impl FromRequest for ResolvedIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let resolved = match req.app_data::<web::Data<IdentityResolver>>() {
            Some(resolver) => Ok(resolver.resolve(req)),
            None => Err(Error::internal("identity resolver is not configured").into()),
        };
        ready(resolved)
    }
}

/// Resolver with only the session provider, for session-focused tests.
#[cfg(test)]
pub(crate) fn session_only_resolver() -> IdentityResolver {
    IdentityResolver::new(vec![Arc::new(SessionProvider)])
}

#[cfg(test)]
mod tests {
    //! Regression coverage for resolver ordering and fall-through.
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{test, App, HttpResponse};

    use super::*;
    use crate::domain::ports::{TokenClaims, TokenError};
    use crate::domain::Email;

    const TOKEN_USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    const SESSION_USER: &str = "123e4567-e89b-12d3-a456-426614174000";
    const GOOD_TOKEN: &str = "good-token";

    struct OneTokenCodec;

    impl TokenCodec for OneTokenCodec {
        fn mint(&self, _claims: &TokenClaims) -> Result<String, TokenError> {
            Ok(GOOD_TOKEN.to_owned())
        }

        fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
            if token == GOOD_TOKEN {
                Ok(TokenClaims {
                    user_id: UserId::new(TOKEN_USER)
                        .map_err(|e| TokenError::invalid(e.to_string()))?,
                    email: Email::new("alex@example.com")
                        .map_err(|e| TokenError::invalid(e.to_string()))?,
                })
            } else {
                Err(TokenError::Expired)
            }
        }
    }

    async fn resolver_app() -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        let resolver = IdentityResolver::standard(Arc::new(OneTokenCodec));
        test::init_service(
            App::new()
                .app_data(web::Data::new(resolver))
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route(
                    "/login-session",
                    web::get().to(
                        |session: crate::inbound::http::session::SessionContext| async move {
                            let id = UserId::new(SESSION_USER).expect("fixture id");
                            session.persist_user(&id)?;
                            Ok::<_, Error>(HttpResponse::Ok())
                        },
                    ),
                )
                .route(
                    "/whoami",
                    web::get().to(|identity: ResolvedIdentity| async move {
                        match identity.user_id() {
                            Some(id) => HttpResponse::Ok().body(id.to_string()),
                            None => HttpResponse::Ok().body("anonymous"),
                        }
                    }),
                ),
        )
        .await
    }

    async fn session_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> Cookie<'static> {
        let res = test::call_service(
            app,
            test::TestRequest::get().uri("/login-session").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn valid_token_cookie_wins_over_the_session() {
        let app = resolver_app().await;
        let cookie = session_cookie(&app).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(TOKEN_COOKIE, GOOD_TOKEN))
            .cookie(cookie)
            .to_request();
        let body = test::read_body(test::call_service(&app, req).await).await;
        assert_eq!(body, TOKEN_USER);
    }

    #[actix_web::test]
    async fn invalid_token_falls_through_to_a_valid_session() {
        let app = resolver_app().await;
        let cookie = session_cookie(&app).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(TOKEN_COOKIE, "expired-or-corrupt"))
            .cookie(cookie)
            .to_request();
        let body = test::read_body(test::call_service(&app, req).await).await;
        assert_eq!(body, SESSION_USER);
    }

    #[actix_web::test]
    async fn no_cookies_resolve_to_anonymous() {
        let app = resolver_app().await;
        let req = test::TestRequest::get().uri("/whoami").to_request();
        let body = test::read_body(test::call_service(&app, req).await).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn invalid_token_with_no_session_is_anonymous_not_an_error() {
        let app = resolver_app().await;
        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(TOKEN_COOKIE, "garbage"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "anonymous");
    }
}
