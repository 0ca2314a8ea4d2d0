//! Authentication endpoints: signup, login, logout, current user, and the
//! federated login callback.
//!
//! ```text
//! POST /api/v1/auth/signup {"name":"Alex","email":"alex@example.com","password":"secret1"}
//! POST /api/v1/auth/login  {"email":"alex@example.com","password":"secret1"}
//! POST /api/v1/auth/logout
//! GET  /api/v1/auth/me
//! GET  /api/v1/auth/google/callback?code=...
//! ```

use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::{FederatedAuthGateway as _, UserRepository as _};
use crate::domain::{
    Error, LoginCredentials, ResolvedIdentity, SignupDetails, User,
};
use crate::middleware::TOKEN_COOKIE;

use super::session::SessionContext;
use super::state::HttpState;
use super::validation::map_auth_validation_error;
use super::ApiResult;

/// Signup request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    /// Display name, at least two characters.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password, at least six characters.
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_owned(),
            email: user.email.as_str().to_owned(),
        }
    }
}

/// Body of successful signup/login responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// The authenticated account.
    pub user: UserDto,
}

/// Body of `GET /auth/me`; `user` is null for anonymous callers.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    /// The resolved account, when any identity source matched.
    pub user: Option<UserDto>,
}

/// Site-wide HTTP-only cookie carrying the identity token.
fn identity_cookie(token: String) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .finish()
}

fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(TOKEN_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

/// Register a credentials account and set the identity cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created; identity cookie set", body = AuthResponse),
        (status = 400, description = "Validation failure or duplicate account", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let details = SignupDetails::try_from_parts(&payload.name, &payload.email, &payload.password)
        .map_err(map_auth_validation_error)?;
    let authenticated = state.credentials.register(&details).await?;
    Ok(HttpResponse::Ok()
        .cookie(identity_cookie(authenticated.token))
        .json(AuthResponse {
            user: UserDto::from(&authenticated.user),
        }))
}

/// Validate credentials and set the identity cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success; identity cookie set", body = AuthResponse),
        (status = 400, description = "Malformed payload or federated-only account", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(|_| Error::invalid_credentials("invalid credentials"))?;
    let authenticated = state.credentials.issue(&credentials).await?;
    Ok(HttpResponse::Ok()
        .cookie(identity_cookie(authenticated.token))
        .json(AuthResponse {
            user: UserDto::from(&authenticated.user),
        }))
}

/// Clear the identity cookie and the federated session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Cookies cleared")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().cookie(removal_cookie()).finish()
}

/// Resolve the current account from the identity providers.
///
/// Mirrors the source behaviour: an unresolved or unknown identity yields a
/// 200 with `user: null`, never an authentication error.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current account, or null", body = MeResponse)
    ),
    tags = ["auth"],
    operation_id = "currentUser",
    security([])
)]
#[get("/auth/me")]
pub async fn me(
    state: web::Data<HttpState>,
    identity: ResolvedIdentity,
) -> ApiResult<web::Json<MeResponse>> {
    let Some(user_id) = identity.user_id() else {
        return Ok(web::Json(MeResponse { user: None }));
    };

    let user = match state.users.find_by_id(user_id).await {
        Ok(found) => found,
        Err(error) => {
            warn!(%error, "user lookup failed during identity echo");
            None
        }
    };
    Ok(web::Json(MeResponse {
        user: user.as_ref().map(UserDto::from),
    }))
}

/// Query string of the federated callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorisation code returned by the provider.
    code: String,
}

/// Complete a federated login: exchange the code, provision on first login,
/// and persist the session.
#[utoipa::path(
    get,
    path = "/api/v1/auth/google/callback",
    params(("code" = String, Query, description = "Authorisation code from the provider")),
    responses(
        (status = 302, description = "Login complete; redirected home"),
        (status = 400, description = "Code exchange failed", body = Error),
        (status = 503, description = "Federated login not configured", body = Error)
    ),
    tags = ["auth"],
    operation_id = "googleCallback",
    security([])
)]
#[get("/auth/google/callback")]
pub async fn google_callback(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<CallbackQuery>,
) -> ApiResult<HttpResponse> {
    use crate::domain::ports::FederatedAuthError;

    let profile = state
        .federated_auth
        .exchange_code(&query.code)
        .await
        .map_err(|err| match err {
            FederatedAuthError::Unconfigured => {
                Error::service_unavailable("federated login is not configured")
            }
            FederatedAuthError::Exchange { message } => {
                warn!(%message, "federated code exchange failed");
                Error::invalid_request("federated login failed")
            }
        })?;

    let user = state.provisioner.provision(&profile).await?;
    session.persist_user(&user.id)?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish())
}
