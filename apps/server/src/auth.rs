use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher,
        PasswordVerifier, SaltString,
    },
    Argon2,
};
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use terravest_core::auth::{authorize, Identity, Requirement, Role};
use terravest_core::constants::MIN_PASSWORD_LENGTH;
use terravest_core::users::{NewUser, User};
use terravest_core::Error as CoreError;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{AuthStatusResponse, LoginRequest, LoginResponse, RegisterRequest};

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

impl AuthManager {
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            validation,
            token_ttl,
        }
    }

    pub fn hash_password(&self, password: &str) -> ApiResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))
    }

    pub fn verify_password(&self, candidate: &str, stored_hash: &str) -> ApiResult<()> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| ApiError::Internal(format!("Stored password hash is invalid: {e}")))?;
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => ApiError::InvalidCredentials,
                other => ApiError::Internal(format!("Password verification failed: {other}")),
            })
    }

    /// Signs a token whose subject is the user id.
    pub fn issue_token(&self, user_id: &str) -> ApiResult<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| ApiError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Returns the subject of a valid token, `None` otherwise.
    pub fn validate_token(&self, token: &str) -> Option<String> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims.sub),
            Err(err) => {
                tracing::debug!("Rejected bearer token: {:?}", err.kind());
                None
            }
        }
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolves the caller of a request. Missing, malformed, expired or orphaned
/// tokens all yield `None`.
pub fn resolve_session(state: &AppState, headers: &HeaderMap) -> ApiResult<Option<Identity>> {
    let Some(user_id) = bearer_token(headers).and_then(|t| state.auth.validate_token(t)) else {
        return Ok(None);
    };
    Ok(state.user_service.get_identity(&user_id)?)
}

/// State handed to [`gate`] for one route group.
#[derive(Clone)]
pub struct GateState {
    pub app: Arc<AppState>,
    pub requirement: Requirement,
}

impl GateState {
    pub fn new(app: Arc<AppState>, requirement: Requirement) -> Self {
        Self { app, requirement }
    }
}

/// The single authorization guard wrapped around every protected route group.
///
/// On success the resolved [`Identity`] is placed in the request extensions,
/// where handlers pick it up with `Extension<Identity>`.
pub async fn gate(
    State(gate): State<GateState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let session = resolve_session(&gate.app, request.headers())?;
    let identity = authorize(session.as_ref(), gate.requirement).map_err(|err| {
        tracing::info!(
            "Denied {} {} ({:?}): {}",
            request.method(),
            request.uri().path(),
            gate.requirement,
            err
        );
        err
    })?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    if payload.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    let password_hash = state.auth.hash_password(&payload.password)?;
    let user = state
        .user_service
        .register(NewUser {
            email: payload.email,
            password_hash,
            role: Role::User,
            email_verified: false,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// A malformed email is reported like an unknown account. Storage failures
/// keep their own status.
fn credentials_lookup_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Validation(_) => ApiError::InvalidCredentials,
        other => ApiError::Core(other),
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let credentials = state
        .user_service
        .find_credentials(&payload.email)
        .map_err(credentials_lookup_error)?
        .ok_or(ApiError::InvalidCredentials)?;
    state
        .auth
        .verify_password(&payload.password, &credentials.password_hash)?;
    let token = state.auth.issue_token(&credentials.user.id)?;
    tracing::info!("User {} signed in", credentials.user.id);
    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth.expires_in().as_secs(),
        user: credentials.user,
    }))
}

pub async fn auth_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<AuthStatusResponse>> {
    let identity = resolve_session(&state, &headers)?;
    Ok(Json(AuthStatusResponse {
        authenticated: identity.is_some(),
        identity,
    }))
}

pub async fn me(Extension(identity): Extension<Identity>) -> Json<Identity> {
    Json(identity)
}
