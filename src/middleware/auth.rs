use crate::AppState;
use crate::db::{DbPool, models::{AuthUser, User}};
use crate::error::{AppError, AppResult};
use axum::{
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Access token claims. Tokens are issued by the identity service; this
/// service only verifies them.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid, // user_id
    pub email: String,
    pub exp: u64,
    pub iat: u64,
}

#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Signs claims with the shared secret. Used by tooling and tests.
    pub fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
    }
}

pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = bearer_token(header).ok_or_else(|| AppError::auth("Unauthorized"))?;

    let claims = state.auth_service.verify_token(token)?;

    let user = get_active_user(&state.db, claims.sub)?
        .ok_or_else(|| AppError::auth("Unauthorized"))?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

fn get_active_user(pool: &DbPool, user_id: uuid::Uuid) -> AppResult<Option<AuthUser>> {
    use crate::schema::users::dsl::*;
    use diesel::prelude::*;

    let mut conn = pool.get()?;

    let user = users
        .filter(id.eq(user_id))
        .filter(is_active.eq(true))
        .select(User::as_select())
        .first(&mut conn)
        .optional()?;

    Ok(user.map(AuthUser::from))
}
