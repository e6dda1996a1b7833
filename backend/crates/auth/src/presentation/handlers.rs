//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Extension;
use std::sync::Arc;

use platform::cookie::{extract_cookie, set_cookie_header};
use platform::rate_limit::RateLimitStore;

use crate::application::config::{AuthConfig, REFRESH_TOKEN_COOKIE};
use crate::application::{
    AddressInput, AddressUseCase, CompleteRegistrationInput, CurrentUserUseCase,
    EmailVerificationUseCase, LoginUseCase, LogoutUseCase, RefreshTokenUseCase,
    RegistrationUseCase, SignedInOutput, TokenService,
};
use crate::domain::repository::{OtpSender, OtpStore, UserRepository};
use crate::domain::value_object::AddressId;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AddressListResponse, AddressRequest, AddressView, CompleteRegistrationRequest,
    EmailLoginRequest, EmailOtpResponse, MeResponse, MessageResponse, OtpSentResponse,
    RefreshResponse, SendEmailOtpRequest, SendOtpRequest, SessionResponse, UserView,
    VerifyEmailOtpRequest, VerifyOtpRequest,
};
use crate::presentation::middleware::AuthContext;

/// Shared state for auth handlers
pub struct AuthAppState<R, S, W, M> {
    pub users: Arc<R>,
    pub store: Arc<S>,
    /// WhatsApp channel for mobile OTPs
    pub whatsapp: Arc<W>,
    /// Email channel for verification OTPs
    pub email: Arc<M>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

impl<R, S, W, M> Clone for AuthAppState<R, S, W, M> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            store: self.store.clone(),
            whatsapp: self.whatsapp.clone(),
            email: self.email.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

/// Set the refresh cookie and return the sanitized user + access token
fn signed_in_response(
    config: &AuthConfig,
    output: SignedInOutput,
    status: StatusCode,
) -> axum::response::Response {
    let cookie = set_cookie_header(&config.refresh_cookie(), &output.refresh_token);

    (
        status,
        [(header::SET_COOKIE, cookie)],
        Json(SessionResponse {
            user: UserView::from(&output.user),
            access_token: output.access_token,
        }),
    )
        .into_response()
}

// ============================================================================
// Registration
// ============================================================================

/// POST /api/auth/register/mobile
pub async fn register_send_otp<R, S, W, M>(
    State(state): State<AuthAppState<R, S, W, M>>,
    Json(req): Json<SendOtpRequest>,
) -> AuthResult<Json<OtpSentResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    let use_case = RegistrationUseCase::new(
        state.users.clone(),
        state.store.clone(),
        state.whatsapp.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let phone = use_case.send_otp(&req.phone_number).await?;

    Ok(Json(OtpSentResponse {
        message: "OTP sent successfully".to_string(),
        phone_number: phone.as_str().to_string(),
    }))
}

/// POST /api/auth/register/mobile/resend-otp
///
/// Alias of the send flow; the new code overwrites the previous one.
pub async fn register_resend_otp<R, S, W, M>(
    state: State<AuthAppState<R, S, W, M>>,
    req: Json<SendOtpRequest>,
) -> AuthResult<Json<OtpSentResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    register_send_otp(state, req).await
}

/// POST /api/auth/register/mobile/verify
pub async fn register_verify_otp<R, S, W, M>(
    State(state): State<AuthAppState<R, S, W, M>>,
    Json(req): Json<VerifyOtpRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    let use_case = RegistrationUseCase::new(
        state.users.clone(),
        state.store.clone(),
        state.whatsapp.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    use_case.verify_otp(&req.phone_number, &req.otp).await?;

    Ok(Json(MessageResponse {
        message: "Phone number verified successfully".to_string(),
    }))
}

/// POST /api/auth/register/complete
pub async fn register_complete<R, S, W, M>(
    State(state): State<AuthAppState<R, S, W, M>>,
    Json(req): Json<CompleteRegistrationRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    let use_case = RegistrationUseCase::new(
        state.users.clone(),
        state.store.clone(),
        state.whatsapp.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .complete(CompleteRegistrationInput {
            phone_number: req.phone_number,
            email: req.email,
            name: req.name,
            password: req.password,
        })
        .await?;

    Ok(signed_in_response(
        &state.config,
        output,
        StatusCode::CREATED,
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login/email
pub async fn login_email<R, S, W, M>(
    State(state): State<AuthAppState<R, S, W, M>>,
    Json(req): Json<EmailLoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.users.clone(),
        state.store.clone(),
        state.whatsapp.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case.with_email(&req.email, req.password).await?;

    Ok(signed_in_response(&state.config, output, StatusCode::OK))
}

/// POST /api/auth/login/mobile/send-otp
pub async fn login_send_mobile_otp<R, S, W, M>(
    State(state): State<AuthAppState<R, S, W, M>>,
    Json(req): Json<SendOtpRequest>,
) -> AuthResult<Json<OtpSentResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.users.clone(),
        state.store.clone(),
        state.whatsapp.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let phone = use_case.send_mobile_otp(&req.phone_number).await?;

    Ok(Json(OtpSentResponse {
        message: "OTP sent successfully".to_string(),
        phone_number: phone.as_str().to_string(),
    }))
}

/// POST /api/auth/login/mobile/verify-otp
pub async fn login_verify_mobile_otp<R, S, W, M>(
    State(state): State<AuthAppState<R, S, W, M>>,
    Json(req): Json<VerifyOtpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.users.clone(),
        state.store.clone(),
        state.whatsapp.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .verify_mobile_otp(&req.phone_number, &req.otp)
        .await?;

    Ok(signed_in_response(&state.config, output, StatusCode::OK))
}

// ============================================================================
// Email verification
// ============================================================================

/// POST /api/auth/login/email/send-otp (authenticated)
pub async fn email_send_otp<R, S, W, M>(
    State(state): State<AuthAppState<R, S, W, M>>,
    Json(req): Json<SendEmailOtpRequest>,
) -> AuthResult<Json<EmailOtpResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    let use_case = EmailVerificationUseCase::new(
        state.users.clone(),
        state.store.clone(),
        state.email.clone(),
        state.config.clone(),
    );

    let email = use_case.send_otp(&req.email).await?;

    Ok(Json(EmailOtpResponse {
        message: "OTP sent successfully".to_string(),
        email: email.as_str().to_string(),
    }))
}

/// POST /api/auth/login/email/verify (authenticated)
pub async fn email_verify_otp<R, S, W, M>(
    State(state): State<AuthAppState<R, S, W, M>>,
    Json(req): Json<VerifyEmailOtpRequest>,
) -> AuthResult<Json<EmailOtpResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    let use_case = EmailVerificationUseCase::new(
        state.users.clone(),
        state.store.clone(),
        state.email.clone(),
        state.config.clone(),
    );

    let email = use_case.verify_otp(&req.email, &req.otp).await?;

    Ok(Json(EmailOtpResponse {
        message: "Email verified successfully".to_string(),
        email: email.as_str().to_string(),
    }))
}

// ============================================================================
// Token refresh
// ============================================================================

/// POST /api/auth/token/refresh
///
/// Reads the refresh token from its httpOnly cookie and sets a fresh
/// access-token cookie alongside the JSON body.
pub async fn refresh_token<R, S, W, M>(
    State(state): State<AuthAppState<R, S, W, M>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    let token =
        extract_cookie(&headers, REFRESH_TOKEN_COOKIE).ok_or(AuthError::TokenInvalid)?;

    let use_case = RefreshTokenUseCase::new(
        state.users.clone(),
        state.store.clone(),
        state.tokens.clone(),
    );

    let access_token = use_case.execute(&token).await?;

    let cookie = set_cookie_header(&state.config.access_cookie(), &access_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(RefreshResponse { access_token }),
    ))
}

// ============================================================================
// Current user
// ============================================================================

/// GET /api/auth/me (authenticated)
pub async fn me<R, S, W, M>(
    State(state): State<AuthAppState<R, S, W, M>>,
    Extension(ctx): Extension<AuthContext>,
) -> AuthResult<Json<MeResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    let use_case = CurrentUserUseCase::new(state.users.clone());

    let user = use_case.get_me(&ctx.user_id).await?;

    Ok(Json(MeResponse {
        user: UserView::from(&user),
    }))
}

/// POST /api/auth/me/addresses (authenticated)
pub async fn upsert_address<R, S, W, M>(
    State(state): State<AuthAppState<R, S, W, M>>,
    Extension(ctx): Extension<AuthContext>,
    Json(req): Json<AddressRequest>,
) -> AuthResult<Json<AddressListResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    let use_case = AddressUseCase::new(state.users.clone());

    let input = AddressInput {
        address_id: req.address_id.map(AddressId::from_uuid),
        street: req.street,
        city: req.city,
        state: req.state,
        postal_code: req.postal_code,
        country: req.country,
        is_default: req.is_default,
        latitude: req.latitude,
        longitude: req.longitude,
    };

    let addresses = use_case.add_or_update(&ctx.user_id, input).await?;

    Ok(Json(AddressListResponse {
        message: "Address saved successfully".to_string(),
        addresses: addresses.iter().map(AddressView::from).collect(),
    }))
}

/// POST /api/auth/me/logout (authenticated)
pub async fn logout<R, S, W, M>(
    State(state): State<AuthAppState<R, S, W, M>>,
    Extension(ctx): Extension<AuthContext>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.users.clone(), state.store.clone());

    use_case.execute(&ctx.user_id).await?;

    // Both cookies are cleared regardless of prior state
    let clear_refresh = state.config.refresh_cookie().build_delete_cookie();
    let clear_access = state.config.access_cookie().build_delete_cookie();

    Ok((
        StatusCode::OK,
        AppendHeaders([
            (header::SET_COOKIE, clear_refresh),
            (header::SET_COOKIE, clear_access),
        ]),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}
