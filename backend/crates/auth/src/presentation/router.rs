//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use platform::rate_limit::RateLimitStore;
use sqlx::PgPool;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::{OtpSender, OtpStore, UserRepository};
use crate::infra::notify::{EmailSender, WhatsAppSender};
use crate::infra::postgres::PgUserRepository;
use crate::infra::redis::RedisOtpStore;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth};

/// Create the Auth router with the production stores
pub fn auth_router(
    pool: PgPool,
    store: RedisOtpStore,
    whatsapp: WhatsAppSender,
    email: EmailSender,
    config: AuthConfig,
) -> Router {
    let tokens = TokenService::new(&config);

    auth_router_generic(AuthAppState {
        users: Arc::new(PgUserRepository::new(pool)),
        store: Arc::new(store),
        whatsapp: Arc::new(whatsapp),
        email: Arc::new(email),
        tokens: Arc::new(tokens),
        config: Arc::new(config),
    })
}

/// Create a generic Auth router for any trait implementations
pub fn auth_router_generic<R, S, W, M>(state: AuthAppState<R, S, W, M>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    S: OtpStore + RateLimitStore + Send + Sync + 'static,
    W: OtpSender + Send + Sync + 'static,
    M: OtpSender + Send + Sync + 'static,
{
    let middleware_state = AuthMiddlewareState {
        tokens: state.tokens.clone(),
    };

    let public = Router::new()
        .route("/register/mobile", post(handlers::register_send_otp::<R, S, W, M>))
        .route(
            "/register/mobile/verify",
            post(handlers::register_verify_otp::<R, S, W, M>),
        )
        .route(
            "/register/mobile/resend-otp",
            post(handlers::register_resend_otp::<R, S, W, M>),
        )
        .route("/register/complete", post(handlers::register_complete::<R, S, W, M>))
        .route("/login/email", post(handlers::login_email::<R, S, W, M>))
        .route(
            "/login/mobile/send-otp",
            post(handlers::login_send_mobile_otp::<R, S, W, M>),
        )
        .route(
            "/login/mobile/verify-otp",
            post(handlers::login_verify_mobile_otp::<R, S, W, M>),
        )
        .route("/token/refresh", post(handlers::refresh_token::<R, S, W, M>));

    let protected = Router::new()
        .route("/login/email/send-otp", post(handlers::email_send_otp::<R, S, W, M>))
        .route("/login/email/verify", post(handlers::email_verify_otp::<R, S, W, M>))
        .route("/me", get(handlers::me::<R, S, W, M>))
        .route("/me/addresses", post(handlers::upsert_address::<R, S, W, M>))
        .route("/me/logout", post(handlers::logout::<R, S, W, M>))
        .route_layer(from_fn_with_state(middleware_state, require_auth));

    public.merge(protected).with_state(state)
}
