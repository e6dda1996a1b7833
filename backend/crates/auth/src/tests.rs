//! Use-case tests over the in-memory store implementations

#[cfg(test)]
mod registration_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use platform::password::ClearTextPassword;

    use crate::application::config::AuthConfig;
    use crate::application::token::TokenService;
    use crate::application::{CompleteRegistrationInput, RegistrationUseCase};
    use crate::domain::entity::user::User;
    use crate::domain::repository::{OtpPurpose, OtpStore};
    use crate::domain::value_object::{email::Email, phone_number::PhoneNumber};
    use crate::error::AuthError;
    use crate::infra::memory::{InMemoryOtpStore, InMemoryUserRepository, RecordingSender};

    const PHONE: &str = "+911234567890";

    fn registration(
        config: AuthConfig,
    ) -> (
        RegistrationUseCase<InMemoryUserRepository, InMemoryOtpStore, RecordingSender>,
        Arc<InMemoryUserRepository>,
        Arc<InMemoryOtpStore>,
        Arc<RecordingSender>,
        Arc<TokenService>,
    ) {
        let users = Arc::new(InMemoryUserRepository::new());
        let store = Arc::new(InMemoryOtpStore::new());
        let sender = Arc::new(RecordingSender::new());
        let tokens = Arc::new(TokenService::new(&config));
        let use_case = RegistrationUseCase::new(
            users.clone(),
            store.clone(),
            sender.clone(),
            tokens.clone(),
            Arc::new(config),
        );
        (use_case, users, store, sender, tokens)
    }

    pub(crate) fn seeded_user(
        phone: &str,
        email: &str,
        password: Option<&str>,
        email_verified: bool,
    ) -> User {
        let mut user = User::register(
            PhoneNumber::new(phone).unwrap(),
            Email::new(email).unwrap(),
            Some("Test".to_string()),
        );
        if let Some(pw) = password {
            let clear = ClearTextPassword::new(pw.to_string()).unwrap();
            user.set_password(clear.hash(None).unwrap());
        }
        if email_verified {
            user.mark_email_verified();
        }
        user
    }

    #[tokio::test]
    async fn test_full_registration_flow() {
        let (use_case, _users, store, sender, tokens) = registration(AuthConfig::development());

        use_case.send_otp(PHONE).await.unwrap();
        let code = sender.last_code().unwrap();
        assert_eq!(code.len(), 6);
        assert_eq!(sender.last_message().unwrap().purpose, OtpPurpose::Registration);

        // Wrong code first
        let wrong = if code == "000000" { "111111" } else { "000000" };
        assert!(matches!(
            use_case.verify_otp(PHONE, wrong).await,
            Err(AuthError::InvalidOtp)
        ));

        use_case.verify_otp(PHONE, &code).await.unwrap();

        // Code is consumed at verify; the marker carries the state
        assert!(store.get_otp(PHONE).await.unwrap().is_none());
        assert!(store.is_verified(PHONE).await.unwrap());

        let output = use_case
            .complete(CompleteRegistrationInput {
                phone_number: PHONE.to_string(),
                email: "a@b.com".to_string(),
                name: Some("A".to_string()),
                password: None,
            })
            .await
            .unwrap();

        assert!(output.user.is_phone_verified);
        assert!(!output.user.is_email_verified);
        assert_eq!(output.user.email.as_str(), "a@b.com");

        // Marker is consumed; tokens verify; refresh token is stored
        assert!(!store.is_verified(PHONE).await.unwrap());
        let claims = tokens.verify_access_token(&output.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), output.user.user_id);
        assert_eq!(
            store
                .get_refresh_token(&output.user.user_id)
                .await
                .unwrap()
                .as_deref(),
            Some(output.refresh_token.as_str())
        );
    }

    #[tokio::test]
    async fn test_complete_with_password_enables_email_login() {
        let config = Arc::new(AuthConfig::development());
        let users = Arc::new(InMemoryUserRepository::new());
        let store = Arc::new(InMemoryOtpStore::new());
        let whatsapp = Arc::new(RecordingSender::new());
        let mailer = Arc::new(RecordingSender::new());
        let tokens = Arc::new(TokenService::new(&config));

        let registration = RegistrationUseCase::new(
            users.clone(),
            store.clone(),
            whatsapp.clone(),
            tokens.clone(),
            config.clone(),
        );

        registration.send_otp(PHONE).await.unwrap();
        let code = whatsapp.last_code().unwrap();
        registration.verify_otp(PHONE, &code).await.unwrap();

        let output = registration
            .complete(CompleteRegistrationInput {
                phone_number: PHONE.to_string(),
                email: "a@b.com".to_string(),
                name: Some("A".to_string()),
                password: Some("secret123".to_string()),
            })
            .await
            .unwrap();

        assert!(output.user.password.is_some());

        // Email login stays gated on verification even with a password
        let login = crate::application::LoginUseCase::new(
            users.clone(),
            store.clone(),
            whatsapp.clone(),
            tokens.clone(),
            config.clone(),
        );
        assert!(matches!(
            login.with_email("a@b.com", "secret123".to_string()).await,
            Err(AuthError::EmailNotVerified)
        ));

        // Verify the email through the email OTP flow, then log in
        let verification = crate::application::EmailVerificationUseCase::new(
            users.clone(),
            store.clone(),
            mailer.clone(),
            config.clone(),
        );
        verification.send_otp("a@b.com").await.unwrap();
        let email_code = mailer.last_code().unwrap();
        verification.verify_otp("a@b.com", &email_code).await.unwrap();

        let session = login
            .with_email("a@b.com", "secret123".to_string())
            .await
            .unwrap();
        assert_eq!(session.user.user_id, output.user.user_id);

        // Wrong password still rejected
        assert!(matches!(
            login.with_email("a@b.com", "wrong-password".to_string()).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_complete_rejects_weak_password() {
        let (use_case, _users, store, sender, _tokens) = registration(AuthConfig::development());

        use_case.send_otp(PHONE).await.unwrap();
        let code = sender.last_code().unwrap();
        use_case.verify_otp(PHONE, &code).await.unwrap();

        let result = use_case
            .complete(CompleteRegistrationInput {
                phone_number: PHONE.to_string(),
                email: "a@b.com".to_string(),
                name: None,
                password: Some("12345".to_string()),
            })
            .await;

        assert!(matches!(result, Err(AuthError::Validation(_))));

        // A rejected password does not consume the verified marker
        assert!(store.is_verified(PHONE).await.unwrap());
    }

    #[tokio::test]
    async fn test_send_otp_conflict_on_registered_phone() {
        let (use_case, users, _store, sender, _tokens) = registration(AuthConfig::development());
        users.insert(seeded_user(PHONE, "a@b.com", None, false));

        assert!(matches!(
            use_case.send_otp(PHONE).await,
            Err(AuthError::PhoneTaken)
        ));
        assert_eq!(sender.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_complete_without_verification() {
        let (use_case, _users, _store, _sender, _tokens) = registration(AuthConfig::development());

        let result = use_case
            .complete(CompleteRegistrationInput {
                phone_number: PHONE.to_string(),
                email: "a@b.com".to_string(),
                name: None,
                password: None,
            })
            .await;

        assert!(matches!(result, Err(AuthError::PhoneNotVerified)));
    }

    #[tokio::test]
    async fn test_complete_duplicate_email() {
        let (use_case, users, _store, sender, _tokens) = registration(AuthConfig::development());
        users.insert(seeded_user("+911111111111", "taken@b.com", None, false));

        use_case.send_otp(PHONE).await.unwrap();
        let code = sender.last_code().unwrap();
        use_case.verify_otp(PHONE, &code).await.unwrap();

        let result = use_case
            .complete(CompleteRegistrationInput {
                phone_number: PHONE.to_string(),
                email: "taken@b.com".to_string(),
                name: None,
                password: None,
            })
            .await;

        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_resend_overwrites_prior_code() {
        let (use_case, _users, store, sender, _tokens) = registration(AuthConfig::development());

        use_case.send_otp(PHONE).await.unwrap();
        let first = sender.last_code().unwrap();

        use_case.send_otp(PHONE).await.unwrap();
        let second = sender.last_code().unwrap();

        assert_eq!(store.get_otp(PHONE).await.unwrap(), Some(second.clone()));
        if first != second {
            assert!(matches!(
                use_case.verify_otp(PHONE, &first).await,
                Err(AuthError::InvalidOtp)
            ));
        }
    }

    #[tokio::test]
    async fn test_rate_limit_trips_on_fourth_send() {
        let (use_case, _users, _store, sender, _tokens) = registration(AuthConfig::development());

        for _ in 0..3 {
            use_case.send_otp(PHONE).await.unwrap();
        }
        assert!(matches!(
            use_case.send_otp(PHONE).await,
            Err(AuthError::RateLimited)
        ));
        assert_eq!(sender.sent_count(), 3);
    }

    #[tokio::test]
    async fn test_rate_limit_window_resets() {
        let mut config = AuthConfig::development();
        config.otp_rate_limit.max_requests = 1;
        config.otp_rate_limit.window = Duration::from_millis(50);
        let (use_case, _users, _store, _sender, _tokens) = registration(config);

        use_case.send_otp(PHONE).await.unwrap();
        assert!(matches!(
            use_case.send_otp(PHONE).await,
            Err(AuthError::RateLimited)
        ));

        tokio::time::sleep(Duration::from_millis(80)).await;
        use_case.send_otp(PHONE).await.unwrap();
    }

    #[tokio::test]
    async fn test_otp_expires() {
        let mut config = AuthConfig::development();
        config.otp_ttl = Duration::from_millis(50);
        let (use_case, _users, _store, sender, _tokens) = registration(config);

        use_case.send_otp(PHONE).await.unwrap();
        let code = sender.last_code().unwrap();

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(matches!(
            use_case.verify_otp(PHONE, &code).await,
            Err(AuthError::OtpExpiredOrNotFound)
        ));
    }

    #[tokio::test]
    async fn test_dispatch_failure_surfaces() {
        let (use_case, _users, _store, sender, _tokens) = registration(AuthConfig::development());

        sender.fail_next();
        assert!(matches!(
            use_case.send_otp(PHONE).await,
            Err(AuthError::DispatchFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_phone_rejected() {
        let (use_case, _users, _store, _sender, _tokens) = registration(AuthConfig::development());

        assert!(matches!(
            use_case.send_otp("not-a-phone").await,
            Err(AuthError::Validation(_))
        ));
    }
}

#[cfg(test)]
mod login_tests {
    use std::sync::Arc;

    use super::registration_tests::seeded_user;
    use crate::application::config::AuthConfig;
    use crate::application::token::TokenService;
    use crate::application::LoginUseCase;
    use crate::domain::repository::{OtpPurpose, OtpStore};
    use crate::error::AuthError;
    use crate::infra::memory::{InMemoryOtpStore, InMemoryUserRepository, RecordingSender};

    const PHONE: &str = "+911234567890";
    const EMAIL: &str = "user@example.com";
    const PASSWORD: &str = "secret123";

    fn login() -> (
        LoginUseCase<InMemoryUserRepository, InMemoryOtpStore, RecordingSender>,
        Arc<InMemoryUserRepository>,
        Arc<InMemoryOtpStore>,
        Arc<RecordingSender>,
        Arc<TokenService>,
    ) {
        let config = AuthConfig::development();
        let users = Arc::new(InMemoryUserRepository::new());
        let store = Arc::new(InMemoryOtpStore::new());
        let sender = Arc::new(RecordingSender::new());
        let tokens = Arc::new(TokenService::new(&config));
        let use_case = LoginUseCase::new(
            users.clone(),
            store.clone(),
            sender.clone(),
            tokens.clone(),
            Arc::new(config),
        );
        (use_case, users, store, sender, tokens)
    }

    #[tokio::test]
    async fn test_email_login_success() {
        let (use_case, users, store, _sender, tokens) = login();
        users.insert(seeded_user(PHONE, EMAIL, Some(PASSWORD), true));

        let output = use_case
            .with_email(EMAIL, PASSWORD.to_string())
            .await
            .unwrap();

        assert!(output.user.last_login_at.is_some());
        let claims = tokens.verify_access_token(&output.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), output.user.user_id);
        assert!(
            store
                .get_refresh_token(&output.user.user_id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_email_login_uniform_invalid_credentials() {
        let (use_case, users, _store, _sender, _tokens) = login();
        users.insert(seeded_user(PHONE, EMAIL, Some(PASSWORD), true));

        // Unknown user, wrong password and malformed email are
        // indistinguishable to the caller
        assert!(matches!(
            use_case.with_email("other@example.com", PASSWORD.to_string()).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            use_case.with_email(EMAIL, "wrong-password".to_string()).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            use_case.with_email("not-an-email", PASSWORD.to_string()).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_email_login_requires_verified_email() {
        let (use_case, users, _store, _sender, _tokens) = login();
        users.insert(seeded_user(PHONE, EMAIL, Some(PASSWORD), false));

        assert!(matches!(
            use_case.with_email(EMAIL, PASSWORD.to_string()).await,
            Err(AuthError::EmailNotVerified)
        ));
    }

    #[tokio::test]
    async fn test_email_login_disabled_account() {
        let (use_case, users, _store, _sender, _tokens) = login();
        let mut user = seeded_user(PHONE, EMAIL, Some(PASSWORD), true);
        user.is_active = false;
        users.insert(user);

        assert!(matches!(
            use_case.with_email(EMAIL, PASSWORD.to_string()).await,
            Err(AuthError::AccountDisabled)
        ));
    }

    #[tokio::test]
    async fn test_email_login_otp_only_account() {
        let (use_case, users, _store, _sender, _tokens) = login();
        users.insert(seeded_user(PHONE, EMAIL, None, true));

        assert!(matches!(
            use_case.with_email(EMAIL, PASSWORD.to_string()).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_mobile_login_flow() {
        let (use_case, users, _store, sender, _tokens) = login();
        users.insert(seeded_user(PHONE, EMAIL, None, false));

        use_case.send_mobile_otp(PHONE).await.unwrap();
        assert_eq!(sender.last_message().unwrap().purpose, OtpPurpose::Login);

        let code = sender.last_code().unwrap();
        let output = use_case.verify_mobile_otp(PHONE, &code).await.unwrap();
        assert_eq!(output.user.phone_number.as_str(), PHONE);

        // Single use: the same code cannot be replayed
        assert!(matches!(
            use_case.verify_mobile_otp(PHONE, &code).await,
            Err(AuthError::OtpExpiredOrNotFound)
        ));
    }

    #[tokio::test]
    async fn test_mobile_login_unknown_phone() {
        let (use_case, _users, _store, _sender, _tokens) = login();

        assert!(matches!(
            use_case.send_mobile_otp(PHONE).await,
            Err(AuthError::UserNotFound)
        ));
    }
}

#[cfg(test)]
mod email_verification_tests {
    use std::sync::Arc;

    use super::registration_tests::seeded_user;
    use crate::application::config::AuthConfig;
    use crate::application::EmailVerificationUseCase;
    use crate::domain::repository::{OtpPurpose, UserRepository};
    use crate::domain::value_object::email::Email;
    use crate::error::AuthError;
    use crate::infra::memory::{InMemoryOtpStore, InMemoryUserRepository, RecordingSender};

    const PHONE: &str = "+911234567890";
    const EMAIL: &str = "user@example.com";

    fn verification() -> (
        EmailVerificationUseCase<InMemoryUserRepository, InMemoryOtpStore, RecordingSender>,
        Arc<InMemoryUserRepository>,
        Arc<RecordingSender>,
    ) {
        let users = Arc::new(InMemoryUserRepository::new());
        let store = Arc::new(InMemoryOtpStore::new());
        let sender = Arc::new(RecordingSender::new());
        let use_case = EmailVerificationUseCase::new(
            users.clone(),
            store,
            sender.clone(),
            Arc::new(AuthConfig::development()),
        );
        (use_case, users, sender)
    }

    #[tokio::test]
    async fn test_email_verification_flow() {
        let (use_case, users, sender) = verification();
        users.insert(seeded_user(PHONE, EMAIL, None, false));

        use_case.send_otp(EMAIL).await.unwrap();
        let message = sender.last_message().unwrap();
        assert_eq!(message.purpose, OtpPurpose::EmailVerification);
        assert_eq!(message.recipient, EMAIL);

        use_case.verify_otp(EMAIL, &message.code).await.unwrap();

        let user = users
            .find_by_email(&Email::new(EMAIL).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(user.is_email_verified);
    }

    #[tokio::test]
    async fn test_send_to_unknown_email() {
        let (use_case, _users, sender) = verification();

        assert!(matches!(
            use_case.send_otp(EMAIL).await,
            Err(AuthError::UserNotFound)
        ));
        assert_eq!(sender.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_verify_without_send() {
        let (use_case, users, _sender) = verification();
        users.insert(seeded_user(PHONE, EMAIL, None, false));

        assert!(matches!(
            use_case.verify_otp(EMAIL, "123456").await,
            Err(AuthError::OtpExpiredOrNotFound)
        ));
    }
}

#[cfg(test)]
mod refresh_and_logout_tests {
    use std::sync::Arc;

    use super::registration_tests::seeded_user;
    use crate::application::config::AuthConfig;
    use crate::application::token::TokenService;
    use crate::application::{LoginUseCase, LogoutUseCase, RefreshTokenUseCase};
    use crate::error::AuthError;
    use crate::infra::memory::{InMemoryOtpStore, InMemoryUserRepository, RecordingSender};

    const PHONE: &str = "+911234567890";
    const EMAIL: &str = "user@example.com";
    const PASSWORD: &str = "secret123";

    struct Env {
        users: Arc<InMemoryUserRepository>,
        store: Arc<InMemoryOtpStore>,
        sender: Arc<RecordingSender>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    }

    fn env() -> Env {
        let config = AuthConfig::development();
        Env {
            users: Arc::new(InMemoryUserRepository::new()),
            store: Arc::new(InMemoryOtpStore::new()),
            sender: Arc::new(RecordingSender::new()),
            tokens: Arc::new(TokenService::new(&config)),
            config: Arc::new(config),
        }
    }

    impl Env {
        fn login(
            &self,
        ) -> LoginUseCase<InMemoryUserRepository, InMemoryOtpStore, RecordingSender> {
            LoginUseCase::new(
                self.users.clone(),
                self.store.clone(),
                self.sender.clone(),
                self.tokens.clone(),
                self.config.clone(),
            )
        }

        fn refresh(&self) -> RefreshTokenUseCase<InMemoryUserRepository, InMemoryOtpStore> {
            RefreshTokenUseCase::new(self.users.clone(), self.store.clone(), self.tokens.clone())
        }
    }

    #[tokio::test]
    async fn test_refresh_issues_new_access_token() {
        let env = env();
        env.users.insert(seeded_user(PHONE, EMAIL, Some(PASSWORD), true));

        let session = env
            .login()
            .with_email(EMAIL, PASSWORD.to_string())
            .await
            .unwrap();

        let access = env.refresh().execute(&session.refresh_token).await.unwrap();
        let claims = env.tokens.verify_access_token(&access).unwrap();
        assert_eq!(claims.user_id().unwrap(), session.user.user_id);
    }

    #[tokio::test]
    async fn test_stale_refresh_token_rejected_after_new_login() {
        let env = env();
        env.users.insert(seeded_user(PHONE, EMAIL, Some(PASSWORD), true));

        let first = env
            .login()
            .with_email(EMAIL, PASSWORD.to_string())
            .await
            .unwrap();
        let second = env
            .login()
            .with_email(EMAIL, PASSWORD.to_string())
            .await
            .unwrap();

        // Last-writer-wins: only the newest session's token refreshes
        assert!(matches!(
            env.refresh().execute(&first.refresh_token).await,
            Err(AuthError::TokenInvalid)
        ));
        assert!(env.refresh().execute(&second.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_access_token_rejected_at_refresh_boundary() {
        let env = env();
        env.users.insert(seeded_user(PHONE, EMAIL, Some(PASSWORD), true));

        let session = env
            .login()
            .with_email(EMAIL, PASSWORD.to_string())
            .await
            .unwrap();

        assert!(matches!(
            env.refresh().execute(&session.access_token).await,
            Err(AuthError::TokenInvalid)
        ));
    }

    #[tokio::test]
    async fn test_logout_revokes_refresh_token() {
        let env = env();
        env.users.insert(seeded_user(PHONE, EMAIL, Some(PASSWORD), true));

        let session = env
            .login()
            .with_email(EMAIL, PASSWORD.to_string())
            .await
            .unwrap();

        let logout = LogoutUseCase::new(env.users.clone(), env.store.clone());
        logout.execute(&session.user.user_id).await.unwrap();

        assert!(matches!(
            env.refresh().execute(&session.refresh_token).await,
            Err(AuthError::TokenInvalid)
        ));
    }
}

#[cfg(test)]
mod address_tests {
    use std::sync::Arc;

    use super::registration_tests::seeded_user;
    use crate::application::{AddressInput, AddressUseCase};
    use crate::domain::value_object::{AddressId, UserId};
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryUserRepository;

    const PHONE: &str = "+911234567890";
    const EMAIL: &str = "user@example.com";

    fn address_env() -> (AddressUseCase<InMemoryUserRepository>, Arc<InMemoryUserRepository>, UserId)
    {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = seeded_user(PHONE, EMAIL, None, false);
        let user_id = user.user_id;
        users.insert(user);
        (AddressUseCase::new(users.clone()), users, user_id)
    }

    fn full_address(is_default: Option<bool>) -> AddressInput {
        AddressInput {
            street: Some("1 Main St".to_string()),
            city: Some("Pune".to_string()),
            state: Some("MH".to_string()),
            postal_code: Some("411001".to_string()),
            country: Some("IN".to_string()),
            is_default,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_first_address_is_default() {
        let (use_case, _users, user_id) = address_env();

        let addresses = use_case
            .add_or_update(&user_id, full_address(Some(false)))
            .await
            .unwrap();

        assert_eq!(addresses.len(), 1);
        assert!(addresses[0].is_default);
    }

    #[tokio::test]
    async fn test_new_default_demotes_previous() {
        let (use_case, _users, user_id) = address_env();

        use_case
            .add_or_update(&user_id, full_address(None))
            .await
            .unwrap();
        let addresses = use_case
            .add_or_update(&user_id, full_address(Some(true)))
            .await
            .unwrap();

        assert_eq!(addresses.len(), 2);
        assert!(!addresses[0].is_default);
        assert!(addresses[1].is_default);
    }

    #[tokio::test]
    async fn test_edit_path_partial_merge() {
        let (use_case, _users, user_id) = address_env();

        let addresses = use_case
            .add_or_update(&user_id, full_address(None))
            .await
            .unwrap();
        let address_id = addresses[0].address_id;

        let updated = use_case
            .add_or_update(
                &user_id,
                AddressInput {
                    address_id: Some(address_id),
                    city: Some("Mumbai".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated[0].city, "Mumbai");
        assert_eq!(updated[0].street, "1 Main St");
    }

    #[tokio::test]
    async fn test_edit_unknown_address() {
        let (use_case, _users, user_id) = address_env();

        let result = use_case
            .add_or_update(
                &user_id,
                AddressInput {
                    address_id: Some(AddressId::new()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AuthError::AddressNotFound)));
    }

    #[tokio::test]
    async fn test_add_path_requires_full_shape() {
        let (use_case, _users, user_id) = address_env();

        let mut input = full_address(None);
        input.street = None;

        assert!(matches!(
            use_case.add_or_update(&user_id, input).await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let (use_case, _users, _user_id) = address_env();

        assert!(matches!(
            use_case.add_or_update(&UserId::new(), full_address(None)).await,
            Err(AuthError::UserNotFound)
        ));
    }
}
