//! PostgreSQL User Repository

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::user::{Address, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId, email::Email, phone_number::PhoneNumber, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(&self, column: &str, value: &str) -> AuthResult<Option<User>> {
        let query = format!(
            r#"
            SELECT
                user_id,
                phone_number,
                email,
                name,
                password_hash,
                is_phone_verified,
                is_email_verified,
                user_role,
                addresses,
                refresh_token,
                last_login_at,
                is_active,
                created_at,
                updated_at
            FROM users
            WHERE {} = $1
            "#,
            column
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                phone_number,
                email,
                name,
                password_hash,
                is_phone_verified,
                is_email_verified,
                user_role,
                addresses,
                refresh_token,
                last_login_at,
                is_active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.phone_number.as_str())
        .bind(user.email.as_str())
        .bind(user.name.as_deref())
        .bind(user.password.as_ref().map(|p| p.as_phc_string()))
        .bind(user.is_phone_verified)
        .bind(user.is_email_verified)
        .bind(user.role.id())
        .bind(Json(&user.addresses))
        .bind(user.refresh_token.as_deref())
        .bind(user.last_login_at)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // Unique-violation race between the pre-check and the insert
            Err(e) => Err(map_unique_violation(e)),
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                phone_number,
                email,
                name,
                password_hash,
                is_phone_verified,
                is_email_verified,
                user_role,
                addresses,
                refresh_token,
                last_login_at,
                is_active,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_phone(&self, phone_number: &PhoneNumber) -> AuthResult<Option<User>> {
        self.fetch_one_by("phone_number", phone_number.as_str())
            .await
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.fetch_one_by("email", email.as_str()).await
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                password_hash = $3,
                is_phone_verified = $4,
                is_email_verified = $5,
                user_role = $6,
                addresses = $7,
                refresh_token = $8,
                last_login_at = $9,
                is_active = $10,
                updated_at = $11
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_deref())
        .bind(user.password.as_ref().map(|p| p.as_phc_string()))
        .bind(user.is_phone_verified)
        .bind(user.is_email_verified)
        .bind(user.role.id())
        .bind(Json(&user.addresses))
        .bind(user.refresh_token.as_deref())
        .bind(user.last_login_at)
        .bind(user.is_active)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn map_unique_violation(e: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some("23505") {
            return match db.constraint() {
                Some(c) if c.contains("phone") => AuthError::PhoneTaken,
                Some(c) if c.contains("email") => AuthError::EmailTaken,
                _ => AuthError::PhoneTaken,
            };
        }
    }
    AuthError::Database(e)
}

/// Database row for the users table
#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    phone_number: String,
    email: String,
    name: Option<String>,
    password_hash: Option<String>,
    is_phone_verified: bool,
    is_email_verified: bool,
    user_role: i16,
    addresses: Json<Vec<Address>>,
    refresh_token: Option<String>,
    last_login_at: Option<DateTime<Utc>>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password = self
            .password_hash
            .map(HashedPassword::from_phc_string)
            .transpose()
            .map_err(|e| AuthError::Internal(format!("Corrupt password hash: {}", e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            phone_number: PhoneNumber::from_db(self.phone_number),
            email: Email::from_db(self.email),
            name: self.name,
            password,
            is_phone_verified: self.is_phone_verified,
            is_email_verified: self.is_email_verified,
            role: UserRole::from_id(self.user_role),
            addresses: self.addresses.0,
            refresh_token: self.refresh_token,
            last_login_at: self.last_login_at,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
