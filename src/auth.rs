//! Staff accounts — registration gated by the admin registration key,
//! PBKDF2 password hashing, credential verification.
//!
//! Session tokens live in [`crate::api::types::SessionStore`]; this
//! module owns only the durable account records.

use pbkdf2::password_hash::rand_core::OsRng;
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::Pbkdf2;
use rusqlite::{params, Connection};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::repository::employee::insert_employee;
use crate::db::repository::parse_uuid;
use crate::db::DatabaseError;
use crate::models::enums::EmployeeStatus;
use crate::models::Employee;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Registration key is incorrect")]
    InvalidRegistrationKey,

    #[error("Registration is disabled (no registration key configured)")]
    RegistrationDisabled,

    #[error("Phone number must be exactly 10 digits")]
    InvalidPhone,

    #[error("An account with that email already exists")]
    EmailTaken,

    #[error("Email or password is incorrect")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Password(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// A staff login account. The matching employee row is created at signup.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    password_hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub specialty: String,
    pub registration_key: String,
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Pbkdf2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Password(e.to_string()))?
        .to_string())
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok()
}

/// Register a staff member: validates the registration key and phone,
/// then creates the login account and its employee record together.
pub fn signup(
    conn: &Connection,
    expected_key: Option<&str>,
    request: &SignupRequest,
) -> Result<User, AuthError> {
    let expected = expected_key.ok_or(AuthError::RegistrationDisabled)?;
    if request.registration_key != expected {
        return Err(AuthError::InvalidRegistrationKey);
    }

    if request.phone.len() != 10 || !request.phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AuthError::InvalidPhone);
    }

    let user = User {
        id: Uuid::new_v4(),
        name: request.name.clone(),
        email: request.email.clone(),
        password_hash: hash_password(&request.password)?,
    };

    conn.execute(
        "INSERT INTO users (id, name, email, password_hash, created_at)
         VALUES (?1, ?2, ?3, ?4, datetime('now'))",
        params![user.id.to_string(), user.name, user.email, user.password_hash],
    )
    .map_err(|e| {
        let db_err = DatabaseError::from(e);
        if db_err.is_constraint_violation() {
            AuthError::EmailTaken
        } else {
            AuthError::Database(db_err)
        }
    })?;

    insert_employee(
        conn,
        &Employee {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            email: Some(request.email.clone()),
            phone: Some(request.phone.clone()),
            specialty: Some(request.specialty.clone()),
            photo: None,
            status: EmployeeStatus::Active,
        },
    )?;

    tracing::info!(user_id = %user.id, email = %user.email, "Staff account registered");
    Ok(user)
}

/// Verify credentials and return the account.
pub fn login(conn: &Connection, email: &str, password: &str) -> Result<User, AuthError> {
    let mut stmt = conn
        .prepare("SELECT id, name, email, password_hash FROM users WHERE email = ?1")
        .map_err(DatabaseError::from)?;

    let result = stmt.query_row(params![email], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    });

    let (id, name, email, password_hash) = match result {
        Ok(raw) => raw,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(AuthError::InvalidCredentials),
        Err(e) => return Err(AuthError::Database(e.into())),
    };

    if !verify_password(password, &password_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(User {
        id: parse_uuid(&id)?,
        name,
        email,
        password_hash,
    })
}
