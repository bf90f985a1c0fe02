use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::user::NewUser;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{ADMIN_ROLE, CUSTOMER_ROLE};

/// Registers a new account and returns the session payload for it.
///
/// The very first account becomes the store administrator; everyone after
/// that is a customer.
pub fn register<R>(repo: &R, form: RegisterForm) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader + UserWriter + ?Sized,
{
    let data = form
        .into_registration()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let existing = repo
        .get_user_by_email(&data.email)
        .map_err(ServiceError::from)?;
    if existing.is_some() {
        return Err(ServiceError::InvalidRequest(
            "an account with this email already exists".to_string(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(data.password.as_bytes(), &salt)
        .map_err(|err| {
            log::error!("password hashing failed: {err}");
            ServiceError::Transaction
        })?
        .to_string();

    let admins = repo
        .count_users_by_role(ADMIN_ROLE)
        .map_err(ServiceError::from)?;
    let role = if admins == 0 { ADMIN_ROLE } else { CUSTOMER_ROLE };

    let mut new_user = NewUser::new(data.name, data.email, password_hash, role);
    if let Some(phone) = data.phone {
        new_user = new_user.with_phone(phone);
    }

    let user = repo.create_user(&new_user).map_err(ServiceError::from)?;
    log::info!("user {} registered with role {}", user.id, user.role);

    Ok(AuthenticatedUser::from(&user))
}

/// Checks credentials and returns the session payload.
///
/// Unknown email and wrong password produce the same error so the login
/// page cannot be used to probe for accounts.
pub fn login<R>(repo: &R, form: LoginForm) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader + ?Sized,
{
    let (email, password) = form
        .sanitized()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let user = repo
        .get_user_by_email(&email)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::Unauthorized)?;

    let parsed_hash =
        PasswordHash::new(&user.password_hash).map_err(|_| ServiceError::Unauthorized)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| ServiceError::Unauthorized)?;

    Ok(AuthenticatedUser::from(&user))
}
