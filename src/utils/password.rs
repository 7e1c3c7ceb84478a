use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::ErrorMessage;

const MAX_PASSWORD_LENGTH: usize = 64;

pub fn hash(password: impl Into<String>) -> Result<String, ErrorMessage> {
    let password = password.into();

    if password.is_empty() {
        return Err(ErrorMessage::EmptyPassword);
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ErrorMessage::ExceededMaxPasswordLength(MAX_PASSWORD_LENGTH));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hashed_password = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| ErrorMessage::HashingError)?
        .to_string();

    Ok(hashed_password)
}

pub fn compare(password: &str, hashed_password: &str) -> Result<bool, ErrorMessage> {
    if password.is_empty() {
        return Err(ErrorMessage::EmptyPassword);
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ErrorMessage::ExceededMaxPasswordLength(MAX_PASSWORD_LENGTH));
    }

    let parsed_hash =
        PasswordHash::new(hashed_password).map_err(|_| ErrorMessage::InvalidHashFormat)?;

    let password_matched = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_or(false, |_| true);

    Ok(password_matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_compare() {
        let hashed = hash("correct horse").unwrap();
        assert_ne!(hashed, "correct horse");
        assert_eq!(compare("correct horse", &hashed), Ok(true));
        assert_eq!(compare("wrong horse", &hashed), Ok(false));
    }

    #[test]
    fn rejects_empty_and_oversized_passwords() {
        assert_eq!(hash(""), Err(ErrorMessage::EmptyPassword));
        assert_eq!(
            hash("x".repeat(MAX_PASSWORD_LENGTH + 1)),
            Err(ErrorMessage::ExceededMaxPasswordLength(MAX_PASSWORD_LENGTH))
        );
        assert_eq!(compare("secret", "not-a-hash"), Err(ErrorMessage::InvalidHashFormat));
    }
}
