//! One-way password encoding.

use argon2::{
    Algorithm, Argon2, AssociatedData, Params, ParamsBuilder, Version,
    password_hash::{PasswordHash, PasswordHasher, SaltString, rand_core::OsRng},
};
use sha2::{Digest, Sha256};

use crate::error::{UserError, UserResult};
use crate::models::{User, UserDraft};

/// The identity a password is bound to.
pub trait PasswordSubject {
    fn username(&self) -> &str;
}

impl PasswordSubject for UserDraft {
    fn username(&self) -> &str {
        &self.username
    }
}

impl PasswordSubject for User {
    fn username(&self) -> &str {
        &self.username
    }
}

/// Encodes plaintext passwords for storage.
///
/// The subject is part of the input, so an encoded value copied onto another
/// account does not verify there.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, subject: &dyn PasswordSubject, plaintext: &str) -> UserResult<String>;

    fn verify(
        &self,
        subject: &dyn PasswordSubject,
        plaintext: &str,
        encoded: &str,
    ) -> UserResult<bool>;
}

/// Argon2id encoder producing PHC strings.
///
/// A fresh random salt is drawn per password. The SHA-256 digest of the
/// username is mixed in as Argon2 associated data.
#[derive(Debug, Clone)]
pub struct Argon2PasswordEncoder {
    m_cost: u32,
    t_cost: u32,
    p_cost: u32,
}

impl Argon2PasswordEncoder {
    /// Encoder with explicit cost parameters (memory in KiB, iterations,
    /// lanes).
    pub fn new(m_cost: u32, t_cost: u32, p_cost: u32) -> Self {
        Self {
            m_cost,
            t_cost,
            p_cost,
        }
    }

    fn hasher_for(&self, subject: &dyn PasswordSubject) -> UserResult<Argon2<'static>> {
        let digest = Sha256::digest(subject.username().as_bytes());
        let data = AssociatedData::new(&digest).map_err(encoding_error)?;

        let params = ParamsBuilder::new()
            .m_cost(self.m_cost)
            .t_cost(self.t_cost)
            .p_cost(self.p_cost)
            .data(data)
            .build()
            .map_err(encoding_error)?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for Argon2PasswordEncoder {
    fn default() -> Self {
        Self::new(
            Params::DEFAULT_M_COST,
            Params::DEFAULT_T_COST,
            Params::DEFAULT_P_COST,
        )
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, subject: &dyn PasswordSubject, plaintext: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher_for(subject)?
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(encoding_error)?;

        Ok(hash.to_string())
    }

    fn verify(
        &self,
        subject: &dyn PasswordSubject,
        plaintext: &str,
        encoded: &str,
    ) -> UserResult<bool> {
        let parsed = PasswordHash::new(encoded).map_err(encoding_error)?;
        let salt = parsed
            .salt
            .ok_or_else(|| UserError::PasswordEncoding("encoded password has no salt".into()))?;

        let candidate = self
            .hasher_for(subject)?
            .hash_password(plaintext.as_bytes(), salt)
            .map_err(encoding_error)?;

        Ok(candidate.hash.is_some() && candidate.hash == parsed.hash)
    }
}

fn encoding_error(e: impl std::fmt::Display) -> UserError {
    UserError::PasswordEncoding(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> Argon2PasswordEncoder {
        Argon2PasswordEncoder::new(1024, 1, 1)
    }

    fn draft(username: &str) -> UserDraft {
        UserDraft {
            username: username.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_encode_produces_argon2id_phc_string() {
        let encoded = encoder().encode(&draft("ana"), "secret").unwrap();
        assert_ne!(encoded, "secret");
        assert!(encoded.starts_with("$argon2id$"));
    }

    #[test]
    fn test_encode_uses_fresh_salt() {
        let first = encoder().encode(&draft("ana"), "secret").unwrap();
        let second = encoder().encode(&draft("ana"), "secret").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_round_trip() {
        let encoder = encoder();
        let encoded = encoder.encode(&draft("ana"), "secret").unwrap();

        assert!(encoder.verify(&draft("ana"), "secret", &encoded).unwrap());
        assert!(!encoder.verify(&draft("ana"), "wrong", &encoded).unwrap());
    }

    #[test]
    fn test_verify_is_bound_to_username() {
        let encoder = encoder();
        let encoded = encoder.encode(&draft("ana"), "secret").unwrap();

        assert!(!encoder.verify(&draft("bob"), "secret", &encoded).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let result = encoder().verify(&draft("ana"), "secret", "not-a-hash");
        assert!(matches!(result, Err(UserError::PasswordEncoding(_))));
    }
}
