use std::env;

/// Lowest and highest work factors bcrypt accepts.
pub const MIN_SALT_ROUNDS: u32 = 4;
pub const MAX_SALT_ROUNDS: u32 = 31;

const DEFAULT_SALT_ROUNDS: u32 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BcryptConfig {
    pub salt_rounds: u32,
}

impl BcryptConfig {
    pub fn new(salt_rounds: u32) -> Self {
        Self {
            salt_rounds: salt_rounds.clamp(MIN_SALT_ROUNDS, MAX_SALT_ROUNDS),
        }
    }

    pub fn from_env() -> Self {
        let salt_rounds = env::var("BCRYPT_SALT_ROUNDS")
            .ok()
            .and_then(|s| match s.trim().parse::<u32>() {
                Ok(rounds) => Some(rounds),
                Err(_) => {
                    tracing::warn!(value = %s, "ignoring unparsable BCRYPT_SALT_ROUNDS");
                    None
                }
            })
            .unwrap_or(DEFAULT_SALT_ROUNDS);

        Self::new(salt_rounds)
    }
}

impl Default for BcryptConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SALT_ROUNDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_bcrypt_range() {
        assert_eq!(BcryptConfig::new(1).salt_rounds, MIN_SALT_ROUNDS);
        assert_eq!(BcryptConfig::new(40).salt_rounds, MAX_SALT_ROUNDS);
        assert_eq!(BcryptConfig::new(10).salt_rounds, 10);
    }

    #[test]
    fn default_is_twelve_rounds() {
        assert_eq!(BcryptConfig::default().salt_rounds, 12);
    }
}
