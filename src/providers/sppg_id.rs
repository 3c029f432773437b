use rand::Rng;

use crate::errors::internal::SppgError;

/// Length of every SPPG id
pub const SPPG_ID_LENGTH: usize = 8;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a random id of eight uppercase letters
pub fn generate_sppg_id() -> String {
    let mut rng = rand::rng();

    (0..SPPG_ID_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validate a supplied id and bring it to canonical (uppercase) form
pub fn normalize_sppg_id(raw: &str) -> Result<String, SppgError> {
    let trimmed = raw.trim();

    if trimmed.len() != SPPG_ID_LENGTH || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SppgError::InvalidId(raw.to_owned()));
    }

    Ok(trimmed.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_eight_uppercase_letters() {
        for _ in 0..100 {
            let id = generate_sppg_id();
            assert_eq!(id.len(), SPPG_ID_LENGTH);
            assert!(id.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_normalize_uppercases() {
        assert_eq!(normalize_sppg_id(" abcdEFGH ").unwrap(), "ABCDEFGH");
    }

    #[test]
    fn test_normalize_rejects_bad_ids() {
        assert!(normalize_sppg_id("ABC").is_err());
        assert!(normalize_sppg_id("ABCDEFG1").is_err());
        assert!(normalize_sppg_id("ABCDEFGHI").is_err());
        assert!(normalize_sppg_id("").is_err());
    }
}
