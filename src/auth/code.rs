//! One-time login code generation.

use anyhow::{Context, Result};
use rand::{rngs::OsRng, RngCore};

/// Codes are fixed-width decimal so they survive copy/paste and voice relay.
pub const CODE_LENGTH: usize = 6;

const CODE_MIN: u32 = 100_000;
const CODE_SPAN: u32 = 900_000;

/// Generate a fresh 6-digit login code in `[100000, 999999]`.
///
/// Draws from the OS CSPRNG with rejection sampling so every code in the
/// range is equally likely. Called exactly once per newly opened challenge
/// round; codes are never reused across rounds.
///
/// # Errors
/// Returns an error if the OS random source fails.
pub fn generate_login_code() -> Result<String> {
    loop {
        let mut bytes = [0u8; 4];
        OsRng
            .try_fill_bytes(&mut bytes)
            .context("failed to generate login code")?;
        // Keep 20 bits and reject values outside the span instead of taking a
        // modulus, which would skew the low end of the range.
        let value = u32::from_be_bytes(bytes) >> 12;
        if value < CODE_SPAN {
            return Ok((CODE_MIN + value).to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn code_is_six_decimal_digits() -> Result<()> {
        let code = generate_login_code()?;
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        Ok(())
    }

    #[test]
    fn code_is_in_range() -> Result<()> {
        for _ in 0..32 {
            let value: u32 = generate_login_code()?.parse()?;
            assert!((100_000..=999_999).contains(&value));
        }
        Ok(())
    }

    #[test]
    fn consecutive_codes_vary() -> Result<()> {
        let codes: Vec<String> = (0..8)
            .map(|_| generate_login_code())
            .collect::<Result<_>>()?;
        let first = &codes[0];
        assert!(
            codes.iter().any(|code| code != first),
            "eight identical codes from a uniform generator"
        );
        Ok(())
    }
}
