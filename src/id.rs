// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidKeyId;

const MAX_LENGTH: usize = 255;

/// A validated identifier naming a key ring entry.
///
/// Surrounding whitespace is trimmed away; the trimmed value must be
/// non-empty, at most 255 characters and consist only of letters, numbers,
/// underscores and dashes. Case is preserved, so `"Primary"` and `"primary"`
/// name different entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyId(String);

impl KeyId {
    pub fn new(input: impl AsRef<str>) -> Result<Self, InvalidKeyId> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InvalidKeyId::Empty);
        }

        let length = trimmed.chars().count();
        if length > MAX_LENGTH {
            return Err(InvalidKeyId::TooLong { length });
        }

        if let Some(found) = trimmed.chars().find(|ch| !is_allowed(*ch)) {
            return Err(InvalidKeyId::Character { found });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const fn is_allowed(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for KeyId {
    type Error = InvalidKeyId;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for KeyId {
    type Error = InvalidKeyId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<KeyId> for String {
    fn from(value: KeyId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    use super::*;

    #[test]
    fn trims_surrounding_whitespace() -> Result<(), InvalidKeyId> {
        let id = KeyId::new("  primary \t")?;
        assert_eq!(id.as_str(), "primary");
        Ok(())
    }

    #[test]
    fn preserves_case() -> Result<(), InvalidKeyId> {
        let id = KeyId::new("Primary-2024_A")?;
        assert_eq!(id.as_str(), "Primary-2024_A");
        assert_ne!(id, KeyId::new("primary-2024_a")?);
        Ok(())
    }

    #[test]
    fn rejects_empty_and_whitespace_only() {
        assert!(matches!(KeyId::new(""), Err(InvalidKeyId::Empty)));
        assert!(matches!(KeyId::new("   "), Err(InvalidKeyId::Empty)));
    }

    #[test]
    fn rejects_overlong() {
        let ok = "a".repeat(255);
        assert!(KeyId::new(ok).is_ok());

        let long = "a".repeat(256);
        assert!(matches!(
            KeyId::new(long),
            Err(InvalidKeyId::TooLong { length: 256 })
        ));
    }

    #[test]
    fn rejects_disallowed_characters() {
        assert!(matches!(
            KeyId::new("no spaces"),
            Err(InvalidKeyId::Character { found: ' ' })
        ));
        assert!(matches!(
            KeyId::new("dot.separated"),
            Err(InvalidKeyId::Character { found: '.' })
        ));
        assert!(matches!(
            KeyId::new("kéy"),
            Err(InvalidKeyId::Character { found: 'é' })
        ));
    }

    #[test]
    fn serde_round_trip() -> Result<(), InvalidKeyId> {
        let id = KeyId::new("key-1")?;
        assert_tokens(&id, &[Token::Str("key-1")]);
        Ok(())
    }

    #[test]
    fn serde_revalidates_on_deserialize() {
        assert_de_tokens_error::<KeyId>(
            &[Token::Str("no spaces")],
            "key ID can contain only letters, numbers, underscores and dashes (found ' ')",
        );
    }
}
