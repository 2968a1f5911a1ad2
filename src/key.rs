// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use secrecy::{ExposeSecret, Secret, SecretString, SecretVec};
use subtle::ConstantTimeEq;

use crate::error::InvalidKey;

/// Byte buffer backing [`KeyMaterial`], zeroized on drop.
#[derive(Clone, Eq)]
struct KeyBytes(Vec<u8>);

impl PartialEq for KeyBytes {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).unwrap_u8() == 1
    }
}

impl secrecy::Zeroize for KeyBytes {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl secrecy::CloneableSecret for KeyBytes {}

impl secrecy::DebugSecret for KeyBytes {}

/// The canonical, secret-wrapped representation of a key's bytes.
///
/// The raw bytes are reachable only through [`KeyMaterial::expose_secret`],
/// so they cannot end up in log output or a stray `{:?}` by accident.
/// Equality is constant-time.
#[derive(Clone)]
pub struct KeyMaterial(Secret<KeyBytes>);

impl KeyMaterial {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Secret::new(KeyBytes(bytes)))
    }

    /// The raw key bytes. Exposure is explicit so call sites stay auditable.
    pub fn expose_secret(&self) -> &[u8] {
        &self.0.expose_secret().0
    }

    /// Byte length of the key.
    pub fn len(&self) -> usize {
        self.0.expose_secret().0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialEq for KeyMaterial {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for KeyMaterial {}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMaterial([REDACTED {} bytes])", self.len())
    }
}

/// An accepted input shape for key material, normalized by
/// [`KeyInput::into_material`] into a single canonical representation.
pub enum KeyInput {
    /// Raw bytes, used verbatim.
    Raw(Vec<u8>),
    /// A hex-encoded string, decoded to bytes. Must be non-empty, of even
    /// length and contain only hex digits (either case).
    Hex(String),
    /// Secret-wrapped raw bytes; unwrapped once, then used verbatim.
    WrappedRaw(SecretVec<u8>),
    /// A secret-wrapped hex string; unwrapped once, then decoded.
    WrappedHex(SecretString),
}

impl KeyInput {
    /// Resolve the input into canonical [`KeyMaterial`].
    ///
    /// The result is secret-wrapped regardless of whether the input arrived
    /// wrapped. Invalid hex is rejected, never truncated or padded.
    ///
    /// # Errors
    ///
    /// [`InvalidKey::Empty`] for an empty string, [`InvalidKey::Hex`] for a
    /// string that is not even-length hex.
    pub fn into_material(self) -> Result<KeyMaterial, InvalidKey> {
        match self {
            Self::Raw(bytes) => Ok(KeyMaterial::new(bytes)),
            Self::Hex(text) => {
                if text.is_empty() {
                    return Err(InvalidKey::Empty);
                }
                Ok(KeyMaterial::new(hex::decode(text)?))
            }
            Self::WrappedRaw(secret) => Self::Raw(secret.expose_secret().clone()).into_material(),
            Self::WrappedHex(secret) => Self::Hex(secret.expose_secret().clone()).into_material(),
        }
    }
}

impl fmt::Debug for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Raw(ref bytes) => write!(f, "KeyInput::Raw([REDACTED {} bytes])", bytes.len()),
            Self::Hex(_) => f.write_str("KeyInput::Hex([REDACTED])"),
            Self::WrappedRaw(_) => f.write_str("KeyInput::WrappedRaw([REDACTED])"),
            Self::WrappedHex(_) => f.write_str("KeyInput::WrappedHex([REDACTED])"),
        }
    }
}

impl From<Vec<u8>> for KeyInput {
    fn from(value: Vec<u8>) -> Self {
        Self::Raw(value)
    }
}

impl From<&[u8]> for KeyInput {
    fn from(value: &[u8]) -> Self {
        Self::Raw(value.to_vec())
    }
}

impl From<String> for KeyInput {
    fn from(value: String) -> Self {
        Self::Hex(value)
    }
}

impl From<&str> for KeyInput {
    fn from(value: &str) -> Self {
        Self::Hex(value.to_owned())
    }
}

impl From<SecretVec<u8>> for KeyInput {
    fn from(value: SecretVec<u8>) -> Self {
        Self::WrappedRaw(value)
    }
}

impl From<SecretString> for KeyInput {
    fn from(value: SecretString) -> Self {
        Self::WrappedHex(value)
    }
}

impl From<KeyMaterial> for KeyInput {
    fn from(value: KeyMaterial) -> Self {
        Self::WrappedRaw(SecretVec::new(value.expose_secret().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "b088e7ec4a6cc7b218851bd91c4b1033";

    #[test]
    fn raw_bytes_are_used_verbatim() -> Result<(), InvalidKey> {
        let material = KeyInput::from(vec![1_u8, 2, 3]).into_material()?;
        assert_eq!(material.expose_secret(), &[1, 2, 3]);
        Ok(())
    }

    #[test]
    fn empty_raw_bytes_are_accepted() -> Result<(), InvalidKey> {
        let material = KeyInput::from(Vec::new()).into_material()?;
        assert!(material.is_empty());
        Ok(())
    }

    #[test]
    fn hex_string_is_decoded() -> Result<(), InvalidKey> {
        let material = KeyInput::from(HEX).into_material()?;
        assert_eq!(material.len(), 16);
        assert_eq!(material.expose_secret(), hex::decode(HEX)?.as_slice());
        Ok(())
    }

    #[test]
    fn hex_matching_is_case_insensitive() -> Result<(), InvalidKey> {
        let lower = KeyInput::from("aabbcc").into_material()?;
        let upper = KeyInput::from("AABBCC").into_material()?;
        assert_eq!(lower, upper);
        Ok(())
    }

    #[test]
    fn non_hex_string_is_rejected() {
        assert!(matches!(
            KeyInput::from("test").into_material(),
            Err(InvalidKey::Hex(_))
        ));
    }

    #[test]
    fn odd_length_hex_is_rejected() {
        assert!(matches!(
            KeyInput::from("abc").into_material(),
            Err(InvalidKey::Hex(_))
        ));
    }

    #[test]
    fn empty_string_is_rejected() {
        assert!(matches!(
            KeyInput::from("").into_material(),
            Err(InvalidKey::Empty)
        ));
    }

    #[test]
    fn wrapped_raw_bytes_are_unwrapped_and_rewrapped() -> Result<(), InvalidKey> {
        let wrapped = SecretVec::new(vec![7_u8; 4]);
        let material = KeyInput::from(wrapped).into_material()?;
        assert_eq!(material.expose_secret(), &[7; 4]);
        Ok(())
    }

    #[test]
    fn wrapped_hex_string_is_still_decoded() -> Result<(), InvalidKey> {
        let wrapped = SecretString::new(HEX.to_owned());
        let material = KeyInput::from(wrapped).into_material()?;
        assert_eq!(material.len(), 16);
        Ok(())
    }

    #[test]
    fn wrapped_non_hex_string_is_rejected() {
        let wrapped = SecretString::new("test".to_owned());
        assert!(matches!(
            KeyInput::from(wrapped).into_material(),
            Err(InvalidKey::Hex(_))
        ));
    }

    #[test]
    fn renormalizing_material_keeps_bytes() -> Result<(), InvalidKey> {
        let original = KeyInput::from(HEX).into_material()?;
        let roundtripped = KeyInput::from(original.clone()).into_material()?;
        assert_eq!(original, roundtripped);
        Ok(())
    }

    #[test]
    fn debug_output_is_redacted() -> Result<(), InvalidKey> {
        let material = KeyInput::from(HEX).into_material()?;
        let rendered = format!("{material:?}");
        assert_eq!(rendered, "KeyMaterial([REDACTED 16 bytes])");
        assert!(!rendered.contains("b088"));
        Ok(())
    }

    #[test]
    fn equality_tracks_bytes_not_length() -> Result<(), InvalidKey> {
        let a = KeyInput::from("aabb").into_material()?;
        let b = KeyInput::from("aabb").into_material()?;
        let c = KeyInput::from("aacc").into_material()?;
        assert_eq!(a, b);
        assert_ne!(a, c);
        Ok(())
    }
}
