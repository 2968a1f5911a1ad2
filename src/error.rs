// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::result;

use thiserror::Error;

use crate::{id::KeyId, range::SizeRange};

pub type Result<T, E = Error> = result::Result<T, E>;

/// Any failure an operation on a key ring can surface.
///
/// Every variant maps to a stable code (see [`Error::code`]) so callers can
/// branch on the failure kind without matching on message text.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid key: {0}")]
    InvalidKey(#[from] InvalidKey),
    #[error("invalid key ID: {0}")]
    InvalidKeyId(#[from] InvalidKeyId),
    #[error("key already exists: {0}")]
    KeyAlreadyExists(KeyId),
    #[error("no such key: {0}")]
    NoSuchKey(KeyId),
    #[error("key size must be {expected}, got {actual}")]
    InvalidKeySize { expected: SizeRange, actual: usize },
    #[error("key custom validation violated: {0}")]
    CustomValidationViolated(String),
    #[error("no available keys in key ring")]
    NoAvailableKeysInKeyRing,
}

impl Error {
    /// A stable identifier for the failure kind, safe to persist or compare
    /// across versions.
    pub const fn code(&self) -> &'static str {
        match *self {
            Self::InvalidKey(_) => "INVALID_KEY",
            Self::InvalidKeyId(_) => "INVALID_KEY_ID",
            Self::KeyAlreadyExists(_) => "KEY_ALREADY_EXISTS",
            Self::NoSuchKey(_) => "NO_SUCH_KEY",
            Self::InvalidKeySize { .. } => "INVALID_KEY_SIZE",
            Self::CustomValidationViolated(_) => "CUSTOM_VALIDATION_VIOLATED",
            Self::NoAvailableKeysInKeyRing => "NO_AVAILABLE_KEYS_IN_KEY_RING",
        }
    }
}

/// Rejections produced while normalizing key material.
///
/// The offending input is deliberately not echoed back: it may be (or wrap)
/// secret bytes.
#[derive(Error, Debug)]
pub enum InvalidKey {
    #[error("key cannot be empty")]
    Empty,
    #[error("key is not a valid hex string: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Rejections produced while validating a key identifier.
#[derive(Error, Debug)]
pub enum InvalidKeyId {
    #[error("key ID cannot be empty")]
    Empty,
    #[error("key ID is too long (got {length} characters, maximum is 255)")]
    TooLong { length: usize },
    #[error("key ID can contain only letters, numbers, underscores and dashes (found {found:?})")]
    Character { found: char },
}
