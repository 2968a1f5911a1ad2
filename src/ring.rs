// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, result};

use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::{
    error::{Error, Result},
    id::KeyId,
    key::{KeyInput, KeyMaterial},
    range::SizeRange,
    rng,
};

/// A stored key together with the identifier it was registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: KeyId,
    pub key: KeyMaterial,
}

/// Custom acceptance check over a candidate entry, returning the rejection
/// reason on refusal. Invoked synchronously during [`KeyRing::add_key`],
/// after the size policy.
pub type Validation = Box<dyn Fn(&Entry) -> result::Result<(), String> + Send + Sync>;

/// Policy configuration for a [`KeyRing`]. Both checks are optional and
/// independent; configuration is fixed once the ring is constructed.
#[derive(Default)]
pub struct Options {
    key_size: Option<SizeRange>,
    validation: Option<Validation>,
}

impl Options {
    pub const fn new() -> Self {
        Self {
            key_size: None,
            validation: None,
        }
    }

    /// Constrain the byte length of accepted key material.
    pub fn with_key_size(mut self, key_size: SizeRange) -> Self {
        self.key_size = Some(key_size);
        self
    }

    /// Install a custom acceptance check run against each candidate entry.
    pub fn with_validation<F>(mut self, validation: F) -> Self
    where
        F: Fn(&Entry) -> result::Result<(), String> + Send + Sync + 'static,
    {
        self.validation = Some(Box::new(validation));
        self
    }
}

#[derive(Debug)]
struct Slot {
    entry: Entry,
    available_for_random_pick: bool,
}

/// An in-memory registry of identified key material.
///
/// Entries are unique by identifier and immutable once stored; replacing a
/// key means removing and re-adding it. Each entry tracks whether it may be
/// returned by [`KeyRing::random_entry`], which lets a ring keep a key
/// around for reading legacy data without handing it out for new use.
/// Iteration follows insertion order.
///
/// The ring is a plain mutable value with no interior mutability; wrap it in
/// a lock if it has to be shared across threads.
#[derive(Default)]
pub struct KeyRing {
    slots: Vec<Slot>,
    options: Options,
}

impl KeyRing {
    /// An unconstrained ring: no size policy, no custom validation.
    pub fn new() -> Self {
        Self::with_options(Options::new())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            slots: Vec::new(),
            options,
        }
    }

    /// Register a key under an identifier and mark it eligible for random
    /// selection. Either every effect is applied or none is.
    ///
    /// # Errors
    ///
    /// Normalization failures propagate as [`Error::InvalidKeyId`] and
    /// [`Error::InvalidKey`]. A configured size policy rejects with
    /// [`Error::InvalidKeySize`], a custom check with
    /// [`Error::CustomValidationViolated`]. Reusing an identifier fails with
    /// [`Error::KeyAlreadyExists`] and leaves the existing entry untouched:
    /// this method refuses to act as an upsert so a key cannot be replaced
    /// by accident.
    pub fn add_key(
        &mut self,
        id: impl AsRef<str>,
        key: impl Into<KeyInput>,
    ) -> Result<&mut Self> {
        let entry = Entry {
            id: KeyId::new(id)?,
            key: key.into().into_material()?,
        };

        self.check_policy(&entry)?;

        if self.slots.iter().any(|slot| slot.entry.id == entry.id) {
            return Err(Error::KeyAlreadyExists(entry.id));
        }

        debug!("added key id={} size={}", entry.id, entry.key.len());
        self.slots.push(Slot {
            entry,
            available_for_random_pick: true,
        });
        Ok(self)
    }

    /// Remove a key and its random-pick eligibility. Removing an identifier
    /// that is not present is a no-op.
    pub fn remove_key(&mut self, id: impl AsRef<str>) -> Result<&mut Self> {
        let key_id = KeyId::new(id)?;
        let before = self.slots.len();
        self.slots.retain(|slot| slot.entry.id != key_id);
        if self.slots.len() < before {
            debug!("removed key id={key_id}");
        }
        Ok(self)
    }

    /// Stop a key from being returned by [`KeyRing::random_entry`] while
    /// keeping it retrievable by identifier. Useful for keys that must
    /// remain readable (say, for decrypting older data) but should no longer
    /// be picked for new work.
    ///
    /// # Errors
    ///
    /// [`Error::NoSuchKey`] if the identifier is not currently eligible,
    /// whether because it does not exist or because it was already excluded.
    pub fn prevent_random_pick(&mut self, id: impl AsRef<str>) -> Result<&mut Self> {
        let key_id = KeyId::new(id)?;
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.entry.id == key_id && slot.available_for_random_pick)
            .ok_or_else(|| Error::NoSuchKey(key_id.clone()))?;
        slot.available_for_random_pick = false;
        debug!("excluded key from random pick id={key_id}");
        Ok(self)
    }

    /// The stored material for an identifier, or `None` if absent.
    pub fn key_by_id(&self, id: impl AsRef<str>) -> Result<Option<&KeyMaterial>> {
        Ok(self.entry_by_id(id)?.map(|entry| &entry.key))
    }

    /// The full entry for an identifier, or `None` if absent.
    pub fn entry_by_id(&self, id: impl AsRef<str>) -> Result<Option<&Entry>> {
        let key_id = KeyId::new(id)?;
        Ok(self
            .slots
            .iter()
            .find(|slot| slot.entry.id == key_id)
            .map(|slot| &slot.entry))
    }

    /// As [`KeyRing::key_by_id`], but absence is an [`Error::NoSuchKey`].
    pub fn assert_key_by_id(&self, id: impl AsRef<str>) -> Result<&KeyMaterial> {
        Ok(&self.assert_entry_by_id(id)?.key)
    }

    /// As [`KeyRing::entry_by_id`], but absence is an [`Error::NoSuchKey`].
    pub fn assert_entry_by_id(&self, id: impl AsRef<str>) -> Result<&Entry> {
        let key_id = KeyId::new(id)?;
        self.slots
            .iter()
            .find(|slot| slot.entry.id == key_id)
            .map(|slot| &slot.entry)
            .ok_or(Error::NoSuchKey(key_id))
    }

    /// A uniformly random entry among those currently eligible, sampled
    /// fresh on every call.
    ///
    /// # Errors
    ///
    /// [`Error::NoAvailableKeysInKeyRing`] when nothing is eligible, which
    /// includes a non-empty ring whose every entry has been excluded via
    /// [`KeyRing::prevent_random_pick`].
    pub fn random_entry(&self) -> Result<&Entry> {
        rng::with(|rng| self.random_entry_with(rng))
    }

    /// As [`KeyRing::random_entry`], with a caller-supplied generator.
    pub fn random_entry_with<R>(&self, rng: &mut R) -> Result<&Entry>
    where
        R: Rng + ?Sized,
    {
        let candidates: Vec<&Entry> = self
            .slots
            .iter()
            .filter(|slot| slot.available_for_random_pick)
            .map(|slot| &slot.entry)
            .collect();
        candidates
            .choose(rng)
            .copied()
            .ok_or(Error::NoAvailableKeysInKeyRing)
    }

    /// Whether the identifier is currently eligible for random selection.
    pub fn is_random_pick_candidate(&self, id: impl AsRef<str>) -> Result<bool> {
        let key_id = KeyId::new(id)?;
        Ok(self
            .slots
            .iter()
            .any(|slot| slot.entry.id == key_id && slot.available_for_random_pick))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Stored entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.slots.iter().map(|slot| &slot.entry)
    }

    /// Stored identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &KeyId> {
        self.entries().map(|entry| &entry.id)
    }

    fn check_policy(&self, entry: &Entry) -> Result<()> {
        if let Some(key_size) = self.options.key_size {
            let actual = entry.key.len();
            if !key_size.contains(actual) {
                return Err(Error::InvalidKeySize {
                    expected: key_size,
                    actual,
                });
            }
        }

        if let Some(validation) = &self.options.validation {
            validation(entry).map_err(Error::CustomValidationViolated)?;
        }

        Ok(())
    }
}

impl fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRing")
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}
