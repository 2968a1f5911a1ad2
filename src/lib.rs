// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! An in-memory registry for cryptographic key material.
//!
//! A [`KeyRing`] stores secret byte strings under validated identifiers,
//! enforces an optional size policy and custom acceptance check at insert
//! time, and hands keys back by identifier or by uniform random selection.
//! That is the shape needed by callers that want "the current key" during
//! rotation while older keys stay readable.
//!
//! Key material is accepted as raw bytes, as a hex-encoded string, or as an
//! already secret-wrapped value, and is normalized into a single
//! [`KeyMaterial`] representation whose `Debug` output never contains the
//! bytes. The ring performs no cryptography itself: it validates, stores and
//! selects.
//!
//! ```
//! use kring::{KeyRing, Options, SizeRange};
//!
//! # fn main() -> kring::Result<()> {
//! let mut ring = KeyRing::with_options(
//!     Options::new().with_key_size(SizeRange::between(16, 64)),
//! );
//!
//! _ = ring
//!     .add_key("current", "b088e7ec4a6cc7b218851bd91c4b1033")?
//!     .add_key("legacy", vec![0x42; 32])?;
//! _ = ring.prevent_random_pick("legacy")?;
//!
//! // Only "current" is eligible for selection now...
//! let entry = ring.random_entry()?;
//! assert_eq!(entry.id.as_str(), "current");
//!
//! // ...but "legacy" is still there for reading old data.
//! let legacy = ring.assert_key_by_id("legacy")?;
//! assert_eq!(legacy.expose_secret(), &[0x42; 32][..]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod error;
mod id;
mod key;
mod range;
mod ring;
mod rng;

pub use crate::{
    error::{Error, InvalidKey, InvalidKeyId, Result},
    id::KeyId,
    key::{KeyInput, KeyMaterial},
    range::SizeRange,
    ring::{Entry, KeyRing, Options, Validation},
};
