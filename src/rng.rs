// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use rand::{thread_rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

thread_local! {
    // LINT: Without a working random number generator there is no way to
    // pick keys at all.
    #[allow(clippy::expect_used)]
    static RNG: RefCell<ChaCha20Rng> = RefCell::new(ChaCha20Rng::from_rng(thread_rng()).expect("random number generator failed to initialize"));
}

/// Run a closure against the thread-local RNG backing
/// [`crate::KeyRing::random_entry`]. Callers that need determinism pass
/// their own generator to [`crate::KeyRing::random_entry_with`] instead.
pub(crate) fn with<F, R>(mut f: F) -> R
where
    F: FnMut(&mut ChaCha20Rng) -> R,
{
    RNG.with(|rng| f(&mut rng.borrow_mut()))
}
