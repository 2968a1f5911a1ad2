// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

/// An inclusive size constraint with an optional lower and upper bound.
///
/// Used by [`crate::KeyRing`] to bound the byte length of stored key
/// material. The rendering ("at least N", "at most N", "between N and M")
/// appears in size-policy error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<usize>,
}

impl SizeRange {
    /// A range with only a lower bound.
    pub const fn at_least(start: usize) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// A range with only an upper bound.
    pub const fn at_most(end: usize) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// A range bounded on both sides.
    pub const fn between(start: usize, end: usize) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub const fn start(&self) -> Option<usize> {
        self.start
    }

    pub const fn end(&self) -> Option<usize> {
        self.end
    }

    /// Whether the value satisfies both bounds. Bounds are inclusive.
    pub const fn contains(&self, value: usize) -> bool {
        let above = match self.start {
            Some(start) => value >= start,
            None => true,
        };
        let below = match self.end {
            Some(end) => value <= end,
            None => true,
        };
        above && below
    }
}

impl fmt::Display for SizeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, "between {start} and {end}"),
            (Some(start), None) => write!(f, "at least {start}"),
            (None, Some(end)) => write!(f, "at most {end}"),
            (None, None) => f.write_str("any size"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least_is_inclusive() {
        let range = SizeRange::at_least(50);
        assert!(range.contains(50));
        assert!(range.contains(51));
        assert!(!range.contains(49));
    }

    #[test]
    fn at_most_is_inclusive() {
        let range = SizeRange::at_most(150);
        assert!(range.contains(150));
        assert!(range.contains(0));
        assert!(!range.contains(151));
    }

    #[test]
    fn between_enforces_both_bounds() {
        let range = SizeRange::between(50, 150);
        assert!(range.contains(50));
        assert!(range.contains(150));
        assert!(!range.contains(49));
        assert!(!range.contains(151));
    }

    #[test]
    fn display_describes_bounds() {
        assert_eq!(SizeRange::at_least(50).to_string(), "at least 50");
        assert_eq!(SizeRange::at_most(150).to_string(), "at most 150");
        assert_eq!(
            SizeRange::between(50, 150).to_string(),
            "between 50 and 150"
        );
    }
}
