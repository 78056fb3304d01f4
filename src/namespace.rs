//! Stable per-namespace display colors for log-tagging use cases.
//!
//! An arbitrary string key (a log component name, typically) is hashed
//! into a curated palette of 256-color indexes chosen to stay readable and
//! visually distinct on common terminal themes. The same name always maps
//! to the same color within a process run.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

use crate::types::{Style, Styled};

/// Curated 256-color palette indexes, in selection order. The hash below
/// reduces modulo this table's length, so the order is load-bearing.
const PALETTE: [u8; 76] = [
    20, 21, 26, 27, 32, 33, 38, 39, 40, 41, //
    42, 43, 44, 45, 56, 57, 62, 63, 68, 69, //
    74, 75, 76, 77, 78, 79, 80, 81, 92, 93, //
    98, 99, 112, 113, 128, 129, 134, 135, 148, 149, //
    160, 161, 162, 163, 164, 165, 166, 167, 168, 169, //
    170, 171, 172, 173, 178, 179, 184, 185, 196, 197, //
    198, 199, 200, 201, 202, 203, 204, 205, 206, 207, //
    208, 209, 214, 215, 220, 221,
];

static REGISTRY: LazyLock<Mutex<HashMap<String, Style>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Deterministically selects a palette color for `name`.
///
/// The hash accumulates Unicode scalar values (not bytes) into a 32-bit
/// signed accumulator as `hash = (hash << 5) - hash + codepoint`, wrapping
/// on overflow, then takes the absolute value in 64-bit arithmetic before
/// reducing modulo the palette length. Distinct names may collide; a given
/// name never varies.
pub fn select_color(name: &str) -> u8 {
    let mut hash: i32 = 0;
    for ch in name.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(ch as i32);
    }
    // Widening before the absolute value sidesteps i32::MIN, which has no
    // 32-bit positive counterpart.
    let index = i64::from(hash).unsigned_abs() % PALETTE.len() as u64;
    PALETTE[index as usize]
}

/// Returns `name` wrapped in its stable namespace color.
///
/// The color is computed on first request and cached for the life of the
/// process; repeated lookups are O(1). The read-check-insert runs under a
/// single lock so concurrent first requests for the same name cannot
/// corrupt the registry.
pub fn namespace(name: &str) -> Styled<String> {
    let style = {
        let mut registry =
            REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
        registry
            .entry(name.to_string())
            .or_insert_with(|| {
                let mut style = Style::new();
                style.fg_indexed(select_color(name));
                style
            })
            .clone()
    };
    Styled::new(name.to_string(), style)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference values reproduce the JS-style ((hash << 5) - hash) + code
    // accumulation truncated to 32-bit signed integers:
    //   "test" -> 3556498, 3556498 % 76 == 2, PALETTE[2] == 26
    //   "a"    -> 97,      97 % 76 == 21,     PALETTE[21] == 75
    //   ""     -> 0,       PALETTE[0] == 20
    #[test]
    fn select_color_matches_reference_values() {
        assert_eq!(select_color("test"), 26);
        assert_eq!(select_color("a"), 75);
        assert_eq!(select_color(""), 20);
    }

    #[test]
    fn select_color_is_stable() {
        for _ in 0..3 {
            assert_eq!(select_color("http:router"), select_color("http:router"));
            assert_eq!(select_color(""), select_color(""));
        }
    }

    #[test]
    fn namespace_wraps_name_in_indexed_foreground() {
        let ns = namespace("test");
        assert_eq!(ns.value(), "test");
        assert_eq!(ns.style().set_code(), "\x1B[38;5;26m");
        assert_eq!(format!("{ns}"), "\x1B[38;5;26mtest\x1B[0m");
    }

    #[test]
    fn namespace_is_cached_per_name() {
        let first = namespace("worker");
        let second = namespace("worker");
        assert_eq!(first.style(), second.style());
    }
}
