//! Utility functions for keyspace.

/// Mix a master seed with a stream index (SplitMix64 finalizer).
///
/// Distinct indices give unrelated seeds, so each partition gets its own
/// generator stream.
///
/// # Examples
///
/// ```
/// use keyspace::utils::derive_seed;
///
/// assert_ne!(derive_seed(1, 0), derive_seed(1, 1));
/// assert_eq!(derive_seed(9, 3), derive_seed(9, 3));
/// ```
#[must_use]
pub const fn derive_seed(seed: u64, index: u64) -> u64 {
    let mut z = seed
        .wrapping_mul(0xA24B_AED4_0B9C_497C)
        .wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Format a count with `,` thousands separators.
///
/// # Examples
///
/// ```
/// use keyspace::utils::group_thousands;
///
/// assert_eq!(group_thousands(30_336_792), "30,336,792");
/// assert_eq!(group_thousands(999), "999");
/// ```
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
