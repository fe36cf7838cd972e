/// The sentinel region code used when a number cannot be attributed to any
/// region. Never present in the metadata table; when supplied as a default
/// region it is treated the same as no region at all.
pub const UNKNOWN: &str = "ZZ";

/// The pseudo-region assigned to non-geographical entities, such as the
/// universal international toll-free service (country calling code 800).
pub const NON_GEO_ENTITY: &str = "001";

/// Returns true for inputs that can never name a real region: the empty
/// string and the "unknown" sentinel.
pub fn is_unknown(code: &str) -> bool {
    code.is_empty() || code == UNKNOWN
}
