use crate::core::timezone::format_compact;
use crate::core::Clock;
use rand::Rng;

/// Default prefix of [`generate`]
pub const DEFAULT_PREFIX: &str = "REF";

/// Prefix used for customer reference numbers
pub const CUSTOMER_REFERENCE_PREFIX: &str = "CRN";

/// Client-side correlation id: `prefix + yyyyMMddHHmmss + 6 random digits`.
///
/// The timestamp is bank local time. Not validated by the bank; two calls in
/// the same second can collide.
pub fn generate(prefix: &str, clock: &dyn Clock) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..=999_999);
    format!("{}{}{:06}", prefix, format_compact(clock.now()), suffix)
}
