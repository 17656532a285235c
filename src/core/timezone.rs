use chrono::{DateTime, FixedOffset, Utc};

/// BNI operates on Western Indonesia Time (WIB, UTC+7) year-round
const WIB_OFFSET_SECONDS: i32 = 7 * 3600;

/// Compact timestamp layout used inside reference numbers
pub const COMPACT_FORMAT: &str = "%Y%m%d%H%M%S";

/// Convert a UTC timestamp to bank local time (Asia/Jakarta)
pub fn to_bank_time(utc_time: DateTime<Utc>) -> DateTime<FixedOffset> {
    // east_opt only fails outside +/-24h
    FixedOffset::east_opt(WIB_OFFSET_SECONDS)
        .map_or_else(|| utc_time.fixed_offset(), |wib| utc_time.with_timezone(&wib))
}

/// Format a UTC instant as `yyyyMMddHHmmss` in bank local time
pub fn format_compact(utc_time: DateTime<Utc>) -> String {
    to_bank_time(utc_time).format(COMPACT_FORMAT).to_string()
}
