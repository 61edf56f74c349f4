//! Identifier generation and the handful of calendar helpers the form needs.

use chrono::{NaiveDate, SecondsFormat, Utc};
use rand::Rng;

/// Generates an identifier for a log or draft: millisecond timestamp plus a
/// random base36 suffix. Unique with overwhelming probability within a
/// session; collisions are not handled defensively.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| char::from_digit(rng.gen_range(0..36u32), 36).unwrap_or('0'))
        .collect();

    format!("log_{millis}_{suffix}")
}

/// Current UTC timestamp in ISO 8601 with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn tomorrow() -> NaiveDate {
    plus_one_day(today())
}

/// Calendar successor, used by the derived end-date rule. Saturates at the
/// end of the representable calendar rather than failing.
pub fn plus_one_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}
