use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};

use pizzeria_core::OrderNumber;

/// Issues order numbers of the form `OR<yyyymmddHHMMSS><seq:04>`.
///
/// The sequence wraps at 10 000 and only disambiguates orders placed within
/// the same second by one process.
#[derive(Debug, Default)]
pub struct OrderNumberGenerator {
    seq: AtomicU32,
}

impl OrderNumberGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, now: DateTime<Utc>) -> OrderNumber {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) % 10_000;
        OrderNumber::new(format!("OR{}{:04}", now.format("%Y%m%d%H%M%S"), seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn numbers_embed_timestamp_and_sequence() {
        let generator = OrderNumberGenerator::new();
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 12, 30, 45).unwrap();

        assert_eq!(generator.next(at).as_str(), "OR202610161230450000");
        assert_eq!(generator.next(at).as_str(), "OR202610161230450001");
    }
}
