//! Folio generation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Produces candidate folios for new quotations.
///
/// Uniqueness is not required of the generator; the store rejects
/// duplicates at insertion time.
pub trait FolioGenerator: Send + Sync {
    /// Returns a folio for a quotation created at `created_at`.
    fn next_folio(&self, prefix: &str, created_at: DateTime<Utc>) -> String;
}

/// Generates `{prefix}-{YYYYMMDD}-{8 hex digits}` folios from random UUIDs.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use quotation_engine::store::{FolioGenerator, RandomFolio};
///
/// let created_at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
/// let folio = RandomFolio.next_folio("COT", created_at);
///
/// assert!(folio.starts_with("COT-20250314-"));
/// assert_eq!(folio.len(), "COT-20250314-".len() + 8);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomFolio;

impl FolioGenerator for RandomFolio {
    fn next_folio(&self, prefix: &str, created_at: DateTime<Utc>) -> String {
        let entropy = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}-{}",
            prefix,
            created_at.format("%Y%m%d"),
            entropy[..8].to_uppercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_folio_format() {
        let created_at = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        let folio = RandomFolio.next_folio("COT", created_at);

        let parts: Vec<&str> = folio.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "COT");
        assert_eq!(parts[1], "20250102");
        assert_eq!(parts[2].len(), 8);
        assert!(
            parts[2]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_consecutive_folios_differ() {
        let now = Utc::now();
        assert_ne!(
            RandomFolio.next_folio("COT", now),
            RandomFolio.next_folio("COT", now)
        );
    }
}
