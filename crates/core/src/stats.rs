//! Catalog availability statistics.

use serde::{Serialize, Serializer};

/// Share of available books, rendered with one decimal place.
///
/// Serializes as the string `"75.0"`, or as the number `0` when the
/// catalog is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityPercentage {
    Empty,
    Percent(String),
}

impl AvailabilityPercentage {
    /// Compute `disponibles / total * 100` rounded to one decimal.
    ///
    /// Ties round away from zero (`6.25` becomes `"6.3"`), not to even.
    pub fn from_counts(total: i64, disponibles: i64) -> Self {
        if total <= 0 {
            return Self::Empty;
        }
        let ratio = disponibles as f64 / total as f64 * 100.0;
        let rounded = (ratio * 10.0).round() / 10.0;
        Self::Percent(format!("{rounded:.1}"))
    }
}

impl Serialize for AvailabilityPercentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_u8(0),
            Self::Percent(value) => serializer.serialize_str(value),
        }
    }
}

/// Aggregate counts over a catalog table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookStats {
    pub total: i64,
    pub disponibles: i64,
    pub prestados: i64,
    #[serde(rename = "porcentajeDisponible")]
    pub porcentaje_disponible: AvailabilityPercentage,
}

impl BookStats {
    /// Build statistics from the total and available counts.
    ///
    /// `prestados` is derived so that `total == disponibles + prestados`.
    pub fn from_counts(total: i64, disponibles: i64) -> Self {
        Self {
            total,
            disponibles,
            prestados: total - disponibles,
            porcentaje_disponible: AvailabilityPercentage::from_counts(total, disponibles),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_catalog_reports_zero_percent() {
        let stats = BookStats::from_counts(0, 0);
        assert_eq!(stats.prestados, 0);
        assert_eq!(stats.porcentaje_disponible, AvailabilityPercentage::Empty);
        assert_eq!(serde_json::to_value(&stats).unwrap()["porcentajeDisponible"], json!(0));
    }

    #[test]
    fn seed_catalog_reports_seventy_five_percent() {
        let stats = BookStats::from_counts(4, 3);
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({
                "total": 4,
                "disponibles": 3,
                "prestados": 1,
                "porcentajeDisponible": "75.0",
            })
        );
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(
            AvailabilityPercentage::from_counts(3, 1),
            AvailabilityPercentage::Percent("33.3".into())
        );
        assert_eq!(
            AvailabilityPercentage::from_counts(3, 2),
            AvailabilityPercentage::Percent("66.7".into())
        );
        assert_eq!(
            AvailabilityPercentage::from_counts(7, 7),
            AvailabilityPercentage::Percent("100.0".into())
        );
    }

    #[test]
    fn percentage_ties_round_up() {
        assert_eq!(
            AvailabilityPercentage::from_counts(16, 1),
            AvailabilityPercentage::Percent("6.3".into())
        );
        assert_eq!(
            AvailabilityPercentage::from_counts(16, 3),
            AvailabilityPercentage::Percent("18.8".into())
        );
        assert_eq!(
            AvailabilityPercentage::from_counts(8, 1),
            AvailabilityPercentage::Percent("12.5".into())
        );
    }

    #[test]
    fn totals_always_add_up() {
        for total in 0..20 {
            for disponibles in 0..=total {
                let stats = BookStats::from_counts(total, disponibles);
                assert_eq!(stats.total, stats.disponibles + stats.prestados);
            }
        }
    }
}
