//! Canonical GICS sector taxonomy and classification of raw provider labels.

/// Catch-all bucket for labels the mapping table does not recognize.
pub const UNKNOWN_SECTOR: &str = "Unknown/Unmapped";

/// Map a raw sector label from a market-data provider onto the official
/// GICS sector name. The table is keyed on Yahoo-style labels; anything
/// absent from it, including the empty string and the provider sentinel
/// "N/A", falls into [`UNKNOWN_SECTOR`]. Total and infallible.
pub fn map_to_gics(raw: &str) -> &'static str {
    match raw {
        "Basic Materials" => "Materials",
        "Communication Services" => "Communication Services",
        "Consumer Cyclical" => "Consumer Discretionary",
        "Consumer Defensive" => "Consumer Staples",
        "Energy" => "Energy",
        "Financial Services" => "Financials",
        "Healthcare" => "Health Care",
        "Industrials" => "Industrials",
        "Real Estate" => "Real Estate",
        "Technology" => "Information Technology",
        "Utilities" => "Utilities",
        _ => UNKNOWN_SECTOR,
    }
}

/// The full canonical taxonomy, eleven GICS sectors plus the catch-all.
pub fn gics_sectors() -> [&'static str; 12] {
    [
        "Communication Services",
        "Consumer Discretionary",
        "Consumer Staples",
        "Energy",
        "Financials",
        "Health Care",
        "Industrials",
        "Information Technology",
        "Materials",
        "Real Estate",
        "Utilities",
        UNKNOWN_SECTOR,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_map_to_gics_names() {
        assert_eq!(map_to_gics("Technology"), "Information Technology");
        assert_eq!(map_to_gics("Basic Materials"), "Materials");
        assert_eq!(map_to_gics("Consumer Cyclical"), "Consumer Discretionary");
        assert_eq!(map_to_gics("Healthcare"), "Health Care");
        assert_eq!(map_to_gics("Financial Services"), "Financials");
    }

    #[test]
    fn test_passthrough_labels() {
        // Labels that already match their GICS name
        assert_eq!(map_to_gics("Energy"), "Energy");
        assert_eq!(map_to_gics("Industrials"), "Industrials");
        assert_eq!(map_to_gics("Utilities"), "Utilities");
        assert_eq!(map_to_gics("Real Estate"), "Real Estate");
    }

    #[test]
    fn test_unrecognized_labels_fall_back() {
        assert_eq!(map_to_gics("N/A"), UNKNOWN_SECTOR);
        assert_eq!(map_to_gics(""), UNKNOWN_SECTOR);
        assert_eq!(map_to_gics("Quantum Computing"), UNKNOWN_SECTOR);
        // Lookup is case-sensitive; provider labels are exact strings
        assert_eq!(map_to_gics("technology"), UNKNOWN_SECTOR);
    }

    #[test]
    fn test_every_mapped_label_lands_in_taxonomy() {
        let taxonomy = gics_sectors();
        for raw in [
            "Basic Materials",
            "Communication Services",
            "Consumer Cyclical",
            "Consumer Defensive",
            "Energy",
            "Financial Services",
            "Healthcare",
            "Industrials",
            "Real Estate",
            "Technology",
            "Utilities",
            "N/A",
        ] {
            assert!(taxonomy.contains(&map_to_gics(raw)));
        }
    }
}
