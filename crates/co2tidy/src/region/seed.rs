//! Built-in baseline ISO3 → continent table.

use super::continent::Continent;

/// Seed entries; persisted and human-supplied entries override these.
pub const SEED_MAP: &[(&str, Continent)] = &[
    // Africa
    ("AGO", Continent::Africa), ("DZA", Continent::Africa), ("EGY", Continent::Africa), ("ETH", Continent::Africa), ("GHA", Continent::Africa), ("KEN", Continent::Africa),
    ("MAR", Continent::Africa), ("NGA", Continent::Africa), ("TUN", Continent::Africa), ("ZAF", Continent::Africa),
    // Asia
    ("AFG", Continent::Asia), ("ARE", Continent::Asia), ("ARM", Continent::Asia), ("AZE", Continent::Asia), ("BGD", Continent::Asia), ("BHR", Continent::Asia),
    ("BRN", Continent::Asia), ("BTN", Continent::Asia), ("CHN", Continent::Asia), ("CYP", Continent::Asia), ("GEO", Continent::Asia), ("HKG", Continent::Asia),
    ("IDN", Continent::Asia), ("IND", Continent::Asia), ("IRN", Continent::Asia), ("IRQ", Continent::Asia), ("ISR", Continent::Asia), ("JOR", Continent::Asia),
    ("JPN", Continent::Asia), ("KAZ", Continent::Asia), ("KHM", Continent::Asia), ("KOR", Continent::Asia), ("KWT", Continent::Asia), ("LAO", Continent::Asia),
    ("LBN", Continent::Asia), ("LKA", Continent::Asia), ("MAC", Continent::Asia), ("MDV", Continent::Asia), ("MMR", Continent::Asia), ("MNG", Continent::Asia),
    ("MYS", Continent::Asia), ("NPL", Continent::Asia), ("OMN", Continent::Asia), ("PAK", Continent::Asia), ("PHL", Continent::Asia), ("QAT", Continent::Asia),
    ("SAU", Continent::Asia), ("SGP", Continent::Asia), ("SYR", Continent::Asia), ("THA", Continent::Asia), ("TJK", Continent::Asia), ("TKM", Continent::Asia),
    ("TUR", Continent::Asia), ("UZB", Continent::Asia), ("VNM", Continent::Asia), ("YEM", Continent::Asia),
    // Europe
    ("ALB", Continent::Europe), ("AND", Continent::Europe), ("AUT", Continent::Europe), ("BEL", Continent::Europe), ("BGR", Continent::Europe), ("BIH", Continent::Europe),
    ("BLR", Continent::Europe), ("CHE", Continent::Europe), ("CZE", Continent::Europe), ("DEU", Continent::Europe), ("DNK", Continent::Europe), ("ESP", Continent::Europe),
    ("EST", Continent::Europe), ("FIN", Continent::Europe), ("FRA", Continent::Europe), ("GBR", Continent::Europe), ("GRC", Continent::Europe), ("HRV", Continent::Europe),
    ("HUN", Continent::Europe), ("IRL", Continent::Europe), ("ISL", Continent::Europe), ("ITA", Continent::Europe), ("LTU", Continent::Europe), ("LUX", Continent::Europe),
    ("LVA", Continent::Europe), ("MCO", Continent::Europe), ("MDA", Continent::Europe), ("MKD", Continent::Europe), ("MLT", Continent::Europe), ("MNE", Continent::Europe),
    ("NLD", Continent::Europe), ("NOR", Continent::Europe), ("POL", Continent::Europe), ("PRT", Continent::Europe), ("ROU", Continent::Europe), ("RUS", Continent::Europe),
    ("SMR", Continent::Europe), ("SRB", Continent::Europe), ("SVK", Continent::Europe), ("SVN", Continent::Europe), ("SWE", Continent::Europe), ("UKR", Continent::Europe),
    ("VAT", Continent::Europe),
    // North America
    ("ABW", Continent::NorthAmerica), ("AIA", Continent::NorthAmerica), ("ATG", Continent::NorthAmerica), ("BHS", Continent::NorthAmerica), ("BLZ", Continent::NorthAmerica), ("BMU", Continent::NorthAmerica),
    ("BRB", Continent::NorthAmerica), ("CAN", Continent::NorthAmerica), ("CUB", Continent::NorthAmerica), ("CYM", Continent::NorthAmerica), ("DMA", Continent::NorthAmerica), ("DOM", Continent::NorthAmerica),
    ("GLP", Continent::NorthAmerica), ("GRD", Continent::NorthAmerica), ("GTM", Continent::NorthAmerica), ("HND", Continent::NorthAmerica), ("HTI", Continent::NorthAmerica), ("JAM", Continent::NorthAmerica),
    ("KNA", Continent::NorthAmerica), ("LCA", Continent::NorthAmerica), ("MEX", Continent::NorthAmerica), ("MSR", Continent::NorthAmerica), ("MTQ", Continent::NorthAmerica), ("NIC", Continent::NorthAmerica),
    ("PAN", Continent::NorthAmerica), ("PRI", Continent::NorthAmerica), ("SLV", Continent::NorthAmerica), ("TTO", Continent::NorthAmerica), ("USA", Continent::NorthAmerica), ("VGB", Continent::NorthAmerica),
    ("VIR", Continent::NorthAmerica),
    // South America
    ("ARG", Continent::SouthAmerica), ("BOL", Continent::SouthAmerica), ("BRA", Continent::SouthAmerica), ("CHL", Continent::SouthAmerica), ("COL", Continent::SouthAmerica), ("ECU", Continent::SouthAmerica),
    ("GUY", Continent::SouthAmerica), ("PER", Continent::SouthAmerica), ("PRY", Continent::SouthAmerica), ("SUR", Continent::SouthAmerica), ("URY", Continent::SouthAmerica), ("VEN", Continent::SouthAmerica),
    // Oceania
    ("AUS", Continent::Oceania), ("FJI", Continent::Oceania), ("FSM", Continent::Oceania), ("GUM", Continent::Oceania), ("KIR", Continent::Oceania), ("MHL", Continent::Oceania),
    ("MNP", Continent::Oceania), ("NCL", Continent::Oceania), ("NRU", Continent::Oceania), ("NZL", Continent::Oceania), ("PLW", Continent::Oceania), ("PNG", Continent::Oceania),
    ("SLB", Continent::Oceania), ("TON", Continent::Oceania), ("TUV", Continent::Oceania), ("VUT", Continent::Oceania), ("WSM", Continent::Oceania),
    // Antarctica
    ("ATA", Continent::Antarctica),
];
