//! Column role resolution by candidate-name matching.

use serde::{Deserialize, Serialize};

use crate::schema::ColumnRole;

/// Candidate name fragments per role, in priority order.
pub const DEFAULT_CANDIDATES: &[(ColumnRole, &[&str])] = &[
    (
        ColumnRole::Country,
        &["country", "entity", "nation", "area", "state", "iso_code", "iso3", "iso"],
    ),
    (ColumnRole::Region, &["region", "continent"]),
    (ColumnRole::Sector, &["sector", "category", "industry", "scope"]),
    (ColumnRole::Year, &["year", "yr", "date"]),
    (
        ColumnRole::Emissions,
        &[
            "emissions",
            "emission",
            "co2",
            "co₂",
            "value",
            "ktco2",
            "mtco2",
            "co2_emissions",
            "total",
            "co2e",
        ],
    ),
];

/// Column index chosen for each role; `None` when unresolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoles {
    pub country: Option<usize>,
    pub region: Option<usize>,
    pub sector: Option<usize>,
    pub year: Option<usize>,
    pub emissions: Option<usize>,
}

impl ColumnRoles {
    /// Column resolved for `role`.
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Country => self.country,
            ColumnRole::Region => self.region,
            ColumnRole::Sector => self.sector,
            ColumnRole::Year => self.year,
            ColumnRole::Emissions => self.emissions,
        }
    }

    fn set(&mut self, role: ColumnRole, index: Option<usize>) {
        match role {
            ColumnRole::Country => self.country = index,
            ColumnRole::Region => self.region = index,
            ColumnRole::Sector => self.sector = index,
            ColumnRole::Year => self.year = index,
            ColumnRole::Emissions => self.emissions = index,
        }
    }

    /// Whether `index` is claimed by any role.
    pub fn claims(&self, index: usize) -> bool {
        ColumnRole::ALL.iter().any(|&r| self.get(r) == Some(index))
    }
}

/// Find the best column for one ordered list of candidate fragments.
///
/// For each candidate in turn: an exact case-insensitive match wins, else the
/// first column whose lowercase name contains the fragment.
pub fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

    for candidate in candidates {
        if let Some(i) = lowered.iter().position(|h| h == candidate) {
            return Some(i);
        }
        if let Some(i) = lowered.iter().position(|h| h.contains(candidate)) {
            return Some(i);
        }
    }

    None
}

/// Resolve every role in `candidates` against `headers`.
pub fn resolve_roles(headers: &[String], candidates: &[(ColumnRole, &[&str])]) -> ColumnRoles {
    let mut roles = ColumnRoles::default();
    for (role, fragments) in candidates {
        roles.set(*role, find_column(headers, fragments));
    }
    roles
}

/// Resolve roles with [`DEFAULT_CANDIDATES`].
pub fn resolve_default_roles(headers: &[String]) -> ColumnRoles {
    resolve_roles(headers, DEFAULT_CANDIDATES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let h = headers(&["Country", "Year", "Value"]);
        let roles = resolve_default_roles(&h);
        assert_eq!(roles.country, Some(0));
        assert_eq!(roles.year, Some(1));
        assert_eq!(roles.emissions, Some(2));
        assert_eq!(roles.region, None);
        assert_eq!(roles.sector, None);
    }

    #[test]
    fn test_exact_match_beats_earlier_substring() {
        // "country_name" contains "country" but the exact column wins
        let h = headers(&["country_name", "country"]);
        assert_eq!(find_column(&h, &["country"]), Some(1));
    }

    #[test]
    fn test_substring_takes_first_column() {
        let h = headers(&["co2_kt", "co2_per_capita"]);
        assert_eq!(find_column(&h, &["co2"]), Some(0));
    }

    #[test]
    fn test_candidate_order_beats_column_order() {
        // "emissions" is listed before "value", so the later column wins
        let h = headers(&["value", "Emissions (kt)"]);
        assert_eq!(find_column(&h, &["emissions", "value"]), Some(1));
    }

    #[test]
    fn test_iso_code_resolves_country() {
        let h = headers(&["iso_code", "year", "co2"]);
        let roles = resolve_default_roles(&h);
        assert_eq!(roles.country, Some(0));
        assert_eq!(roles.emissions, Some(2));
    }

    #[test]
    fn test_unresolved_roles_are_none() {
        let h = headers(&["a", "b"]);
        assert_eq!(resolve_default_roles(&h), ColumnRoles::default());
    }

    #[test]
    fn test_claims() {
        let h = headers(&["country", "year", "co2", "notes"]);
        let roles = resolve_default_roles(&h);
        assert!(roles.claims(0));
        assert!(roles.claims(2));
        assert!(!roles.claims(3));
    }
}
