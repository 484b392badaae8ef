use std::collections::BTreeSet;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// ObservationRow – one row of the housing dataset
// ---------------------------------------------------------------------------

/// A single measurement for a city/year/age-group/property-type combination.
///
/// Field renames are the dataset's own CSV headers (the source is a Hungarian
/// housing survey). serde matches by header name, so column order does not
/// matter and unrecognised columns are ignored. The survey's stored ratio
/// column is ignored on purpose: the ratio is always recomputed from the
/// rent/income pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObservationRow {
    #[serde(rename = "Város")]
    pub city: String,
    #[serde(rename = "Év")]
    pub year: i64,
    #[serde(rename = "Korosztály")]
    pub age_group: String,
    #[serde(rename = "Ingatlantípus")]
    pub property_type: String,
    /// Net income in €/month.
    #[serde(rename = "Jövedelem (€/hó)")]
    pub income: f64,
    /// Monthly rent in €/month.
    #[serde(rename = "Bérleti díj (€/hó)")]
    pub rent: f64,
    /// Dwelling size in m²; empty in some rows.
    #[serde(rename = "Lakásméret (m²)", default)]
    pub size_m2: Option<f64>,
}

impl ObservationRow {
    /// Rent as a percentage of income.
    ///
    /// `None` when income is not positive: such rows carry no meaningful
    /// ratio and are excluded from every ratio-based view instead of
    /// feeding infinities or NaN into the means.
    pub fn housing_cost_ratio(&self) -> Option<f64> {
        (self.income > 0.0).then(|| self.rent / self.income * 100.0)
    }
}

// ---------------------------------------------------------------------------
// HousingDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct-value indexes.
///
/// The indexes are `BTreeSet`s, so selector widgets iterate their options in
/// ascending order for free.
#[derive(Debug, Clone, Default)]
pub struct HousingDataset {
    /// All observation rows, in file order.
    pub rows: Vec<ObservationRow>,
    pub years: BTreeSet<i64>,
    pub age_groups: BTreeSet<String>,
    pub cities: BTreeSet<String>,
    pub property_types: BTreeSet<String>,
}

impl HousingDataset {
    /// Build the distinct-value indexes from the loaded rows.
    pub fn from_rows(rows: Vec<ObservationRow>) -> Self {
        let mut years = BTreeSet::new();
        let mut age_groups = BTreeSet::new();
        let mut cities = BTreeSet::new();
        let mut property_types = BTreeSet::new();

        for row in &rows {
            years.insert(row.year);
            age_groups.insert(row.age_group.clone());
            cities.insert(row.city.clone());
            property_types.insert(row.property_type.clone());
        }
        HousingDataset {
            rows,
            years,
            age_groups,
            cities,
            property_types,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(city: &str, year: i64, age: &str, income: f64, rent: f64) -> ObservationRow {
        ObservationRow {
            city: city.to_string(),
            year,
            age_group: age.to_string(),
            property_type: "Albérlet".to_string(),
            income,
            rent,
            size_m2: None,
        }
    }

    #[test]
    fn indexes_are_sorted_and_deduplicated() {
        let ds = HousingDataset::from_rows(vec![
            row("Vienna", 2023, "26-35", 2000.0, 900.0),
            row("Budapest", 2021, "18-25", 1000.0, 400.0),
            row("Budapest", 2023, "18-25", 1100.0, 450.0),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.years.iter().copied().collect::<Vec<_>>(),
            vec![2021, 2023]
        );
        assert_eq!(
            ds.cities.iter().cloned().collect::<Vec<_>>(),
            vec!["Budapest".to_string(), "Vienna".to_string()]
        );
        assert_eq!(ds.age_groups.len(), 2);
    }

    #[test]
    fn ratio_matches_rent_over_income() {
        let budapest = row("Budapest", 2023, "18-25", 1000.0, 400.0);
        let vienna = row("Vienna", 2023, "26-35", 2000.0, 900.0);
        assert_eq!(budapest.housing_cost_ratio(), Some(40.0));
        assert_eq!(vienna.housing_cost_ratio(), Some(45.0));
    }

    #[test]
    fn ratio_is_precise_in_relative_terms() {
        let r = row("Prague", 2022, "18-25", 1234.56, 789.12);
        let got = r.housing_cost_ratio().unwrap();
        let want = 789.12 / 1234.56 * 100.0;
        assert!(((got - want) / want).abs() < 1e-9);
    }

    #[test]
    fn non_positive_income_has_no_ratio() {
        let zero = row("Budapest", 2023, "18-25", 0.0, 400.0);
        let junk = row("Budapest", 2023, "18-25", -5.0, 400.0);
        assert_eq!(zero.housing_cost_ratio(), None);
        assert_eq!(junk.housing_cost_ratio(), None);
    }

    #[test]
    fn empty_dataset_has_empty_indexes() {
        let ds = HousingDataset::from_rows(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.years.is_empty());
        assert!(ds.cities.is_empty());
    }
}
