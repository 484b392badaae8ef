//! Aggregations over filtered observation rows.
//!
//! Every function here consumes an iterator of row references so that the
//! caller can feed it the currently visible subset without copying rows.
//! Means that involve the housing cost ratio are taken over ratio-bearing
//! rows only; rows excluded by [`ObservationRow::housing_cost_ratio`] do
//! not contribute to any sum or count.

use std::collections::BTreeMap;

use crate::data::model::ObservationRow;

/// Per `(city, year)` aggregate used by the heatmap and trend views.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioCell {
    pub mean_ratio: f64,
    pub mean_rent: f64,
    pub mean_income: f64,
    /// Number of ratio-bearing rows behind the means.
    pub rows: usize,
}

#[derive(Default)]
struct CellAcc {
    ratio: f64,
    rent: f64,
    income: f64,
    rows: usize,
}

/// Mean housing cost ratio (and the rent/income means behind it) keyed by
/// `(city, year)`. Cells whose rows all lack a ratio are absent entirely.
pub fn ratio_cells<'a, I>(rows: I) -> BTreeMap<(String, i64), RatioCell>
where
    I: IntoIterator<Item = &'a ObservationRow>,
{
    let mut acc: BTreeMap<(String, i64), CellAcc> = BTreeMap::new();
    for row in rows {
        let Some(ratio) = row.housing_cost_ratio() else {
            continue;
        };
        let cell = acc.entry((row.city.clone(), row.year)).or_default();
        cell.ratio += ratio;
        cell.rent += row.rent;
        cell.income += row.income;
        cell.rows += 1;
    }

    acc.into_iter()
        .map(|(key, cell)| {
            let n = cell.rows as f64;
            (
                key,
                RatioCell {
                    mean_ratio: cell.ratio / n,
                    mean_rent: cell.rent / n,
                    mean_income: cell.income / n,
                    rows: cell.rows,
                },
            )
        })
        .collect()
}

/// Cities ordered by mean rent, most expensive first, truncated to `top`
/// entries. Ties are broken alphabetically so the order is stable.
pub fn mean_rent_ranking<'a, I>(rows: I, top: usize) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a ObservationRow>,
{
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = sums.entry(row.city.as_str()).or_insert((0.0, 0));
        entry.0 += row.rent;
        entry.1 += 1;
    }

    let mut ranking: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(city, (sum, n))| (city.to_string(), sum / n as f64))
        .collect();
    ranking.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranking.truncate(top);
    ranking
}

/// Mean dwelling size keyed by `(property type, age group)`. Rows without
/// a recorded size are skipped.
pub fn mean_size_by_type_age<'a, I>(rows: I) -> BTreeMap<(String, String), f64>
where
    I: IntoIterator<Item = &'a ObservationRow>,
{
    let mut sums: BTreeMap<(String, String), (f64, usize)> = BTreeMap::new();
    for row in rows {
        let Some(size) = row.size_m2 else {
            continue;
        };
        let entry = sums
            .entry((row.property_type.clone(), row.age_group.clone()))
            .or_insert((0.0, 0));
        entry.0 += size;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(key, (sum, n))| (key, sum / n as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        city: &str,
        year: i64,
        age: &str,
        property_type: &str,
        income: f64,
        rent: f64,
        size: Option<f64>,
    ) -> ObservationRow {
        ObservationRow {
            city: city.to_string(),
            year,
            age_group: age.to_string(),
            property_type: property_type.to_string(),
            income,
            rent,
            size_m2: size,
        }
    }

    #[test]
    fn ratio_cells_average_per_city_and_year() {
        let rows = vec![
            row("Budapest", 2023, "18-25", "Flat", 1000.0, 400.0, None),
            row("Budapest", 2023, "26-35", "Flat", 2000.0, 600.0, None),
            row("Budapest", 2022, "18-25", "Flat", 1000.0, 500.0, None),
        ];
        let cells = ratio_cells(&rows);
        assert_eq!(cells.len(), 2);

        let cell = &cells[&("Budapest".to_string(), 2023)];
        assert_eq!(cell.rows, 2);
        assert!((cell.mean_ratio - 35.0).abs() < 1e-9);
        assert!((cell.mean_rent - 500.0).abs() < 1e-9);
        assert!((cell.mean_income - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn ratio_cells_skip_rows_without_a_ratio() {
        let rows = vec![
            row("Prague", 2023, "18-25", "Flat", 0.0, 700.0, None),
            row("Prague", 2023, "26-35", "Flat", 1400.0, 700.0, None),
            row("Riga", 2023, "18-25", "Flat", 0.0, 400.0, None),
        ];
        let cells = ratio_cells(&rows);

        // The zero-income Prague row must not drag the mean or the count.
        let prague = &cells[&("Prague".to_string(), 2023)];
        assert_eq!(prague.rows, 1);
        assert!((prague.mean_ratio - 50.0).abs() < 1e-9);

        // A cell with no ratio-bearing rows at all is absent, not NaN.
        assert!(!cells.contains_key(&("Riga".to_string(), 2023)));
    }

    #[test]
    fn ranking_is_descending_with_alphabetical_ties() {
        let rows = vec![
            row("Athens", 2023, "18-25", "Flat", 1200.0, 500.0, None),
            row("Zagreb", 2023, "18-25", "Flat", 1100.0, 500.0, None),
            row("Vienna", 2023, "18-25", "Flat", 2400.0, 900.0, None),
        ];
        let ranking = mean_rent_ranking(&rows, 10);
        let names: Vec<&str> = ranking.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, vec!["Vienna", "Athens", "Zagreb"]);
    }

    #[test]
    fn ranking_truncates_to_the_requested_length() {
        let rows = vec![
            row("Athens", 2023, "18-25", "Flat", 1200.0, 500.0, None),
            row("Vienna", 2023, "18-25", "Flat", 2400.0, 900.0, None),
            row("Zagreb", 2023, "18-25", "Flat", 1100.0, 450.0, None),
        ];
        let ranking = mean_rent_ranking(&rows, 2);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].0, "Vienna");
        assert_eq!(ranking[1].0, "Athens");
    }

    #[test]
    fn ranking_averages_rents_per_city() {
        let rows = vec![
            row("Vienna", 2022, "18-25", "Flat", 2400.0, 800.0, None),
            row("Vienna", 2023, "18-25", "Flat", 2400.0, 1000.0, None),
        ];
        let ranking = mean_rent_ranking(&rows, 10);
        assert_eq!(ranking.len(), 1);
        assert!((ranking[0].1 - 900.0).abs() < 1e-9);
    }

    #[test]
    fn size_means_skip_rows_without_a_size() {
        let rows = vec![
            row("Vienna", 2023, "18-25", "Flat", 2400.0, 900.0, Some(40.0)),
            row("Vienna", 2023, "18-25", "Flat", 2400.0, 900.0, Some(60.0)),
            row("Vienna", 2023, "18-25", "Flat", 2400.0, 900.0, None),
            row("Vienna", 2023, "26-35", "House", 2600.0, 950.0, Some(90.0)),
        ];
        let sizes = mean_size_by_type_age(&rows);
        assert_eq!(sizes.len(), 2);
        let flat = sizes[&("Flat".to_string(), "18-25".to_string())];
        assert!((flat - 50.0).abs() < 1e-9);
        let house = sizes[&("House".to_string(), "26-35".to_string())];
        assert!((house - 90.0).abs() < 1e-9);
    }
}
