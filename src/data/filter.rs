use super::model::HousingDataset;

// ---------------------------------------------------------------------------
// Selections: one exact-match-or-all choice per categorical field
// ---------------------------------------------------------------------------

/// One categorical selector: either unconstrained or pinned to a value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    /// The "all" sentinel: no constraint on this field.
    #[default]
    All,
    /// Keep only rows whose field equals the value exactly.
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Whether a row value passes this selector.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

/// The user's current filter choices. Fields compose as logical AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selections {
    pub year: Selection<i64>,
    pub age_group: Selection<String>,
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of rows that pass every active selection.
///
/// A value that never occurs in the dataset simply matches nothing: an
/// unknown year yields an empty view, not an error. Row order is preserved,
/// so filtering an already-filtered view with the same selections changes
/// nothing.
pub fn filter_indices(dataset: &HousingDataset, selections: &Selections) -> Vec<usize> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            selections.year.admits(&row.year) && selections.age_group.admits(&row.age_group)
        })
        .map(|(i, _)| i)
        .collect()
}
