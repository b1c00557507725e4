//! Row classification predicates
//!
//! A row is one example value the user has entered; suggestions are
//! generated from a whole sequence of them. The predicates here decide
//! whether a row set is substantial enough to generate from, and whether
//! an edited row set still agrees with suggestions generated from an
//! earlier one.

/// One example/data row. Opaque to the suggestion engine; equality is
/// plain string equality.
pub type Row = String;

/// Returns true if `rows` contains at least one non-empty row.
///
/// Generation needs something to condition on; a sheet of empty
/// placeholders does not qualify.
pub fn enough_rows(rows: &[Row]) -> bool {
    rows.iter().any(|row| !row.is_empty())
}

/// Returns true if `a` extends `b`: every row of `b` reappears at the
/// same position in `a` with its value unchanged.
fn is_extension(a: &[&Row], b: &[&Row]) -> bool {
    b.len() <= a.len() && b.iter().zip(a).all(|(x, y)| x == y)
}

/// Extension check that ignores empty placeholder rows.
///
/// Rows in `a` that match a previously issued suggestion are discarded
/// as well: a row the user adopted from an earlier suggestion batch is
/// machine-generated content, not an edit, so it must not count against
/// the rows the current suggestions were derived from.
pub fn is_extension_ignore_empty(a: &[Row], b: &[Row], previous_suggestions: &[Row]) -> bool {
    let a_filtered: Vec<&Row> = a
        .iter()
        .filter(|row| !row.is_empty() && !previous_suggestions.contains(row))
        .collect();
    let b_filtered: Vec<&Row> = b.iter().filter(|row| !row.is_empty()).collect();
    is_extension(&a_filtered, &b_filtered)
}

#[cfg(test)]
#[path = "rows_tests.rs"]
mod rows_tests;
