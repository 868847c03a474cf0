/// Right-pad every row with empty cells to the longest row in the batch.
/// The header participates in the maximum; rows are never truncated or
/// reordered. Empty and single-row batches pass through unchanged.
pub fn equalize_row_lengths(mut rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(widest, String::new());
    }
    rows
}
