//! Display window around the completion cursor.

/// Returns true if entry `index` is inside the display window.
///
/// The window spans `ceil(window / 2)` entries after the cursor and
/// `floor(window / 2)` before it. Near either end of the list the first or
/// last `window` entries are shown instead, so the list does not shrink at
/// the edges.
pub fn is_visible(index: usize, cursor: usize, len: usize, window: usize) -> bool {
    let upper_half = window.div_ceil(2);
    let lower_half = window / 2;

    let around_cursor =
        index >= cursor.saturating_sub(lower_half) && index <= cursor.saturating_add(upper_half);
    let near_start = index < window && cursor < lower_half;
    let near_end =
        index >= len.saturating_sub(window) && cursor >= len.saturating_sub(upper_half);

    around_cursor || near_start || near_end
}

/// Indices of the visible entries.
pub fn visible_indices(cursor: usize, len: usize, window: usize) -> Vec<usize> {
    (0..len)
        .filter(|&i| is_visible(i, cursor, len, window))
        .collect()
}
