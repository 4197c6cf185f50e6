/// Rows-per-page choices offered by the table footer.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 15];

pub const DEFAULT_ROWS_PER_PAGE: usize = 5;

/// `ceil(total / rows_per_page)`; zero rows per page is treated as one.
pub fn page_count(total: usize, rows_per_page: usize) -> usize {
    total.div_ceil(rows_per_page.max(1))
}

/// Restricts a 1-based page number to `[1, max(1, page_count)]`.
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

/// The half-open range `[(page-1)*rows, page*rows)` clipped to `items`.
pub fn page_slice<T>(items: &[T], page: usize, rows_per_page: usize) -> &[T] {
    let rows = rows_per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(rows).min(items.len());
    let end = start.saturating_add(rows).min(items.len());
    &items[start..end]
}

/// Next entry of `ROWS_PER_PAGE_OPTIONS`, wrapping around. Values not in the
/// list restart at the first option.
pub fn next_rows_option(current: usize) -> usize {
    match ROWS_PER_PAGE_OPTIONS.iter().position(|option| *option == current) {
        Some(index) => ROWS_PER_PAGE_OPTIONS[(index + 1) % ROWS_PER_PAGE_OPTIONS.len()],
        None => ROWS_PER_PAGE_OPTIONS[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 5), 0);
        assert_eq!(page_count(3, 1), 3);
        assert_eq!(page_count(7, 5), 2);
        assert_eq!(page_count(10, 5), 2);
    }

    #[test]
    fn slices_are_clipped() {
        let items = [1, 2, 3, 4, 5, 6, 7];
        assert_eq!(page_slice(&items, 1, 5), &[1, 2, 3, 4, 5]);
        assert_eq!(page_slice(&items, 2, 5), &[6, 7]);
        assert!(page_slice(&items, 3, 5).is_empty());
        assert_eq!(page_slice(&items, 0, 5), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn one_row_per_page_yields_each_item() {
        let items = ["a", "b", "c"];
        assert_eq!(page_count(items.len(), 1), 3);
        assert_eq!(page_slice(&items, 2, 1), &["b"]);
    }

    #[test]
    fn pages_cover_everything_exactly_once() {
        let items: Vec<usize> = (0..23).collect();
        for rows in 1..=25 {
            let pages = page_count(items.len(), rows);
            let joined: Vec<usize> = (1..=pages)
                .flat_map(|page| page_slice(&items, page, rows).iter().copied())
                .collect();
            assert_eq!(joined, items, "rows {rows}");
        }
    }

    #[test]
    fn clamp_keeps_page_in_range() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn rows_options_cycle() {
        assert_eq!(next_rows_option(5), 10);
        assert_eq!(next_rows_option(15), 5);
        assert_eq!(next_rows_option(7), 5);
    }
}
