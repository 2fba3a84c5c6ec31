/// Results shown per page in the search view.
pub const PAGE_SIZE: usize = 12;

/// Maximum number of page buttons shown in the pagination bar.
pub const MAX_VISIBLE_PAGES: usize = 5;

pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Items on 1-indexed `page`. Out-of-range pages yield an empty slice;
/// callers clamp with [`clamp_page`] first.
pub fn page_items<T>(items: &[T], page: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = ((page - 1) * PAGE_SIZE).min(items.len());
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

pub fn clamp_page(page: usize, total: usize) -> usize {
    if total == 0 {
        1
    } else {
        page.clamp(1, total)
    }
}

/// Page numbers for the pagination bar: everything when there are few pages,
/// otherwise a five-wide window around `current` pinned to either end.
pub fn visible_page_numbers(current: usize, total: usize) -> Vec<usize> {
    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).collect();
    }

    let half = MAX_VISIBLE_PAGES / 2;
    let start = if current <= half + 1 {
        1
    } else if current + half >= total {
        total - MAX_VISIBLE_PAGES + 1
    } else {
        current - half
    };

    (start..start + MAX_VISIBLE_PAGES).collect()
}
