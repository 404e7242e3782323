pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;

/// One page of a larger collection plus the figures responses report.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: usize,
}

/// Slice one page out of a collection. `page` clamps to at least 1 and
/// `per_page` to 1..=100; pages past the end come back empty rather than
/// erroring.
pub fn paginate<T>(list: Vec<T>, page: i64, per_page: i64) -> Page<T> {
    let total = list.len();
    let page = page.max(1);
    let per_page = per_page.clamp(1, MAX_PER_PAGE);

    let start = usize::try_from((page - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);
    let items = list
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    Page {
        items,
        page,
        per_page,
        total,
    }
}
