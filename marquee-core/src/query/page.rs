use marquee_model::Page;

/// Wrap one window of results and the total match count into a [`Page`].
///
/// `total_pages` is at least 1 so an empty catalog still reports page 1 of 1.
pub fn assemble<T>(items: Vec<T>, total_results: u64, page: u32, limit: u32) -> Page<T> {
    let limit = u64::from(limit.max(1));
    let total_pages = total_results.div_ceil(limit).max(1);
    Page {
        page,
        total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        total_results,
        results: items,
    }
}
