/// A bounded, ordered slice of a larger result set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page<T> {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            total_pages: self.total_pages,
            total_results: self.total_results,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
