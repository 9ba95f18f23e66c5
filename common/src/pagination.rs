//! Abstractions for offset-based pagination.

/// Arguments selecting a page of items.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// 1-based number of the requested page.
    pub page: usize,

    /// Maximum number of items on the requested page.
    pub limit: usize,
}

impl Arguments {
    /// Creates new [`Arguments`] from the provided optional values, falling
    /// back to the first page and the provided `default_limit`.
    ///
    /// Zero values are bumped to 1, so the produced offset is always valid.
    #[must_use]
    pub fn new(
        page: Option<usize>,
        limit: Option<usize>,
        default_limit: usize,
    ) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).max(1),
        }
    }

    /// Returns the offset of the first item of the requested page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.limit
    }
}

/// A page of items along with the total count of items matching the same
/// selection.
///
/// Requesting a page past the end of the selection yields an empty `items`
/// list, not an error.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items of this [`Page`].
    pub items: Vec<I>,

    /// Total count of items matching the selection, independent of
    /// [`Arguments`].
    pub total: usize,

    /// 1-based number of this [`Page`].
    pub page: usize,

    /// Maximum number of items on this [`Page`].
    pub limit: usize,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] from the provided [`Arguments`], items and
    /// total count.
    #[must_use]
    pub fn new(
        args: Arguments,
        items: impl IntoIterator<Item = impl Into<I>>,
        total: usize,
    ) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            total,
            page: args.page,
            limit: args.limit,
        }
    }

    /// Returns the total number of pages in the selection this [`Page`] was
    /// taken from.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.limit)
    }

    /// Maps the items of this [`Page`] preserving its counters.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(I) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Pagination selector.
#[derive(Clone, Debug)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Page};

    #[test]
    fn offset_starts_at_zero() {
        assert_eq!(Arguments::new(None, None, 12).offset(), 0);
        assert_eq!(Arguments::new(Some(1), Some(12), 12).offset(), 0);
        assert_eq!(Arguments::new(Some(2), Some(12), 12).offset(), 12);
        assert_eq!(Arguments::new(Some(4), Some(5), 12).offset(), 15);
    }

    #[test]
    fn zero_arguments_are_bumped() {
        let args = Arguments::new(Some(0), Some(0), 12);
        assert_eq!(args.page, 1);
        assert_eq!(args.limit, 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let args = Arguments::new(Some(1), Some(12), 12);
        let page = Page::<u32>::new(args, 1_u32..=12, 15);
        assert_eq!(page.total_pages(), 2);

        let page = Page::<u32>::new(args, 1_u32..=12, 24);
        assert_eq!(page.total_pages(), 2);

        let page = Page::<u32>::new(args, 1_u32..=12, 25);
        assert_eq!(page.total_pages(), 3);

        let page = Page::<u32>::new(args, [0u32; 0], 0);
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let args = Arguments::new(Some(3), Some(12), 12);
        let page = Page::<u32>::new(args, [0u32; 0], 15);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 15);
        assert_eq!(page.total_pages(), 2);
    }
}
