//! Page-number window, item ranges and the pagination strip.

use log::debug;

use crate::events::Callback;
use crate::node::{ButtonVariant, Layout, Node, Role, Tone};

/// One entry of the page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Compute the page buttons to show.
///
/// Up to `max_visible` pages are shown as-is. Beyond that a window of
/// `max_visible` pages is centred on `current` and clamped to `[1, total]`;
/// the first and last pages are always present, behind an ellipsis when the
/// window does not reach them.
pub fn compute_page_window(current: u32, total: u32, max_visible: u32) -> Vec<PageItem> {
    let max_visible = max_visible.max(1);
    if total <= max_visible {
        return (1..=total).map(PageItem::Page).collect();
    }

    // Signed arithmetic: an out-of-range `current` must not underflow.
    let current = i64::from(current);
    let total_i = i64::from(total);
    let max_i = i64::from(max_visible);
    let mut start = (current - max_i / 2).max(1);
    let end = (start + max_i - 1).min(total_i);
    if end - start + 1 < max_i {
        start = (end - max_i + 1).max(1);
    }
    // Both ends now lie in [1, total].
    let (start, end) = (start as u32, end as u32);

    let mut items = Vec::with_capacity(max_visible as usize + 4);
    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total {
        if end < total - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));
    }
    items
}

/// Inclusive 1-based range of items shown on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRange {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl ItemRange {
    /// "11–20 of 23".
    pub fn label(&self) -> String {
        format!("{}–{} of {}", self.start, self.end, self.total)
    }
}

/// Range of items on `current`.
///
/// With no items both ends are 0.
pub fn compute_item_range(current: u32, items_per_page: u32, total_items: u64) -> ItemRange {
    if total_items == 0 || items_per_page == 0 {
        return ItemRange {
            start: 0,
            end: 0,
            total: total_items,
        };
    }
    let per_page = u64::from(items_per_page);
    let current = u64::from(current.max(1));
    ItemRange {
        start: (current - 1).saturating_mul(per_page).saturating_add(1),
        end: current.saturating_mul(per_page).min(total_items),
        total: total_items,
    }
}

/// Number of pages needed for `total_items`; never less than 1.
pub fn total_pages(total_items: u64, items_per_page: u32) -> u32 {
    if items_per_page == 0 {
        return 1;
    }
    let pages = total_items.div_ceil(u64::from(items_per_page)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Pagination position reported by the host.
///
/// The engine never clamps `current_page`; out-of-range values render as
/// given.
#[derive(Clone)]
pub struct PaginationDescriptor {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: Option<u64>,
    pub items_per_page: Option<u32>,
    pub on_page_change: Callback<u32>,
    /// The page-size selector is only rendered when this is set.
    pub on_items_per_page_change: Option<Callback<u32>>,
}

impl std::fmt::Debug for PaginationDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationDescriptor")
            .field("current_page", &self.current_page)
            .field("total_pages", &self.total_pages)
            .field("total_items", &self.total_items)
            .field("items_per_page", &self.items_per_page)
            .field(
                "on_items_per_page_change",
                &crate::events::CallbackSlot(self.on_items_per_page_change.is_some()),
            )
            .finish_non_exhaustive()
    }
}

impl PaginationDescriptor {
    pub fn new(current_page: u32, total_pages: u32, on_page_change: Callback<u32>) -> Self {
        Self {
            current_page,
            total_pages,
            total_items: None,
            items_per_page: None,
            on_page_change,
            on_items_per_page_change: None,
        }
    }

    /// Set item counts for the range label.
    pub fn items(mut self, total_items: u64, items_per_page: u32) -> Self {
        self.total_items = Some(total_items);
        self.items_per_page = Some(items_per_page);
        self
    }

    /// Enable the page-size selector.
    pub fn on_items_per_page_change(mut self, f: Callback<u32>) -> Self {
        self.on_items_per_page_change = Some(f);
        self
    }

    /// Item range, when counts are known.
    pub fn item_range(&self) -> Option<ItemRange> {
        Some(compute_item_range(
            self.current_page,
            self.items_per_page?,
            self.total_items?,
        ))
    }

    /// Request a page. Requests for the current page are ignored.
    pub fn go_to(&self, page: u32) -> bool {
        if page == self.current_page || page == 0 {
            return false;
        }
        debug!("Page change requested: {} -> {}", self.current_page, page);
        (self.on_page_change)(page);
        true
    }

    /// Request a page size. Ignored without a selector callback.
    pub fn set_items_per_page(&self, size: u32) -> bool {
        let Some(on_change) = &self.on_items_per_page_change else {
            return false;
        };
        if size == 0 || Some(size) == self.items_per_page {
            return false;
        }
        debug!("Page size change requested: {}", size);
        on_change(size);
        true
    }

    /// Render the strip.
    pub fn render(&self, max_visible: u32, page_size_options: &[u32]) -> Node {
        let mut children = Vec::new();

        let summary = match self.item_range() {
            Some(range) => format!("Showing {}", range.label()),
            None => format!("Page {} of {}", self.current_page, self.total_pages),
        };
        children.push(Node::text_toned(summary, Tone::Muted));

        if self.on_items_per_page_change.is_some() {
            children.push(self.render_page_size(page_size_options));
        }

        let mut window = Vec::new();
        window.push(Node::Button {
            id: "page-prev".to_string(),
            label: "Previous".to_string(),
            variant: ButtonVariant::Outline,
            icon: Some("chevron-left".to_string()),
            disabled: self.current_page <= 1,
            pressed: false,
        });
        for (i, item) in compute_page_window(self.current_page, self.total_pages, max_visible)
            .into_iter()
            .enumerate()
        {
            window.push(match item {
                PageItem::Page(n) => Node::Button {
                    id: format!("page-{}", n),
                    label: n.to_string(),
                    variant: if n == self.current_page {
                        ButtonVariant::Primary
                    } else {
                        ButtonVariant::Ghost
                    },
                    icon: None,
                    disabled: false,
                    pressed: n == self.current_page,
                },
                PageItem::Ellipsis => Node::row_with(
                    Layout::default().id(format!("page-ellipsis-{}", i)),
                    vec![Node::text_toned("…", Tone::Muted)],
                ),
            });
        }
        window.push(Node::Button {
            id: "page-next".to_string(),
            label: "Next".to_string(),
            variant: ButtonVariant::Outline,
            icon: Some("chevron-right".to_string()),
            disabled: self.current_page >= self.total_pages,
            pressed: false,
        });
        children.push(Node::row_with(Layout::role(Role::PageWindow), window));

        Node::row_with(Layout::role(Role::Pagination).id("pagination"), children)
    }

    fn render_page_size(&self, page_size_options: &[u32]) -> Node {
        let mut sizes: Vec<u32> = page_size_options.to_vec();
        if let Some(current) = self.items_per_page
            && !sizes.contains(&current)
        {
            sizes.push(current);
            sizes.sort_unstable();
        }
        let selected = self
            .items_per_page
            .and_then(|current| sizes.iter().position(|&s| s == current));
        Node::row(vec![
            Node::text_toned("Rows per page", Tone::Muted),
            Node::Select {
                id: "page-size".to_string(),
                options: sizes.iter().map(u32::to_string).collect(),
                selected,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn test_window_at_start() {
        assert_eq!(
            compute_page_window(1, 10, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_window_in_middle() {
        assert_eq!(
            compute_page_window(5, 10, 5),
            vec![
                Page(1),
                Ellipsis,
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10)
            ]
        );
    }

    #[test]
    fn test_window_at_end() {
        assert_eq!(
            compute_page_window(10, 10, 5),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_window_one_past_max() {
        // The last page sits right after the window, so no ellipsis.
        assert_eq!(
            compute_page_window(1, 6, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6)]
        );
        assert_eq!(
            compute_page_window(4, 6, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6)]
        );
    }

    #[test]
    fn test_out_of_range_current_does_not_panic() {
        let window = compute_page_window(50, 10, 5);
        assert_eq!(window.last(), Some(&Page(10)));
        assert_eq!(window.first(), Some(&Page(1)));
        assert!(compute_page_window(0, 10, 5).contains(&Page(1)));
    }

    #[test]
    fn test_zero_items_range() {
        let range = compute_item_range(1, 10, 0);
        assert_eq!((range.start, range.end), (0, 0));
    }
}
