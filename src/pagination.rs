use serde::{Deserialize, Serialize};

use crate::posts::Post;

/// One page of a filtered post list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PageSlice {
    pub posts: Vec<Post>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    /// Size of the filtered set, not of this page.
    pub total: usize,
}

impl PageSlice {
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size.max(1))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PageView {
    /// The filtered set is empty.
    NoResults,
    /// Posts exist but the requested page lies past the last one.
    OutOfRange { last_page: usize },
    Page(PageSlice),
}

/// Filters `posts` by `label` (keeping source order) and cuts out page
/// `page` of `page_size`. Page 0 is read as page 1 and a page size of 0 as 1.
/// Pages past the end come back empty.
pub fn paginate(posts: &[Post], label: Option<&str>, page: usize, page_size: usize) -> PageSlice {
    let page = page.max(1);
    let page_size = page_size.max(1);

    let filtered: Vec<&Post> = posts
        .iter()
        .filter(|post| label.map_or(true, |l| post.has_label(l)))
        .collect();
    let total = filtered.len();

    let start = (page - 1).saturating_mul(page_size);
    let posts = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    PageSlice {
        posts,
        page,
        page_size,
        total,
    }
}

impl From<PageSlice> for PageView {
    fn from(slice: PageSlice) -> Self {
        if slice.total == 0 {
            PageView::NoResults
        } else if slice.posts.is_empty() {
            PageView::OutOfRange {
                last_page: slice.total_pages(),
            }
        } else {
            PageView::Page(slice)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Gap,
}

/// Page numbers to show in the controls: first, last, and `radius` pages
/// either side of `current`, with gaps between runs.
pub fn page_window(current: usize, total_pages: usize, radius: usize) -> Vec<PageMarker> {
    let mut markers = Vec::new();
    let mut previous = 0;

    for page in 1..=total_pages {
        let near = page.abs_diff(current) <= radius;
        if page == 1 || page == total_pages || near {
            if previous != 0 && page - previous > 1 {
                markers.push(PageMarker::Gap);
            }
            markers.push(PageMarker::Page(page));
            previous = page;
        }
    }
    markers
}
