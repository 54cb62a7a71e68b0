/// Cursor pagination to exhaustion at a pinned snapshot
///
/// Pages are requested with `id_gt: <cursor>` in ascending id order. The run
/// is a fold over pages driven by [`PageCursor`]:
/// - a page shorter than the page size ends the run
/// - the last id of every non-empty page must be strictly greater than the
///   cursor it was requested with (and the one before it), otherwise the run
///   fails with `PaginationStalled` before any further request
///
/// Exhaustion assumes the service only short-pages at the end of the data.
use super::types::{CursorKey, SnapshotMarker, ZERO_ADDRESS};
use crate::errors::{FeedKind, TagError, TagResult};
use crate::logger::{self, LogTag};
use async_trait::async_trait;

pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// A remote feed that can be paged by ascending cursor
#[async_trait]
pub trait PageSource: Send + Sync {
    type Record: CursorKey + Send;

    fn feed(&self) -> FeedKind;

    /// Cursor for the first request; must sort before every real key
    fn initial_cursor(&self) -> &str {
        ZERO_ADDRESS
    }

    async fn fetch_page(
        &self,
        cursor: &str,
        snapshot: SnapshotMarker,
        page_size: usize,
    ) -> TagResult<Vec<Self::Record>>;
}

/// Outcome of folding one page into the cursor state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStep {
    /// Request the next page from [`PageCursor::current`]
    Continue,
    Exhausted,
}

/// Cursor state for one pagination run
#[derive(Debug, Clone)]
pub struct PageCursor {
    feed: FeedKind,
    page_size: usize,
    current: String,
    previous: Option<String>,
    pages: usize,
}

impl PageCursor {
    pub fn new(feed: FeedKind, initial: &str, page_size: usize) -> Self {
        Self {
            feed,
            page_size,
            current: initial.to_string(),
            previous: None,
            pages: 0,
        }
    }

    /// Cursor for the next request
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Pages folded so far
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Fold a page, given its length and the cursor of its last record
    pub fn advance(&mut self, page_len: usize, last_cursor: Option<&str>) -> TagResult<PageStep> {
        self.pages += 1;

        let Some(last) = last_cursor else {
            return Ok(PageStep::Exhausted);
        };

        let behind_previous = self
            .previous
            .as_deref()
            .map_or(false, |previous| last <= previous);
        if last <= self.current.as_str() || behind_previous {
            return Err(TagError::PaginationStalled {
                feed: self.feed,
                cursor: last.to_string(),
                previous: self.current.clone(),
            });
        }

        if page_len < self.page_size {
            return Ok(PageStep::Exhausted);
        }

        self.previous = Some(std::mem::replace(&mut self.current, last.to_string()));
        Ok(PageStep::Continue)
    }
}

/// Page `source` to exhaustion at `snapshot`, preserving source order
pub async fn paginate_all<S>(
    source: &S,
    snapshot: SnapshotMarker,
    page_size: usize,
) -> TagResult<Vec<S::Record>>
where
    S: PageSource + ?Sized,
{
    if page_size == 0 {
        return Err(TagError::Config(
            "page size must be greater than zero".to_string(),
        ));
    }

    let feed = source.feed();
    let mut cursor = PageCursor::new(feed, source.initial_cursor(), page_size);
    let mut records = Vec::new();

    loop {
        let page = source
            .fetch_page(cursor.current(), snapshot, page_size)
            .await?;
        let step = cursor.advance(page.len(), page.last().map(|record| record.cursor()))?;

        logger::debug(
            LogTag::Paginator,
            &format!(
                "[{}] page {} at {}: {} records",
                feed,
                cursor.pages(),
                snapshot,
                page.len()
            ),
        );

        records.extend(page);
        if step == PageStep::Exhausted {
            break;
        }
    }

    logger::debug(
        LogTag::Paginator,
        &format!(
            "[{}] exhausted after {} pages, {} records",
            feed,
            cursor.pages(),
            records.len()
        ),
    );
    Ok(records)
}
