//! Continuation-token pagination for `list` endpoints.
//!
//! Each response carries an optional `nextPageToken`; the loop follows it
//! until the token is absent or the caller's page cap is reached. Reaching
//! the cap is not an error: everything fetched so far is returned.

use std::future::Future;

use crate::error::YouTubeError;
use crate::types::ListResponse;

/// Treats a missing or blank continuation token as exhaustion.
pub(crate) fn next_token(raw: Option<String>) -> Option<String> {
    raw.filter(|t| !t.trim().is_empty())
}

/// Fetches up to `max_pages` pages via `fetch_page(token)` and concatenates
/// their items in page order.
///
/// # Errors
///
/// Propagates the first page error; earlier pages are discarded with it.
pub(crate) async fn collect_pages<T, F, Fut>(
    label: &str,
    max_pages: usize,
    mut fetch_page: F,
) -> Result<Vec<T>, YouTubeError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ListResponse<T>, YouTubeError>>,
{
    let mut items: Vec<T> = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0usize;

    while pages < max_pages {
        let page = fetch_page(token.take()).await?;
        pages += 1;
        items.extend(page.items);

        token = next_token(page.next_page_token);
        if token.is_none() {
            break;
        }
    }

    if token.is_some() {
        tracing::debug!(
            request = label,
            pages,
            items = items.len(),
            "page cap reached before exhausting results"
        );
    }

    Ok(items)
}
