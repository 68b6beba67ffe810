//! Offset pagination over page-indexed endpoints
//!
//! The platform exposes lists as `/{page}/{page_size}` endpoints and gives no
//! total count. A page shorter than `page_size` (including an empty one) is
//! the only end-of-list signal.

use crate::error::ApiResult;
use std::future::Future;
use tracing::debug;

/// Fetch pages `0, 1, 2, ...` until one comes back short, concatenating them
///
/// Pages are appended in request order without deduplication. The first
/// error aborts the walk and everything accumulated so far is dropped.
///
/// # Errors
/// Whatever `fetch_page` returns for the failing page
pub async fn fetch_all_pages<T, F, Fut>(page_size: usize, mut fetch_page: F) -> ApiResult<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = ApiResult<Vec<T>>>,
{
    let mut items = Vec::new();
    let mut page = 0;

    loop {
        let chunk = fetch_page(page).await?;
        let received = chunk.len();
        items.extend(chunk);

        debug!(page, received, total = items.len(), "fetched page");

        if received != page_size {
            break;
        }
        page += 1;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn walk(sizes: &[usize]) -> (ApiResult<Vec<usize>>, usize) {
        let calls = AtomicUsize::new(0);
        let result = fetch_all_pages(50, |page| {
            calls.fetch_add(1, Ordering::SeqCst);
            let size = sizes.get(page).copied().unwrap_or(0);
            let chunk: Vec<usize> = (0..size).map(|i| page * 1000 + i).collect();
            async move { Ok(chunk) }
        })
        .await;
        (result, calls.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn short_last_page_terminates() {
        let (items, calls) = walk(&[50, 50, 37]).await;
        assert_eq!(items.unwrap().len(), 137);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn empty_page_terminates() {
        let (items, calls) = walk(&[50, 50, 50, 0]).await;
        assert_eq!(items.unwrap().len(), 150);
        assert_eq!(calls, 4);
    }

    #[tokio::test]
    async fn short_first_page_is_the_only_page() {
        let (items, calls) = walk(&[3]).await;
        assert_eq!(items.unwrap(), vec![0, 1, 2]);
        assert_eq!(calls, 1);

        let (items, calls) = walk(&[]).await;
        assert!(items.unwrap().is_empty());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn pages_are_concatenated_in_request_order() {
        let (items, _) = walk(&[50, 2]).await;
        let items = items.unwrap();
        assert_eq!(items[0], 0);
        assert_eq!(items[49], 49);
        assert_eq!(&items[50..], &[1000, 1001]);
    }

    #[tokio::test]
    async fn failure_discards_accumulated_pages() {
        let calls = AtomicUsize::new(0);
        let result: ApiResult<Vec<u8>> = fetch_all_pages(2, |page| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if page == 1 {
                    Err(ApiError::RemoteRequestFailed {
                        status: 500,
                        url: "page-1".to_string(),
                    })
                } else {
                    Ok(vec![1, 2])
                }
            }
        })
        .await;

        assert!(matches!(
            result,
            Err(ApiError::RemoteRequestFailed { status: 500, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
