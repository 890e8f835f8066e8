//! Concurrent fetching of chunked requests.
//!
//! Several Steam endpoints cap how many ids one call may carry. This helper
//! splits the input into chunks and keeps up to `max_concurrent` chunk
//! requests in flight.

use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use crate::error::Result;

/// Type alias for boxed chunk futures, tagged with the chunk index
type ChunkFuture<'a, T> = Pin<Box<dyn Future<Output = (usize, Result<Vec<T>>)> + Send + 'a>>;

/// Fetch `items` in chunks of `chunk_size`, concurrently.
///
/// Results are returned in input order regardless of arrival order. The
/// first failing chunk aborts the whole fetch; chunks still in flight are
/// dropped.
///
/// # Example
///
/// ```ignore
/// let summaries = fetch_in_chunks(ids, 100, 4, |chunk| async move {
///     player.get_player_summaries(&chunk).await
/// })
/// .await?;
/// ```
pub async fn fetch_in_chunks<'a, I, T, F, Fut>(
    items: Vec<I>,
    chunk_size: usize,
    max_concurrent: usize,
    fetch_chunk: F,
) -> Result<Vec<T>>
where
    I: Clone + Send + 'a,
    T: Send + 'a,
    F: Fn(Vec<I>) -> Fut + 'a,
    Fut: Future<Output = Result<Vec<T>>> + Send + 'a,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let chunks: Vec<Vec<I>> = items
        .chunks(chunk_size.max(1))
        .map(|c| c.to_vec())
        .collect();
    let chunk_count = chunks.len();

    debug!(
        "Fetching {} chunks with max {} concurrent",
        chunk_count, max_concurrent
    );

    let mut results: Vec<Option<Vec<T>>> = (0..chunk_count).map(|_| None).collect();
    let mut futures: FuturesUnordered<ChunkFuture<'a, T>> = FuturesUnordered::new();
    let mut pending = chunks.into_iter().enumerate();

    let make_future = |index: usize, chunk: Vec<I>, f: &F| -> ChunkFuture<'a, T> {
        let fut = f(chunk);
        Box::pin(async move { (index, fut.await) })
    };

    for (index, chunk) in pending.by_ref().take(max_concurrent.max(1)) {
        futures.push(make_future(index, chunk, &fetch_chunk));
    }

    while let Some((index, result)) = futures.next().await {
        let items = result?;
        debug!("Chunk {} returned {} items", index, items.len());
        results[index] = Some(items);

        if let Some((next, chunk)) = pending.next() {
            futures.push(make_future(next, chunk, &fetch_chunk));
        }
    }

    Ok(results.into_iter().flatten().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let calls = AtomicUsize::new(0);
        let result: Vec<u32> = fetch_in_chunks(Vec::<u32>::new(), 100, 4, |chunk| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(chunk) }
        })
        .await
        .unwrap();

        assert!(result.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chunks_and_preserves_order() {
        let sizes = Arc::new(std::sync::Mutex::new(Vec::new()));
        let recorded = sizes.clone();

        let items: Vec<u32> = (0..250).collect();
        let result: Vec<u32> = fetch_in_chunks(items, 100, 3, move |chunk| {
            recorded.lock().unwrap().push(chunk.len());
            // Later chunks finish first
            let delay = 30 - chunk[0] as u64 / 10;
            async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
                Ok(chunk.into_iter().map(|i| i * 2).collect::<Vec<_>>())
            }
        })
        .await
        .unwrap();

        assert_eq!(result.len(), 250);
        assert_eq!(result[0], 0);
        assert_eq!(result[249], 498);
        assert!(result.windows(2).all(|w| w[0] < w[1]));

        let mut seen = sizes.lock().unwrap().clone();
        seen.sort();
        assert_eq!(seen, vec![50, 100, 100]);
    }

    #[tokio::test]
    async fn test_respects_concurrency() {
        let concurrent = Arc::new(AtomicUsize::new(0));
        let max_observed = Arc::new(AtomicUsize::new(0));

        let cc = concurrent.clone();
        let mo = max_observed.clone();

        let result: Vec<u32> = fetch_in_chunks((0..10).collect::<Vec<u32>>(), 1, 2, move |chunk| {
            let cc = cc.clone();
            let mo = mo.clone();
            async move {
                let current = cc.fetch_add(1, Ordering::SeqCst) + 1;
                mo.fetch_max(current, Ordering::SeqCst);
                tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
                cc.fetch_sub(1, Ordering::SeqCst);
                Ok(chunk)
            }
        })
        .await
        .unwrap();

        assert_eq!(result.len(), 10);
        assert!(max_observed.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_propagates_errors() {
        let result: Result<Vec<u32>> = fetch_in_chunks(vec![1u32, 2, 3], 1, 4, |chunk| async move {
            if chunk[0] == 2 {
                Err(crate::error::ApiError::ServerError("test error".to_string()).into())
            } else {
                Ok(chunk)
            }
        })
        .await;

        assert!(result.is_err());
    }
}
