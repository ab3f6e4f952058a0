//! Round-trip timing around transport calls

use std::future::Future;

use tokio::time::Instant;

/// Whole milliseconds elapsed since `start`.
///
/// `Instant` is monotonic, so the result never goes negative.
pub fn elapsed_millis(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Await `operation` and report how long it took to succeed.
///
/// The start time is taken before the future is first polled and the end
/// time once it resolves. Failures are returned untouched and no time is
/// reported for them.
pub async fn timed<F, T, E>(operation: F) -> Result<(T, u64), E>
where
    F: Future<Output = Result<T, E>>,
{
    let start = Instant::now();
    let value = operation.await?;
    Ok((value, elapsed_millis(start)))
}
