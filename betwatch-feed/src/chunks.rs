//! Block-range partitioning for span-limited `eth_getLogs` providers.
//!
//! Public RPC endpoints cap the block span a single log query may cover.
//! [`windows`] splits `[start, latest]` into consecutive windows that stay
//! under that cap, newest first, so the freshest bets land before older
//! history is touched.

/// Partition `[start, latest]` into query windows of span at most
/// `max_span`, ordered most recent first.
///
/// Windows never overlap and together cover every block in the range
/// exactly once. The unclamped lower edge steps down by `max_span` per
/// window; the window above always ends one block below the previous lower
/// edge, so only the newest window spans `max_span + 1` blocks.
///
/// Callers must uphold `latest >= start`. A zero `max_span` is treated
/// as one.
#[must_use]
pub fn windows(start: u64, latest: u64, max_span: u64) -> Vec<(u64, u64)> {
    let span = max_span.max(1);
    let mut out = Vec::new();

    let mut to = latest;
    let mut from = latest.saturating_sub(span);
    loop {
        out.push((from.max(start), to));
        if from <= start {
            break;
        }
        to = from - 1;
        from = from.saturating_sub(span);
    }
    out
}
