//! Fan-in merge of the worker output channels

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Merge the worker output channels into one combined channel
///
/// One relay task per input forwards every value verbatim into the combined
/// channel. A supervisor task holds the original sender and awaits every
/// relay handle before dropping it — the completion barrier. The combined
/// channel therefore closes exactly once, and only after all relays have
/// finished, even though the relays finish concurrently and independently.
///
/// Relay failures are logged; a panicked relay still counts as finished, so
/// the barrier never wedges.
pub fn merge(inputs: Vec<mpsc::Receiver<i64>>, capacity: usize) -> mpsc::Receiver<i64> {
    let (merged_tx, merged_rx) = mpsc::channel(capacity);

    let mut relays: Vec<JoinHandle<u64>> = Vec::with_capacity(inputs.len());
    for (lane, mut input) in inputs.into_iter().enumerate() {
        let merged = merged_tx.clone();
        relays.push(tokio::spawn(async move {
            let mut forwarded: u64 = 0;
            while let Some(value) = input.recv().await {
                if merged.send(value).await.is_err() {
                    tracing::debug!(lane, "combined channel closed, relay stopping");
                    break;
                }
                forwarded += 1;
            }
            tracing::debug!(lane, forwarded, "relay finished");
            forwarded
        }));
    }

    tokio::spawn(async move {
        let mut forwarded: u64 = 0;
        for (lane, relay) in relays.into_iter().enumerate() {
            match relay.await {
                Ok(count) => forwarded += count,
                Err(e) => tracing::error!(lane, error = %e, "relay task failed"),
            }
        }
        drop(merged_tx);
        tracing::debug!(forwarded, "all relays finished, combined channel closed");
    });

    merged_rx
}
