//! Wait until any of several watchers fires, the deadline passes, or the
//! caller cancels.

use super::channels::CancelSignal;
use super::error::{WatchError, WatchResult};
use super::source::FrameSource;
use super::types::{FrameSnapshot, WaitOutcome, WaitState};
use super::watcher::VisualWatcher;
use tokio::time::{Duration, Instant, timeout_at};

/// Pull frames from `source` and feed each one to `watchers` in order,
/// stopping at the first watcher that fires. Watchers after it do not see
/// that frame.
pub async fn wait_until<S: FrameSource>(
    source: &mut S,
    watchers: &mut [&mut dyn VisualWatcher],
    timeout: Duration,
    cancel: &CancelSignal,
) -> WatchResult<WaitOutcome> {
    let started = Instant::now();
    let deadline = started + timeout;
    let mut state = WaitState::Polling;
    let mut frames = 0u64;

    let outcome = loop {
        if let Some(outcome) = state.outcome() {
            break outcome;
        }
        if Instant::now() >= deadline {
            state = WaitState::TimedOut;
            continue;
        }

        let pulled = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            pulled = timeout_at(deadline, source.next_frame()) => Some(pulled),
        };

        state = match pulled {
            None => WaitState::Cancelled,
            Some(Err(_elapsed)) => WaitState::TimedOut,
            Some(Ok(result)) => {
                let snapshot = result?;
                frames += 1;
                let next = update_watchers(watchers, &snapshot)?;
                log::debug!("Frame {}: {:?}", frames, next);
                next
            }
        };
    };

    match outcome {
        WaitOutcome::Satisfied(i) => log::info!(
            "✅ Wait {} ({}) after {} frames in {:?}",
            outcome,
            watchers[i].name(),
            frames,
            started.elapsed()
        ),
        _ => log::info!(
            "⏹️ Wait {} after {} frames in {:?}",
            outcome,
            frames,
            started.elapsed()
        ),
    }
    Ok(outcome)
}

fn update_watchers(
    watchers: &mut [&mut dyn VisualWatcher],
    snapshot: &FrameSnapshot,
) -> WatchResult<WaitState> {
    for (i, watcher) in watchers.iter_mut().enumerate() {
        let fired = watcher
            .update(&snapshot.frame, snapshot.timestamp)
            .map_err(|source| WatchError::Inference { source })?;
        if fired {
            return Ok(WaitState::Satisfied(i));
        }
    }
    Ok(WaitState::Polling)
}
