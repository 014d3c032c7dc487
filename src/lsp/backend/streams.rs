//! Stream utilities for the backend's change pipelines.
//!
//! Rapid typing produces a change event per keystroke; the validation and
//! history pipelines each only care about the state after the edits settle.
//! `debounce_time` models that: schedule the item after a quiet period, and
//! let every newer item cancel and replace the pending one.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;

/// Stream extension trait for the debounce operator.
pub trait StreamExt: Stream {
    /// Debounces stream emissions, emitting only the most recent item after a
    /// period of inactivity.
    fn debounce_time(self, duration: Duration) -> DebounceStream<Self>
    where
        Self: Sized,
    {
        DebounceStream::new(self, duration)
    }
}

impl<T: Stream> StreamExt for T {}

/// Debounce stream operator.
///
/// Emits an item only after `duration` has elapsed without new items; a new
/// arrival within the window replaces the pending item and resets the timer.
pub struct DebounceStream<S: Stream> {
    stream: S,
    duration: Duration,
    pending: Option<S::Item>,
    sleep: Option<Pin<Box<tokio::time::Sleep>>>,
}

impl<S: Stream> DebounceStream<S> {
    pub fn new(stream: S, duration: Duration) -> Self {
        Self {
            stream,
            duration,
            pending: None,
            sleep: None,
        }
    }
}

impl<S> Stream for DebounceStream<S>
where
    S: Stream + Unpin,
    S::Item: Unpin,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.as_mut().get_mut();

        // Quiet period over: release the pending item.
        if let Some(sleep) = this.sleep.as_mut() {
            if sleep.as_mut().poll(cx).is_ready() {
                this.sleep = None;
                if let Some(item) = this.pending.take() {
                    return Poll::Ready(Some(item));
                }
            }
        }

        loop {
            match Pin::new(&mut this.stream).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    // Newer item supersedes the pending one; restart the timer.
                    this.pending = Some(item);
                    this.sleep = Some(Box::pin(tokio::time::sleep(this.duration)));
                    if let Some(sleep) = this.sleep.as_mut() {
                        let _ = sleep.as_mut().poll(cx);
                    }
                }
                Poll::Ready(None) => {
                    // Source ended; flush whatever is still pending.
                    return if let Some(item) = this.pending.take() {
                        Poll::Ready(Some(item))
                    } else {
                        Poll::Ready(None)
                    };
                }
                Poll::Pending => {
                    return Poll::Pending;
                }
            }
        }
    }
}
