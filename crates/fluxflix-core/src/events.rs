//! Timer-driven viewing-event stream.
//!
//! Each call to [`EventStream::spawn`] starts one background task that
//! sleeps for the configured interval, waits for room in a bounded channel,
//! and pushes a [`MovieEvent`] stamped at that moment. The consumer side is
//! the [`EventStream`] itself, which implements [`Stream`].
//!
//! # Cadence
//!
//! The delay is applied before every element, including the first. With the
//! default one-second interval, the Nth event becomes available N seconds
//! after the stream was created. The delay is measured between emissions,
//! and the producer never runs more than one event ahead of the consumer,
//! so a slow consumer does not build up a backlog.
//!
//! # Cancellation
//!
//! The stream never ends on its own. Dropping the [`EventStream`] (or
//! calling [`EventStream::cancel`]) cancels the producer's token; the
//! producer observes it inside its timed wait and exits without emitting
//! again. An event already sitting in the channel is discarded with the
//! receiver.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use fluxflix_types::{MovieEvent, MovieId};
use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

/// Default delay between consecutive events.
pub const DEFAULT_EVENT_INTERVAL: Duration = Duration::from_secs(1);

/// Events buffered between producer and consumer.
///
/// Kept at one so the producer runs at most one event ahead of the
/// consumer.
const CHANNEL_CAPACITY: usize = 1;

/// Cadence settings for event streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventStreamConfig {
    /// Delay applied before each emitted event.
    pub interval: Duration,
}

impl EventStreamConfig {
    /// Create a configuration with the given interval.
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for EventStreamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_INTERVAL)
    }
}

/// An unbounded stream of [`MovieEvent`]s for one movie id.
///
/// Streams are fully independent: each owns its own producer task,
/// channel, and cancellation token.
pub struct EventStream {
    movie_id: MovieId,
    events: ReceiverStream<MovieEvent>,
    producer: JoinHandle<()>,
    guard: DropGuard,
}

impl EventStream {
    /// Start producing events for `movie_id` on the current Tokio runtime.
    ///
    /// The id is not validated; a stream for an unknown movie emits just
    /// the same.
    pub fn spawn(movie_id: MovieId, config: EventStreamConfig) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let token = CancellationToken::new();

        let producer = tokio::spawn(produce(
            movie_id.clone(),
            config.interval,
            tx,
            token.clone(),
        ));

        Self {
            movie_id,
            events: ReceiverStream::new(rx),
            producer,
            guard: token.drop_guard(),
        }
    }

    /// The movie id this stream emits events for.
    pub const fn movie_id(&self) -> &MovieId {
        &self.movie_id
    }

    /// Stop the stream explicitly.
    ///
    /// Returns the producer's [`JoinHandle`], which resolves once the
    /// producer has observed the cancellation and exited.
    pub fn cancel(self) -> JoinHandle<()> {
        let Self {
            movie_id,
            events,
            producer,
            guard,
        } = self;
        guard.disarm().cancel();
        drop(events);
        debug!(%movie_id, "Event stream cancelled");
        producer
    }
}

impl Stream for EventStream {
    type Item = MovieEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.events).poll_next(cx)
    }
}

impl core::fmt::Debug for EventStream {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventStream")
            .field("movie_id", &self.movie_id)
            .finish_non_exhaustive()
    }
}

/// Producer loop: wait one interval, emit one event, repeat until
/// cancelled or the receiver is gone.
async fn produce(
    movie_id: MovieId,
    interval: Duration,
    tx: mpsc::Sender<MovieEvent>,
    token: CancellationToken,
) {
    debug!(%movie_id, interval_ms = interval.as_millis(), "Event stream started");
    let mut emitted: u64 = 0;

    loop {
        tokio::select! {
            biased;
            () = token.cancelled() => break,
            () = tx.closed() => break,
            () = tokio::time::sleep(interval) => {}
        }

        // Stamp after the slot is free, not before waiting on it.
        tokio::select! {
            biased;
            () = token.cancelled() => break,
            permit = tx.reserve() => match permit {
                Ok(permit) => permit.send(MovieEvent::now(movie_id.clone())),
                Err(_) => break,
            },
        }
        emitted = emitted.saturating_add(1);
    }

    debug!(%movie_id, emitted, "Event stream stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures::StreamExt;
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_event_arrives_after_one_interval() {
        let start = Instant::now();
        let mut stream = EventStream::spawn(MovieId::from("m1"), EventStreamConfig::default());

        let event = stream.next().await.unwrap();
        assert_eq!(event.movie_id, MovieId::from("m1"));
        assert_eq!(start.elapsed(), DEFAULT_EVENT_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_interval_is_respected() {
        let interval = Duration::from_millis(250);
        let start = Instant::now();
        let stream = EventStream::spawn(MovieId::from("m1"), EventStreamConfig::new(interval));

        let events: Vec<_> = stream.take(4).collect().await;
        assert_eq!(events.len(), 4);
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_the_producer() {
        let mut stream = EventStream::spawn(MovieId::from("m1"), EventStreamConfig::default());
        stream.next().await.unwrap();

        let producer = stream.cancel();
        tokio::time::timeout(Duration::from_millis(10), producer)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    #[allow(clippy::arithmetic_side_effects)]
    async fn slow_consumer_gets_fresh_timestamps() {
        let interval = Duration::from_millis(20);
        let mut stream = EventStream::spawn(MovieId::from("m1"), EventStreamConfig::new(interval));

        tokio::time::sleep(Duration::from_millis(200)).await;
        let queued = stream.next().await.unwrap();
        let next = stream.next().await.unwrap();

        // The second event could only be stamped after the first was taken.
        let gap = next.date_viewed - queued.date_viewed;
        assert!(gap.num_milliseconds() >= 150, "gap was {gap}");
    }

    #[tokio::test(start_paused = true)]
    async fn debug_output_names_the_movie() {
        let stream = EventStream::spawn(MovieId::from("m42"), EventStreamConfig::default());
        assert!(format!("{stream:?}").contains("m42"));
        assert_eq!(stream.movie_id().as_str(), "m42");
    }
}
