//! Fan-out/fan-in stage that trades ordering for parallelism.
//!
//! `workers` tasks pull from one bounded input queue, apply the transform and
//! push whatever it produced onto a bounded output queue. A single collector
//! drains that queue into the sink, so the sink is never driven concurrently.
//! Both queues hold at most `workers` items; a full input queue stalls
//! `enqueue` instead of buffering without limit.

use ferrous_rdns_application::ports::RecordSink;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tracing::{debug, error, warn};

pub struct UnorderedPipeline<I, S> {
    input: mpsc::Sender<I>,
    supervisor: JoinHandle<()>,
    collector: JoinHandle<S>,
}

impl<I, S> UnorderedPipeline<I, S>
where
    I: Send + 'static,
    S: Send + 'static,
{
    /// Starts the worker pool and the collector.
    ///
    /// # Panics
    ///
    /// Panics if `workers` is zero.
    pub fn new<O, F, Fut>(mut sink: S, transform: F, workers: usize) -> Self
    where
        S: RecordSink<O>,
        O: Send + 'static,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Vec<O>> + Send + 'static,
    {
        assert!(workers > 0, "UnorderedPipeline needs at least one worker");

        let (input, in_rx) = mpsc::channel::<I>(workers);
        let (out_tx, mut out_rx) = mpsc::channel::<O>(workers);

        let in_rx = Arc::new(Mutex::new(in_rx));
        let transform = Arc::new(transform);

        let supervisor = tokio::spawn(async move {
            let mut pool = JoinSet::new();
            for _ in 0..workers {
                pool.spawn(run_worker(
                    Arc::clone(&in_rx),
                    out_tx.clone(),
                    Arc::clone(&transform),
                ));
            }
            // Workers hold the remaining senders; the output queue closes once
            // the last of them exits.
            drop(out_tx);

            while let Some(result) = pool.join_next().await {
                if let Err(e) = result {
                    error!(error = %e, "Pipeline worker terminated abnormally");
                }
            }
            debug!(workers = workers, "All pipeline workers drained");
        });

        let collector = tokio::spawn(async move {
            while let Some(item) = out_rx.recv().await {
                sink.accept(item);
            }
            sink
        });

        Self {
            input,
            supervisor,
            collector,
        }
    }

    /// Queues `item`, waiting while the input queue is full.
    pub async fn enqueue(&self, item: I) {
        if self.input.send(item).await.is_err() {
            warn!("Pipeline workers are gone, dropping item");
        }
    }

    /// Closes the input, waits until every queued item has been transformed and
    /// delivered, and hands the sink back.
    pub async fn stop(self) -> Result<S, JoinError> {
        drop(self.input);

        if let Err(e) = self.supervisor.await {
            error!(error = %e, "Pipeline supervisor terminated abnormally");
        }

        self.collector.await
    }
}

async fn run_worker<I, O, F, Fut>(
    input: Arc<Mutex<mpsc::Receiver<I>>>,
    output: mpsc::Sender<O>,
    transform: Arc<F>,
) where
    F: Fn(I) -> Fut,
    Fut: Future<Output = Vec<O>>,
{
    loop {
        // The lock is released as soon as an item is taken.
        let item = input.lock().await.recv().await;
        let Some(item) = item else {
            break;
        };

        for produced in transform(item).await {
            if output.send(produced).await.is_err() {
                return;
            }
        }
    }
}
