use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Semaphore};
use tracing::{info, warn};

use super::TextModel;
use crate::error::FetchError;

/// A request to be queued for LLM processing
struct QueuedRequest {
    prompt: String,
    response_tx: oneshot::Sender<Result<String, FetchError>>,
}

/// Bounded FIFO in front of a `TextModel`, limiting how many panel requests
/// hit the provider at once.
#[derive(Clone)]
pub struct LLMQueue {
    tx: mpsc::Sender<QueuedRequest>,
}

impl LLMQueue {
    /// Spawns the processor; must be called inside a tokio runtime.
    pub fn new(model: Arc<dyn TextModel>, max_concurrent: usize, queue_size: usize) -> Self {
        let (tx, rx) = mpsc::channel::<QueuedRequest>(queue_size.max(1));
        let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));

        tokio::spawn(Self::process_queue(model, semaphore, rx));

        Self { tx }
    }

    async fn process_queue(
        model: Arc<dyn TextModel>,
        semaphore: Arc<Semaphore>,
        mut rx: mpsc::Receiver<QueuedRequest>,
    ) {
        info!(
            "📬 [QUEUE] LLM queue processor started (max concurrent: {})",
            semaphore.available_permits()
        );

        while let Some(request) = rx.recv().await {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    let _ = request
                        .response_tx
                        .send(Err(FetchError::Network("LLM queue closed".to_string())));
                    continue;
                }
            };

            info!(
                "📬 [QUEUE] Acquired permit. {} slots remaining",
                semaphore.available_permits()
            );

            let model = model.clone();
            tokio::spawn(async move {
                let result = model.generate(&request.prompt).await;
                if request.response_tx.send(result).is_err() {
                    warn!("📬 [QUEUE] Requester went away before the reply arrived");
                }
                drop(permit);
            });
        }

        info!("📬 [QUEUE] Channel closed, shutting down");
    }
}

#[async_trait]
impl TextModel for LLMQueue {
    async fn generate(&self, prompt: &str) -> Result<String, FetchError> {
        let (response_tx, response_rx) = oneshot::channel();

        let request = QueuedRequest {
            prompt: prompt.to_string(),
            response_tx,
        };

        self.tx
            .send(request)
            .await
            .map_err(|_| FetchError::Network("Failed to queue LLM request".to_string()))?;

        response_rx
            .await
            .map_err(|_| FetchError::Network("LLM request was cancelled".to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct SlowEcho {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl TextModel for SlowEcho {
        async fn generate(&self, prompt: &str) -> Result<String, FetchError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(prompt.to_uppercase())
        }
    }

    #[tokio::test]
    async fn test_queue_forwards_replies() {
        let model = Arc::new(SlowEcho { in_flight: AtomicUsize::new(0), peak: AtomicUsize::new(0) });
        let queue = LLMQueue::new(model, 2, 8);
        assert_eq!(queue.generate("abc").await.unwrap(), "ABC");
    }

    #[tokio::test]
    async fn test_queue_caps_concurrency() {
        let model = Arc::new(SlowEcho { in_flight: AtomicUsize::new(0), peak: AtomicUsize::new(0) });
        let queue = LLMQueue::new(model.clone(), 2, 16);

        let mut handles = Vec::new();
        for i in 0..6 {
            let q = queue.clone();
            handles.push(tokio::spawn(async move { q.generate(&format!("p{}", i)).await }));
        }
        for h in handles {
            assert!(h.await.unwrap().is_ok());
        }
        assert!(model.peak.load(Ordering::SeqCst) <= 2);
    }
}
