#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_rdns_application::ports::ReverseResolver;
use ferrous_rdns_domain::DomainError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

pub struct MockReverseResolver {
    answers: HashMap<String, Vec<String>>,
    delay: Duration,
    hang: bool,
    should_fail: AtomicBool,
    call_count: AtomicU64,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl MockReverseResolver {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            delay: Duration::ZERO,
            hang: false,
            should_fail: AtomicBool::new(false),
            call_count: AtomicU64::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }

    pub fn with_answer(mut self, address: &str, names: &[&str]) -> Self {
        self.answers.insert(
            address.to_string(),
            names.iter().map(|n| n.to_string()).collect(),
        );
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Never answers, like an unreachable server with no deadline enforcement.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::new()
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ReverseResolver for MockReverseResolver {
    async fn resolve(&self, address: &str, _deadline: Instant) -> Result<Vec<String>, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        if self.hang {
            std::future::pending::<()>().await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.active.fetch_sub(1, Ordering::SeqCst);

        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::ServerFailure("SERVFAIL".to_string()));
        }
        Ok(self.answers.get(address).cloned().unwrap_or_default())
    }
}
