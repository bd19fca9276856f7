//! Fake checks with pre-configured outcomes, for testing the router and
//! the fan-out without network access.

use super::{domain_record, BoardCheck, DomainCheck, StatusCheck};
use async_trait::async_trait;
use herald_common::{PluginError, ResultRecord, Severity};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Outcome {
    Record { severity: Severity, body: String },
    Fail(String),
    Panic,
}

/// Single-service check with a fixed outcome
pub struct FakeCheck {
    name: String,
    link: Option<String>,
    outcome: Outcome,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl FakeCheck {
    fn with_outcome(name: &str, outcome: Outcome) -> Self {
        Self {
            name: name.to_string(),
            link: None,
            outcome,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Succeeds with the given severity; the title is the name
    pub fn ok(name: &str, severity: Severity) -> Self {
        Self::with_outcome(
            name,
            Outcome::Record {
                severity,
                body: format!("{} is {}", name, severity),
            },
        )
    }

    /// Fails with a transport error
    pub fn failing(name: &str) -> Self {
        Self::with_outcome(name, Outcome::Fail("connection refused".to_string()))
    }

    /// Panics inside the check
    pub fn panicking(name: &str) -> Self {
        Self::with_outcome(name, Outcome::Panic)
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Shared call counter, readable after the check moved into a registry
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl StatusCheck for FakeCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    async fn check(&self) -> Result<ResultRecord, PluginError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.outcome {
            Outcome::Record { severity, body } => Ok(self
                .blank_record()
                .with_body(body.clone())
                .with_severity(*severity)),
            Outcome::Fail(message) => Err(PluginError::transport(&self.name, message)),
            Outcome::Panic => panic!("fake check {} panicked", self.name),
        }
    }
}

/// Domain oracle answering from a fixed code table
#[derive(Default)]
pub struct FakeDomainCheck {
    codes: HashMap<String, i64>,
    calls: Arc<AtomicUsize>,
}

impl FakeDomainCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, domain: &str, code: i64) -> Self {
        self.codes.insert(domain.to_string(), code);
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl DomainCheck for FakeDomainCheck {
    /// Unknown domains behave like an unreachable oracle
    async fn check_domain(&self, domain: &str) -> Result<ResultRecord, PluginError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.codes.get(domain) {
            Some(code) => domain_record(domain, *code),
            None => Err(PluginError::transport("isitup", "connection refused")),
        }
    }
}

/// Board returning fixed records or a fixed failure
pub struct FakeBoardCheck {
    outcome: Result<Vec<ResultRecord>, String>,
    calls: Arc<AtomicUsize>,
}

impl FakeBoardCheck {
    pub fn ok(records: Vec<ResultRecord>) -> Self {
        Self {
            outcome: Ok(records),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl BoardCheck for FakeBoardCheck {
    async fn check_board(&self) -> Result<Vec<ResultRecord>, PluginError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(records) => Ok(records.clone()),
            Err(message) => Err(PluginError::transport("AWS", message)),
        }
    }
}
