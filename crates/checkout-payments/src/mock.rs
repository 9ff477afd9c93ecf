//! Mock Processor
//!
//! For testing and demo purposes. Replies from a script and records every
//! request it receives.

use std::collections::VecDeque;
use std::cell::RefCell;
use std::time::Duration;

use async_trait::async_trait;
use checkout_core::{
    CheckoutError, PaymentProcessor, ProcessorRequest, ProcessorResponse, Result,
};

/// One scripted processor reply
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockReply {
    /// Succeed with this redirect URL
    Redirect(String),

    /// Succeed without a redirect URL
    NoRedirect,

    /// Reject with this message
    Fail(String),

    /// Never settle
    Hang,
}

/// Scripted payment processor
#[derive(Debug)]
pub struct MockProcessor {
    script: RefCell<VecDeque<MockReply>>,
    fallback: MockReply,
    delay: Option<Duration>,
    requests: RefCell<Vec<ProcessorRequest>>,
}

impl MockProcessor {
    /// Answers every request with the same redirect
    pub fn redirecting(url: impl Into<String>) -> Self {
        Self::with_fallback(VecDeque::new(), MockReply::Redirect(url.into()))
    }

    /// Plays `replies` in order, then fails every further request
    pub fn scripted(replies: Vec<MockReply>) -> Self {
        Self::with_fallback(
            replies.into(),
            MockReply::Fail("mock processor script exhausted".into()),
        )
    }

    fn with_fallback(script: VecDeque<MockReply>, fallback: MockReply) -> Self {
        Self {
            script: RefCell::new(script),
            fallback,
            delay: None,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Wait this long before answering (for exercising pending states)
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<ProcessorRequest> {
        self.requests.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn next_reply(&self) -> MockReply {
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait(?Send)]
impl PaymentProcessor for MockProcessor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn process(&self, request: &ProcessorRequest) -> Result<ProcessorResponse> {
        self.requests.borrow_mut().push(request.clone());

        let reply = self.next_reply();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            MockReply::Redirect(url) => Ok(ProcessorResponse::redirect(url)),
            MockReply::NoRedirect => Ok(ProcessorResponse::default()),
            MockReply::Fail(message) => Err(CheckoutError::Processor(message)),
            MockReply::Hang => std::future::pending().await,
        }
    }
}
