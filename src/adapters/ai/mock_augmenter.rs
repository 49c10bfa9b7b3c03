//! Mock AI adapters for testing.
//!
//! Provides a configurable mock implementation of both AI ports, allowing
//! tests to run without calling a real model.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in order
//! - Error injection for fallback testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let augmenter = MockAugmenter::new()
//!     .with_reply(MockReply::ReverseSlots)
//!     .with_reply(MockReply::Error(AugmentError::Unavailable("down".into())));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::catalog::ProductDraft;
use crate::domain::routine::{Alert, Routine};
use crate::ports::{AugmentError, AugmentationRequest, ProductAttributeExtractor, RoutineAugmenter};

/// A configured mock reply to `augment`.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return the request routine unchanged.
    Echo,
    /// Reverse the product order in every slot.
    ReverseSlots,
    /// Keep the order, add an advisory alert to every slot and a summary.
    Annotate { alert: String, summary: String },
    /// Return this exact routine.
    Routine(Routine),
    /// Fail with this error.
    Error(AugmentError),
}

impl MockReply {
    fn apply(self, request: &AugmentationRequest) -> Result<Routine, AugmentError> {
        let mut routine = request.routine.clone();
        match self {
            MockReply::Echo => Ok(routine),
            MockReply::ReverseSlots => {
                routine.morning.products.reverse();
                routine.midday.products.reverse();
                routine.evening.products.reverse();
                Ok(routine)
            }
            MockReply::Annotate { alert, summary } => {
                routine.morning.alerts.push(Alert::advisory(alert.clone()));
                routine.midday.alerts.push(Alert::advisory(alert.clone()));
                routine.evening.alerts.push(Alert::advisory(alert));
                routine.summary = Some(summary);
                Ok(routine)
            }
            MockReply::Routine(routine) => Ok(routine),
            MockReply::Error(err) => Err(err),
        }
    }
}

/// Mock routine augmenter and product extractor.
#[derive(Debug, Clone, Default)]
pub struct MockAugmenter {
    /// Replies consumed in order; `Echo` once exhausted.
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    /// Drafts returned by `propose`, consumed in order.
    drafts: Arc<Mutex<VecDeque<Result<ProductDraft, AugmentError>>>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<AugmentationRequest>>>,
    proposals: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockAugmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reply to the queue.
    pub fn with_reply(self, reply: MockReply) -> Self {
        lock(&self.replies).push_back(reply);
        self
    }

    /// Adds a `propose` result to the queue.
    pub fn with_draft(self, draft: Result<ProductDraft, AugmentError>) -> Self {
        lock(&self.drafts).push_back(draft);
        self
    }

    /// Returns the number of `augment` calls.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded `augment` requests.
    pub fn get_calls(&self) -> Vec<AugmentationRequest> {
        lock(&self.calls).clone()
    }

    /// Returns every product name passed to `propose`.
    pub fn get_proposals(&self) -> Vec<String> {
        lock(&self.proposals).clone()
    }
}

#[async_trait]
impl RoutineAugmenter for MockAugmenter {
    async fn augment(&self, request: AugmentationRequest) -> Result<Routine, AugmentError> {
        let reply = lock(&self.replies).pop_front().unwrap_or(MockReply::Echo);
        let result = reply.apply(&request);
        lock(&self.calls).push(request);
        result
    }
}

#[async_trait]
impl ProductAttributeExtractor for MockAugmenter {
    async fn propose(&self, product_name: &str) -> Result<ProductDraft, AugmentError> {
        lock(&self.proposals).push(product_name.to_string());
        lock(&self.drafts)
            .pop_front()
            .unwrap_or_else(|| Err(AugmentError::Unavailable("no mock draft queued".to_string())))
    }
}
