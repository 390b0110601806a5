//! In-memory adapter doubles shared by unit and integration tests.
//!
//! Every double records what it was asked to do behind a `Mutex` so tests can
//! assert on side effects after a handler returns.

use std::collections::HashMap;
use std::sync::Mutex;

use crm_pipeline_core::contract::LookupResult;

use crate::adapters::lookup::LeadLookup;
use crate::adapters::notifier::Notifier;
use crate::adapters::object_store::ObjectStore;
use crate::adapters::queue::MessageQueue;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
pub struct RecordingStore {
    writes: Mutex<HashMap<String, StoredObject>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.writes
            .lock()
            .expect("poisoned mutex")
            .keys()
            .cloned()
            .collect()
    }

    pub fn body_text(&self, key: &str) -> Option<String> {
        self.writes
            .lock()
            .expect("poisoned mutex")
            .get(key)
            .map(|object| String::from_utf8(object.body.clone()).expect("utf-8 body"))
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.writes
            .lock()
            .expect("poisoned mutex")
            .get(key)
            .map(|object| object.content_type.clone())
    }
}

impl ObjectStore for RecordingStore {
    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), String> {
        self.writes.lock().expect("poisoned mutex").insert(
            key.to_string(),
            StoredObject {
                body: body.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}

pub struct FailingStore;

impl ObjectStore for FailingStore {
    fn put_object(&self, key: &str, _body: &[u8], _content_type: &str) -> Result<(), String> {
        Err(format!("simulated write failure for key: {key}"))
    }
}

#[derive(Default)]
pub struct RecordingQueue {
    messages: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("poisoned mutex").clone()
    }
}

impl MessageQueue for RecordingQueue {
    fn send_message(&self, body: &str) -> Result<(), String> {
        if self.fail {
            return Err("simulated queue outage".to_string());
        }
        self.messages
            .lock()
            .expect("poisoned mutex")
            .push(body.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedNotification {
    pub subject: String,
    pub message: String,
}

#[derive(Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<PublishedNotification>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<PublishedNotification> {
        self.published.lock().expect("poisoned mutex").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn publish(&self, subject: &str, message: &str) -> Result<(), String> {
        if self.fail {
            return Err("simulated topic outage".to_string());
        }
        self.published
            .lock()
            .expect("poisoned mutex")
            .push(PublishedNotification {
                subject: subject.to_string(),
                message: message.to_string(),
            });
        Ok(())
    }
}

/// Returns a fixed lookup for every lead and records which leads were asked for.
pub struct StaticLookup {
    result: LookupResult,
    requested: Mutex<Vec<String>>,
}

impl StaticLookup {
    pub fn returning(result: LookupResult) -> Self {
        Self {
            result,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn miss() -> Self {
        Self::returning(LookupResult::empty())
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().expect("poisoned mutex").clone()
    }
}

impl LeadLookup for StaticLookup {
    fn fetch(&self, lead_id: &str) -> LookupResult {
        self.requested
            .lock()
            .expect("poisoned mutex")
            .push(lead_id.to_string());
        self.result.clone()
    }
}
