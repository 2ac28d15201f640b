//! In-memory transport for unit tests: replays queued responses and records requests.

use crate::transport::{Transport, TransportError, TransportResponse};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use url::Url;

type Recorded = (Url, BTreeMap<String, String>);

#[derive(Default)]
pub(crate) struct FakeTransport {
    replies: Mutex<VecDeque<Result<TransportResponse, String>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push(&self, response: TransportResponse) {
        self.replies.lock().unwrap().push_back(Ok(response));
    }

    pub(crate) fn push_json(&self, body: &str) {
        self.push(TransportResponse::json(body));
    }

    pub(crate) fn push_error(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub(crate) fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> Option<Recorded> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for FakeTransport {
    fn get(
        &self,
        url: &Url,
        query: &BTreeMap<String, String>,
    ) -> Result<TransportResponse, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.clone(), query.clone()));
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(TransportError::Other(message)),
            None => Err(TransportError::Other("no reply queued".to_string())),
        }
    }
}
