#![allow(dead_code)]

use async_trait::async_trait;
use cliarr::http::{Params, Transport};
use cliarr::{Error, Result};
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub params: Option<Value>,
    pub body: Option<Value>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.as_ref().and_then(|params| params.get(key))
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Body(Value),
    Status(u16),
}

/// Transport that records requests and answers from a script.
///
/// Unscripted requests get `{}`. Clones share the same script and log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    calls: Arc<Mutex<Vec<Call>>>,
    replies: Arc<Mutex<HashMap<(Method, String), Reply>>>,
    closed: Arc<Mutex<bool>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, body: Value) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Reply::Body(body));
        self
    }

    pub fn fail(&self, method: Method, path: &str, status: u16) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Reply::Status(status));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Requests sent with `method` to `path`.
    pub fn calls_to(&self, method: Method, path: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method && call.path == path)
            .collect()
    }

    pub fn last_call(&self) -> Call {
        self.calls().pop().expect("no request was sent")
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock().unwrap()
    }

    pub fn boxed(&self) -> Box<dyn Transport> {
        Box::new(self.clone())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: Option<&Params>,
        body: Option<&Value>,
    ) -> Result<Value> {
        self.calls.lock().unwrap().push(Call {
            method: method.clone(),
            path: path.to_string(),
            params: params.map(|p| Value::Object(p.clone())),
            body: body.cloned(),
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get(&(method, path.to_string()))
            .cloned();
        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(Error::Server {
                url: format!("http://mock{}", path),
                status,
                body: String::new(),
            }),
            None => Ok(json!({})),
        }
    }

    fn close(&mut self) {
        *self.closed.lock().unwrap() = true;
    }
}
