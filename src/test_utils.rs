// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request
/// method and path.
///
/// Each (method, path) key holds a queue of responses: queued responses
/// are served in order and the final one repeats, so a polled endpoint can
/// change its answer over time. Served requests are recorded for
/// assertions on call counts and query strings.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), VecDeque<(u16, String)>>>>,
    served: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            served: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a response for requests matching (method, path). Registering
    /// the same key again appends to its queue.
    pub fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Number of served requests with this exact method and path.
    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.served
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, p, _)| m == method && p == path)
            .count()
    }

    /// Query string of the most recent request with this method and path.
    pub fn last_query(&self, method: &str, path: &str) -> Option<String> {
        self.served
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(m, p, _)| m == method && p == path)
            .map(|(_, _, q)| q.clone())
    }

    /// Build a kube Client from this mock service.
    pub fn into_client(self) -> Client {
        self.into_client_with_ns("default")
    }

    /// Build a kube Client whose context default namespace is `ns`.
    pub fn into_client_with_ns(self, ns: &str) -> Client {
        Client::new(self, ns)
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();

        // Try exact match first
        if let Some(queue) = responses.get_mut(&(method.to_string(), path.to_string())) {
            return Some(pop_or_repeat(queue));
        }

        // Try prefix match for paths like /api/v1/namespaces/foo
        for ((m, p), queue) in responses.iter_mut() {
            if m == method && path.starts_with(p.as_str()) {
                return Some(pop_or_repeat(queue));
            }
        }

        None
    }
}

fn pop_or_repeat(queue: &mut VecDeque<(u16, String)>) -> (u16, String) {
    if queue.len() > 1 {
        queue.pop_front().unwrap()
    } else {
        queue.front().cloned().unwrap()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let query = req.uri().query().unwrap_or("").to_string();

        self.served
            .lock()
            .unwrap()
            .push((method.clone(), path.clone(), query));

        let response = self.find_response(&method, &path);

        Box::pin(async move {
            match response {
                Some((status, body)) => Ok(Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(Body::from(body.into_bytes()))
                    .unwrap()),
                None => {
                    // Default 404 for unmatched requests
                    let body = r#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"not found","reason":"NotFound","code":404}"#;
                    Ok(Response::builder()
                        .status(404)
                        .header("content-type", "application/json")
                        .body(Body::from(body.as_bytes().to_vec()))
                        .unwrap())
                }
            }
        })
    }
}

/// Create a PaddleJob JSON response. `status` is the whole status object;
/// pass `null` to omit status entirely.
pub fn paddlejob_json(name: &str, namespace: &str, status: serde_json::Value) -> String {
    let mut doc = serde_json::json!({
        "apiVersion": "kubeflow.org/v1",
        "kind": "PaddleJob",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        },
        "spec": {
            "paddleReplicaSpecs": {}
        }
    });
    if !status.is_null() {
        doc["status"] = status;
    }
    doc.to_string()
}

/// Create a PaddleJobList JSON response.
pub fn paddlejob_list_json(jobs: &[serde_json::Value]) -> String {
    serde_json::json!({
        "apiVersion": "kubeflow.org/v1",
        "kind": "PaddleJobList",
        "metadata": {"resourceVersion": "1"},
        "items": jobs
    })
    .to_string()
}

/// Create a PodList JSON response containing pods with the given names.
pub fn pod_list_json(names: &[&str]) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "PodList",
        "metadata": {"resourceVersion": "1"},
        "items": names
            .iter()
            .map(|name| serde_json::json!({
                "apiVersion": "v1",
                "kind": "Pod",
                "metadata": {"name": name, "namespace": "default"}
            }))
            .collect::<Vec<_>>()
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}
