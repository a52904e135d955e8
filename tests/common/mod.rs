//! Shared test doubles: an in-memory centralconfig service and a counting transport.

#![allow(dead_code)]

use async_trait::async_trait;
use centralconfig_client::prelude::*;
use centralconfig_client::transport::{Transport, TransportResponse};
use chrono::Utc;
use serde::Serialize;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

type Key = (String, String, String);

fn key_of(item: &ConfigItem) -> Key {
    (
        item.application.clone(),
        item.machine.clone().unwrap_or_default(),
        item.name.clone(),
    )
}

/// Service double storing items keyed by `(application, machine, name)`.
///
/// Machine-scoped lookups fall back to the application-wide item.
#[derive(Default)]
pub struct MemoryService {
    items: Mutex<Vec<ConfigItem>>,
}

impl MemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer one request the way the real service would: HTTP status and JSON body.
    pub fn handle(&self, path: &str, body: &[u8]) -> (u16, Vec<u8>) {
        match path {
            "/config/get" => self.with_item(body, |item| self.get(item)),
            "/config/getall" => respond(200, &self.get_all()),
            "/config/set" => self.with_item(body, |item| self.set(item)),
            "/config/remove" => self.with_item(body, |item| self.remove(item)),
            _ => respond(404, &envelope(404, "Unknown endpoint", ConfigItem::default())),
        }
    }

    fn with_item(&self, body: &[u8], op: impl FnOnce(ConfigItem) -> ConfigResponse) -> (u16, Vec<u8>) {
        match serde_json::from_slice::<ConfigItem>(body) {
            Ok(item) => {
                let response = op(item);
                respond(response.status, &response)
            }
            Err(e) => respond(400, &envelope(400, &e.to_string(), ConfigItem::default())),
        }
    }

    pub fn get(&self, request: ConfigItem) -> ConfigResponse {
        let items = self.items.lock().unwrap();
        let wanted = key_of(&request);
        let global = (wanted.0.clone(), String::new(), wanted.2.clone());

        let found = items
            .iter()
            .find(|item| key_of(item) == wanted)
            .or_else(|| items.iter().find(|item| key_of(item) == global));

        match found {
            Some(item) => envelope(200, "", item.clone()),
            None => envelope(404, "Config item not found", ConfigItem::default()),
        }
    }

    pub fn get_all(&self) -> ConfigResponseMultiple {
        ConfigResponseMultiple {
            status: 200,
            message: String::new(),
            data: self.items.lock().unwrap().clone(),
        }
    }

    pub fn set(&self, request: ConfigItem) -> ConfigResponse {
        if request.application.is_empty() || request.name.is_empty() {
            return envelope(400, "application and name are required", ConfigItem::default());
        }

        let mut items = self.items.lock().unwrap();
        let key = key_of(&request);
        let next_id = items.len() as i64 + 1;

        let stored = match items.iter_mut().find(|item| key_of(item) == key) {
            Some(existing) => {
                existing.value = request.value;
                existing.last_updated = Some(Utc::now());
                existing.clone()
            }
            None => {
                let item = ConfigItem {
                    id: Some(next_id),
                    last_updated: Some(Utc::now()),
                    ..request
                };
                items.push(item.clone());
                item
            }
        };

        envelope(200, "", stored)
    }

    pub fn remove(&self, request: ConfigItem) -> ConfigResponse {
        let mut items = self.items.lock().unwrap();
        let key = key_of(&request);
        let before = items.len();
        items.retain(|item| key_of(item) != key);

        if items.len() < before {
            envelope(200, "", ConfigItem::default())
        } else {
            envelope(404, "Config item not found", ConfigItem::default())
        }
    }
}

fn envelope(status: u16, message: &str, data: ConfigItem) -> ConfigResponse {
    ConfigResponse {
        status,
        message: message.to_string(),
        data,
    }
}

fn respond<T: Serialize>(status: u16, body: &T) -> (u16, Vec<u8>) {
    (status, serde_json::to_vec(body).unwrap())
}

/// What a [`CountingTransport`] answers with.
pub enum Reply {
    /// Route to an in-memory service
    Service(MemoryService),
    /// Always return this body with status 200
    Fixed(&'static str),
    /// Always fail the exchange
    ConnectionRefused,
}

/// Transport double that counts calls and records paths.
pub struct CountingTransport {
    base_url: String,
    reply: Reply,
    calls: AtomicUsize,
    paths: Mutex<Vec<String>>,
}

impl CountingTransport {
    pub fn new(base_url: &str, reply: Reply) -> Self {
        Self {
            base_url: base_url.to_string(),
            reply,
            calls: AtomicUsize::new(0),
            paths: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for CountingTransport {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let path = url
            .strip_prefix(&self.base_url)
            .unwrap_or(url)
            .to_string();
        self.paths.lock().unwrap().push(path.clone());

        let (status, body) = match &self.reply {
            Reply::Service(service) => service.handle(&path, &body),
            Reply::Fixed(text) => (200, text.as_bytes().to_vec()),
            Reply::ConnectionRefused => {
                return Err(ClientError::transport(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )));
            }
        };

        Ok(TransportResponse { status, body })
    }
}
