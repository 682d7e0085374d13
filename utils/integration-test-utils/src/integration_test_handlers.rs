/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use async_trait::async_trait;
use dds_gateway::data_plane::{HandlerError, InboundHandler, InboundMessage};
use dds_gateway::types::Payload;
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Keeps every delivered message, plus a copy of its payload taken while it was being processed.
#[derive(Default)]
pub struct RecordingHandler {
    messages: Mutex<Vec<InboundMessage>>,
    snapshots: Mutex<Vec<Box<dyn Payload>>>,
    count: AtomicUsize,
}

impl RecordingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub async fn messages(&self) -> Vec<InboundMessage> {
        self.messages.lock().await.clone()
    }

    /// Payload contents as they were at each delivery, in delivery order.
    pub async fn delivered<T: Any + Clone>(&self) -> Vec<T> {
        self.snapshots
            .lock()
            .await
            .iter()
            .filter_map(|payload| payload.downcast_ref::<T>().cloned())
            .collect()
    }

    /// Number of distinct payload instances among the delivered messages.
    pub async fn distinct_instances(&self) -> usize {
        let messages = self.messages.lock().await;
        let mut distinct: Vec<&InboundMessage> = Vec::new();
        for message in messages.iter() {
            if !distinct.iter().any(|seen| seen.same_instance(message)) {
                distinct.push(message);
            }
        }
        distinct.len()
    }
}

#[async_trait]
impl InboundHandler for RecordingHandler {
    async fn process(&self, message: InboundMessage) -> Result<(), HandlerError> {
        debug!("recording message from {}", message.endpoint_address());
        let snapshot = message.payload().snapshot();
        self.snapshots.lock().await.push(snapshot);
        self.messages.lock().await.push(message);
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Rejects every message.
#[derive(Default)]
pub struct FailingHandler {
    attempts: AtomicUsize,
}

impl FailingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InboundHandler for FailingHandler {
    async fn process(&self, _message: InboundMessage) -> Result<(), HandlerError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err("handler refused the message".into())
    }
}

/// Panics on every message.
#[derive(Default)]
pub struct PanickingHandler {
    attempts: AtomicUsize,
}

impl PanickingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InboundHandler for PanickingHandler {
    async fn process(&self, message: InboundMessage) -> Result<(), HandlerError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        panic!("handler panicked on {}", message.endpoint_address());
    }
}
