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

use dds_gateway::types::TypeRegistry;
use dds_gateway::Producer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task::JoinHandle;
use tracing::warn;

pub(crate) const HEARTBEAT_TYPE_ID: &str = "demo.Heartbeat";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct Heartbeat {
    pub(crate) origin: String,
    pub(crate) sequence: u64,
    pub(crate) sent_at_ms: u64,
}

/// Payload types this binary can route.
pub(crate) fn type_registry() -> Arc<TypeRegistry> {
    let types = TypeRegistry::new();
    types.register_json::<Heartbeat>(HEARTBEAT_TYPE_ID);
    Arc::new(types)
}

/// Publishes a [`Heartbeat`] on `producer` every `period`.
pub(crate) fn spawn_heartbeat(
    origin: String,
    producer: Arc<Producer>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        let mut sequence = 0;
        loop {
            ticker.tick().await;
            sequence += 1;
            let heartbeat = Heartbeat {
                origin: origin.clone(),
                sequence,
                sent_at_ms: SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map_or(0, |elapsed| elapsed.as_millis() as u64),
            };
            if let Err(err) = producer.send(&heartbeat).await {
                warn!("heartbeat {sequence} not sent: {err}");
            }
        }
    })
}
