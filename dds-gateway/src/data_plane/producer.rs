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

//! Outbound write path.

use crate::error::GatewayError;
use crate::observability::events;
use crate::session::EndpointSession;
use crate::transport::{PublisherHandle, TransportErrorKind};
use crate::types::Payload;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, trace, warn, Level};

const COMPONENT: &str = "producer";

/// Writes payloads to one endpoint.
///
/// `start` allocates the publisher (and with it the QoS configuration);
/// `send` fails with `NotStarted` outside of `start`..`stop`.
pub struct Producer {
    session: Arc<EndpointSession>,
    publisher: RwLock<Option<Arc<PublisherHandle>>>,
}

impl Producer {
    pub fn new(session: Arc<EndpointSession>) -> Self {
        Self {
            session,
            publisher: RwLock::new(None),
        }
    }

    pub fn session(&self) -> &Arc<EndpointSession> {
        &self.session
    }

    pub fn endpoint_address(&self) -> &str {
        self.session.endpoint_address()
    }

    pub async fn start(&self) -> Result<(), GatewayError> {
        let publisher = self.session.get_publisher().await?;
        info!(
            event = events::PRODUCER_START,
            component = COMPONENT,
            endpoint = self.endpoint_address(),
            guid = %publisher.guid(),
            "producer started"
        );
        *self.publisher.write().await = Some(publisher);
        Ok(())
    }

    pub async fn is_started(&self) -> bool {
        self.publisher.read().await.is_some()
    }

    pub async fn send(&self, payload: &dyn Payload) -> Result<(), GatewayError> {
        let publisher = self
            .publisher
            .read()
            .await
            .clone()
            .ok_or_else(|| GatewayError::NotStarted(self.endpoint_address().to_string()))?;
        if self.session.is_stopped() {
            return Err(GatewayError::SessionStopped(
                self.endpoint_address().to_string(),
            ));
        }

        match self.session.transport().write(&publisher, payload).await {
            Ok(()) => {
                if tracing::enabled!(Level::TRACE) {
                    trace!(
                        event = events::PRODUCER_SEND_OK,
                        component = COMPONENT,
                        endpoint = self.endpoint_address(),
                        value = ?payload,
                        "sample written"
                    );
                }
                Ok(())
            }
            Err(err) => {
                warn!(
                    event = events::PRODUCER_SEND_FAILED,
                    component = COMPONENT,
                    endpoint = self.endpoint_address(),
                    err = %err,
                    "unable to write sample"
                );
                match err.kind() {
                    TransportErrorKind::Serialization => Err(GatewayError::SerializationFailure(err)),
                    _ => Err(GatewayError::TransportWriteFailure(err)),
                }
            }
        }
    }

    /// Stops accepting sends. The publisher itself lives as long as the session.
    pub async fn stop(&self) {
        if self.publisher.write().await.take().is_some() {
            info!(
                event = events::PRODUCER_STOP,
                component = COMPONENT,
                endpoint = self.endpoint_address(),
                "producer stopped"
            );
        }
    }
}
