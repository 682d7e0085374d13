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
use dds_gateway::Producer;
use std::sync::Arc;
use tracing::{debug, info};

/// Republishes every inbound sample on another endpoint.
pub(crate) struct ForwardingHandler {
    producer: Arc<Producer>,
}

impl ForwardingHandler {
    pub(crate) fn new(producer: Arc<Producer>) -> Self {
        Self { producer }
    }
}

#[async_trait]
impl InboundHandler for ForwardingHandler {
    async fn process(&self, message: InboundMessage) -> Result<(), HandlerError> {
        // The cell may be reused by the consumer once we return.
        let payload = message.payload().snapshot();
        self.producer.send(&*payload).await?;
        debug!(
            "forwarded {} -> {}",
            message.endpoint_address(),
            self.producer.endpoint_address()
        );
        Ok(())
    }
}

/// Logs every inbound sample.
pub(crate) struct MonitorHandler;

#[async_trait]
impl InboundHandler for MonitorHandler {
    async fn process(&self, message: InboundMessage) -> Result<(), HandlerError> {
        let payload = message.payload().read();
        info!("{}: {:?}", message.endpoint_address(), *payload);
        Ok(())
    }
}
