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

//! What a consumer hands to the dispatch side.

use crate::types::PayloadCell;
use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;

pub type HandlerError = Box<dyn Error + Send + Sync>;

/// One decoded sample on its way to an [`InboundHandler`].
#[derive(Clone, Debug)]
pub struct InboundMessage {
    endpoint_address: Arc<str>,
    type_id: Arc<str>,
    payload: Arc<PayloadCell>,
}

impl InboundMessage {
    pub fn new(endpoint_address: Arc<str>, type_id: Arc<str>, payload: Arc<PayloadCell>) -> Self {
        Self {
            endpoint_address,
            type_id,
            payload,
        }
    }

    pub fn endpoint_address(&self) -> &str {
        &self.endpoint_address
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// The delivered payload.
    ///
    /// Under reuse the consumer overwrites this cell on the next sample, so its
    /// contents are only meaningful until [`InboundHandler::process`] returns.
    pub fn payload(&self) -> &Arc<PayloadCell> {
        &self.payload
    }

    /// Whether both messages carry the very same payload instance.
    pub fn same_instance(&self, other: &InboundMessage) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

/// Receives every sample a consumer delivers.
#[async_trait]
pub trait InboundHandler: Send + Sync {
    async fn process(&self, message: InboundMessage) -> Result<(), HandlerError>;
}
