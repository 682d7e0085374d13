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

//! Data-plane abstractions.
//!
//! Owns the outbound write path (producer) and the inbound notification path
//! (consumer with fresh or reusing payload allocation).

mod consumer;
mod delivery;
mod producer;

pub use consumer::{Consumer, DeliveryStrategy};
pub use delivery::{HandlerError, InboundHandler, InboundMessage};
pub use producer::Producer;
