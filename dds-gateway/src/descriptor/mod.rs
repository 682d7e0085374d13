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

//! Endpoint addresses: `dds:<topic>:<domain>/<typeId>[?qos=<name>][&reuse=<bool>]`.

mod address_parser;
mod uri_builder;

pub use address_parser::{EndpointDescriptor, QUERY_QOS, QUERY_REUSE, SCHEME};
pub use uri_builder::EndpointUriBuilder;
