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

mod integration_test_handlers;
pub use integration_test_handlers::{FailingHandler, PanickingHandler, RecordingHandler};
mod integration_test_payloads;
pub use integration_test_payloads::{test_message, test_type_registry, TestIdl, TEST_IDL_TYPE_ID};
mod integration_test_utils;
pub use integration_test_utils::{init_logging, send_test_messages, wait_for_count};
mod unavailable_transport;
pub use unavailable_transport::UnavailableTransport;
