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
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const TEST_IDL_TYPE_ID: &str = "test.idl.TestIdl";

/// Payload type exchanged by integration tests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TestIdl {
    pub id: u32,
    pub text: String,
}

pub fn test_message(id: u32) -> TestIdl {
    TestIdl {
        id,
        text: format!("message-{id}"),
    }
}

/// A type registry knowing [`TestIdl`] under [`TEST_IDL_TYPE_ID`].
pub fn test_type_registry() -> Arc<TypeRegistry> {
    let registry = TypeRegistry::new();
    registry.register_json::<TestIdl>(TEST_IDL_TYPE_ID);
    Arc::new(registry)
}
