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

//! Static mapping from type ids to payload factories and codecs.

use crate::error::GatewayError;
use crate::observability::events;
use crate::types::adapter::{JsonTypeAdapter, TypeAdapter};
use crate::types::Payload;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

const COMPONENT: &str = "type_registry";

type PayloadFactory = dyn Fn() -> Box<dyn Payload> + Send + Sync;
type AdapterFactory = dyn Fn() -> Arc<dyn TypeAdapter> + Send + Sync;

/// Everything the gateway needs to handle one payload type.
#[derive(Clone)]
pub struct TypeSupport {
    type_id: String,
    new_payload: Arc<PayloadFactory>,
    new_adapter: Arc<AdapterFactory>,
}

impl TypeSupport {
    pub fn new(
        type_id: impl Into<String>,
        new_payload: impl Fn() -> Box<dyn Payload> + Send + Sync + 'static,
        new_adapter: impl Fn() -> Arc<dyn TypeAdapter> + Send + Sync + 'static,
    ) -> Self {
        Self {
            type_id: type_id.into(),
            new_payload: Arc::new(new_payload),
            new_adapter: Arc::new(new_adapter),
        }
    }

    /// Support for a serde type, encoded with [`JsonTypeAdapter`].
    pub fn json<P>(type_id: &str) -> Self
    where
        P: Payload + Default + Serialize + DeserializeOwned,
    {
        let adapter_type_id = type_id.to_string();
        Self::new(
            type_id,
            || Box::new(P::default()),
            move || Arc::new(JsonTypeAdapter::<P>::new(&adapter_type_id)),
        )
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// A default-initialised payload instance.
    pub fn create_payload(&self) -> Box<dyn Payload> {
        (self.new_payload)()
    }

    pub fn create_adapter(&self) -> Arc<dyn TypeAdapter> {
        (self.new_adapter)()
    }
}

impl Debug for TypeSupport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeSupport")
            .field("type_id", &self.type_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<String, TypeSupport>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `support`, returning whatever was registered under its type id before.
    pub fn register(&self, support: TypeSupport) -> Option<TypeSupport> {
        let type_id = support.type_id.clone();
        let previous = self
            .types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(type_id.clone(), support);
        debug!(
            event = events::TYPE_SUPPORT_REGISTERED,
            component = COMPONENT,
            type_id = %type_id,
            replaced = previous.is_some(),
            "type support registered"
        );
        previous
    }

    pub fn register_json<P>(&self, type_id: &str) -> Option<TypeSupport>
    where
        P: Payload + Default + Serialize + DeserializeOwned,
    {
        self.register(TypeSupport::json::<P>(type_id))
    }

    pub fn lookup(&self, type_id: &str) -> Option<TypeSupport> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_id)
            .cloned()
    }

    /// Like [`TypeRegistry::lookup`], but a missing type is an error.
    pub fn resolve(&self, type_id: &str) -> Result<TypeSupport, GatewayError> {
        self.lookup(type_id).ok_or_else(|| {
            warn!(
                event = events::TYPE_SUPPORT_MISSING,
                component = COMPONENT,
                type_id = %type_id,
                "no type support registered"
            );
            GatewayError::SerializerUnavailable(type_id.to_string())
        })
    }

    /// Registered type ids, sorted.
    pub fn type_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}
