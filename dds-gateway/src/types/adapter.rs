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

//! Per-type codecs.

use crate::types::Payload;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;

/// Suffix appended to a type id to name its adapter.
pub const ADAPTER_SUFFIX: &str = "PubSubType";

/// Name under which the adapter for `type_id` registers with a transport.
pub fn adapter_name(type_id: &str) -> String {
    format!("{type_id}{ADAPTER_SUFFIX}")
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SerializationError {
    type_name: String,
    reason: String,
}

impl SerializationError {
    pub fn new(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Display for SerializationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.type_name, self.reason)
    }
}

impl Error for SerializationError {}

/// Moves one payload type on and off the wire.
pub trait TypeAdapter: Send + Sync {
    fn type_name(&self) -> &str;

    fn serialize(&self, payload: &dyn Payload) -> Result<Vec<u8>, SerializationError>;

    fn deserialize(&self, bytes: &[u8]) -> Result<Box<dyn Payload>, SerializationError>;

    /// Decodes `bytes` over an existing instance instead of allocating a new one.
    fn deserialize_into(
        &self,
        bytes: &[u8],
        target: &mut dyn Payload,
    ) -> Result<(), SerializationError>;
}

/// [`TypeAdapter`] for serde types, encoded as JSON.
pub struct JsonTypeAdapter<P> {
    type_name: String,
    marker: PhantomData<fn() -> P>,
}

impl<P> JsonTypeAdapter<P> {
    pub fn new(type_id: &str) -> Self {
        Self {
            type_name: adapter_name(type_id),
            marker: PhantomData,
        }
    }

    fn mismatch(&self) -> SerializationError {
        SerializationError::new(
            &self.type_name,
            format!("payload is not a {}", std::any::type_name::<P>()),
        )
    }
}

impl<P> Debug for JsonTypeAdapter<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonTypeAdapter")
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl<P> TypeAdapter for JsonTypeAdapter<P>
where
    P: Payload + Serialize + DeserializeOwned,
{
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn serialize(&self, payload: &dyn Payload) -> Result<Vec<u8>, SerializationError> {
        let value = payload.downcast_ref::<P>().ok_or_else(|| self.mismatch())?;
        serde_json::to_vec(value)
            .map_err(|err| SerializationError::new(&self.type_name, err.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Box<dyn Payload>, SerializationError> {
        let value: P = serde_json::from_slice(bytes)
            .map_err(|err| SerializationError::new(&self.type_name, err.to_string()))?;
        Ok(Box::new(value))
    }

    fn deserialize_into(
        &self,
        bytes: &[u8],
        target: &mut dyn Payload,
    ) -> Result<(), SerializationError> {
        let value: P = serde_json::from_slice(bytes)
            .map_err(|err| SerializationError::new(&self.type_name, err.to_string()))?;
        let slot = target.downcast_mut::<P>().ok_or_else(|| self.mismatch())?;
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{adapter_name, JsonTypeAdapter, TypeAdapter};
    use crate::types::Payload;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
    struct Chat {
        user: String,
        text: String,
    }

    #[test]
    fn adapter_name_appends_suffix() {
        assert_eq!(adapter_name("demo.Chat"), "demo.ChatPubSubType");
    }

    #[test]
    fn deserialize_into_overwrites_existing_instance() {
        let adapter = JsonTypeAdapter::<Chat>::new("demo.Chat");
        let bytes = adapter
            .serialize(&Chat {
                user: "ada".into(),
                text: "hi".into(),
            })
            .expect("serialize should succeed");

        let mut target: Box<dyn Payload> = Box::new(Chat::default());
        adapter
            .deserialize_into(&bytes, &mut *target)
            .expect("deserialize should succeed");

        assert_eq!(target.downcast_ref::<Chat>().unwrap().user, "ada");
    }

    #[test]
    fn wrong_payload_type_is_rejected() {
        let adapter = JsonTypeAdapter::<Chat>::new("demo.Chat");

        let err = adapter
            .serialize(&String::from("not a chat"))
            .expect_err("a String is not a Chat");

        assert_eq!(err.type_name(), "demo.ChatPubSubType");
        assert!(err.reason().contains("Chat"));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let adapter = JsonTypeAdapter::<Chat>::new("demo.Chat");

        assert!(adapter.deserialize(b"{not json").is_err());
    }
}
