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

//! Message payloads and the per-type codecs that move them on and off the wire.

mod adapter;
mod registry;

pub use adapter::{adapter_name, JsonTypeAdapter, SerializationError, TypeAdapter, ADAPTER_SUFFIX};
pub use registry::{TypeRegistry, TypeSupport};

use std::any::Any;
use std::fmt::Debug;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A message instance that can travel through the gateway.
///
/// Implemented for every `Clone + Debug` type that is `Send + Sync + 'static`.
pub trait Payload: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn clone_payload(&self) -> Box<dyn Payload>;
}

impl<T> Payload for T
where
    T: Any + Debug + Clone + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_payload(&self) -> Box<dyn Payload> {
        Box::new(self.clone())
    }
}

impl dyn Payload {
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Shared slot holding one payload instance.
///
/// Consumers hand cells to handlers; a reusing consumer overwrites the same
/// cell for every sample, so two deliveries can share one instance.
#[derive(Debug)]
pub struct PayloadCell {
    payload: RwLock<Box<dyn Payload>>,
}

impl PayloadCell {
    pub fn new(payload: Box<dyn Payload>) -> Self {
        Self {
            payload: RwLock::new(payload),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Box<dyn Payload>> {
        self.payload.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Box<dyn Payload>> {
        self.payload.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the payload if it holds a `T`.
    pub fn with<T: Any, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.read().downcast_ref::<T>().map(f)
    }

    pub fn get_cloned<T: Any + Clone>(&self) -> Option<T> {
        self.with::<T, T>(T::clone)
    }

    /// Copies the current contents into an independent payload.
    pub fn snapshot(&self) -> Box<dyn Payload> {
        self.read().clone_payload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Reading {
        value: i32,
    }

    #[test]
    fn downcasts_to_concrete_type() {
        let mut payload: Box<dyn Payload> = Box::new(Reading { value: 3 });
        assert!(payload.is::<Reading>());
        assert!(!payload.is::<String>());
        payload.downcast_mut::<Reading>().unwrap().value = 9;
        assert_eq!(payload.downcast_ref::<Reading>(), Some(&Reading { value: 9 }));
    }

    #[test]
    fn cell_snapshot_is_independent() {
        let cell = PayloadCell::new(Box::new(Reading { value: 1 }));
        let snapshot = cell.snapshot();
        cell.write().downcast_mut::<Reading>().unwrap().value = 2;

        assert_eq!(snapshot.downcast_ref::<Reading>().unwrap().value, 1);
        assert_eq!(cell.get_cloned::<Reading>(), Some(Reading { value: 2 }));
        assert_eq!(cell.with::<String, usize>(|s| s.len()), None);
    }
}
