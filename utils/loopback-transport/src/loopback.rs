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

use crate::dispatch_runtime::{spawn_reader_dispatch_loop, ReaderEvent};
use crate::matching::endpoints_match;
use async_trait::async_trait;
use dds_gateway::qos::{DurabilityKind, HistoryKind};
use dds_gateway::transport::{
    Guid, HistoryQosPolicy, MatchingInfo, MatchingStatus, ParticipantAttributes, ParticipantHandle,
    PubSubTransport, PublisherAttributes, PublisherHandle, SampleInfo, SubscriberAttributes,
    SubscriberHandle, SubscriberListener, TransportError, TransportErrorKind,
};
use dds_gateway::types::{Payload, TypeAdapter};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, trace};

const COMPONENT: &str = "loopback_transport";

/// Default cap on samples kept per writer history and per reader queue.
pub const DEFAULT_MAX_SAMPLES: usize = 1024;

#[derive(Clone, Debug)]
struct Sample {
    bytes: Arc<[u8]>,
    info: SampleInfo,
}

struct ParticipantEntry {
    attributes: ParticipantAttributes,
    publishers: Vec<Guid>,
    subscribers: Vec<Guid>,
}

struct WriterEntry {
    domain_id: u32,
    attributes: PublisherAttributes,
    adapter: Arc<dyn TypeAdapter>,
    sequence_number: u64,
    history: VecDeque<Sample>,
}

impl WriterEntry {
    /// Keeps `sample` for late joiners; returns how many older samples were evicted.
    fn record(&mut self, sample: Sample, max_samples: usize) -> usize {
        if self.attributes.qos.durability != DurabilityKind::TransientLocal {
            return 0;
        }
        push_bounded(
            &mut self.history,
            sample,
            sample_capacity(&self.attributes.topic.history, max_samples),
        )
    }
}

/// How many samples a history policy retains under the `max_samples` resource limit.
fn sample_capacity(history: &HistoryQosPolicy, max_samples: usize) -> usize {
    let max_samples = max_samples.max(1);
    match history.kind {
        HistoryKind::KeepLast => (history.depth.max(1) as usize).min(max_samples),
        HistoryKind::KeepAll => max_samples,
    }
}

fn push_bounded(queue: &mut VecDeque<Sample>, sample: Sample, capacity: usize) -> usize {
    queue.push_back(sample);
    let mut evicted = 0;
    while queue.len() > capacity {
        queue.pop_front();
        evicted += 1;
    }
    evicted
}

struct ReaderEntry {
    domain_id: u32,
    attributes: SubscriberAttributes,
    adapter: Arc<dyn TypeAdapter>,
    queue: VecDeque<Sample>,
    capacity: usize,
    notifier: UnboundedSender<ReaderEvent>,
}

impl ReaderEntry {
    /// Queues `sample`, evicting the oldest ones past the reader's history; returns the evicted count.
    ///
    /// Every queued sample raises one notification, so notifications for
    /// evicted samples find nothing to take.
    fn enqueue(&mut self, sample: Sample) -> usize {
        let evicted = push_bounded(&mut self.queue, sample, self.capacity);
        // A closed channel means the dispatch thread is gone; the sample stays takeable.
        let _ = self.notifier.send(ReaderEvent::NewData);
        evicted
    }

    fn notify_matching(&self, status: MatchingStatus, remote_guid: Guid) {
        let _ = self.notifier.send(ReaderEvent::Matched(MatchingInfo {
            status,
            remote_guid,
        }));
    }
}

#[derive(Default)]
struct LoopbackState {
    participants: HashMap<Guid, ParticipantEntry>,
    writers: HashMap<Guid, WriterEntry>,
    readers: HashMap<Guid, ReaderEntry>,
}

#[derive(Default)]
struct LoopbackCounters {
    participants_created: AtomicU64,
    publishers_created: AtomicU64,
    subscribers_created: AtomicU64,
    participants_removed: AtomicU64,
    samples_written: AtomicU64,
    samples_delivered: AtomicU64,
    samples_evicted: AtomicU64,
}

/// Allocation and traffic counters of a [`LoopbackTransport`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoopbackStats {
    pub participants_created: u64,
    pub publishers_created: u64,
    pub subscribers_created: u64,
    pub participants_removed: u64,
    pub samples_written: u64,
    /// Samples queued to readers; one write can reach several readers.
    pub samples_delivered: u64,
    /// Samples dropped from writer histories and reader queues by their history limits.
    pub samples_evicted: u64,
}

/// A [`PubSubTransport`] connecting everything created on the same instance.
///
/// Share one instance (behind an `Arc`) between gateways that should talk to
/// each other.
///
/// KEEP_LAST histories retain their depth and KEEP_ALL histories retain up to
/// `max_samples`, both for transient-local writer history and reader queues.
pub struct LoopbackTransport {
    name: String,
    max_samples: usize,
    state: Mutex<LoopbackState>,
    counters: LoopbackCounters,
}

impl LoopbackTransport {
    pub fn new(name: &str) -> Self {
        Self::with_max_samples(name, DEFAULT_MAX_SAMPLES)
    }

    pub fn with_max_samples(name: &str, max_samples: usize) -> Self {
        Self {
            name: name.to_string(),
            max_samples: max_samples.max(1),
            state: Mutex::new(LoopbackState::default()),
            counters: LoopbackCounters::default(),
        }
    }

    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> LoopbackStats {
        LoopbackStats {
            participants_created: self.counters.participants_created.load(Ordering::Acquire),
            publishers_created: self.counters.publishers_created.load(Ordering::Acquire),
            subscribers_created: self.counters.subscribers_created.load(Ordering::Acquire),
            participants_removed: self.counters.participants_removed.load(Ordering::Acquire),
            samples_written: self.counters.samples_written.load(Ordering::Acquire),
            samples_delivered: self.counters.samples_delivered.load(Ordering::Acquire),
            samples_evicted: self.counters.samples_evicted.load(Ordering::Acquire),
        }
    }

    /// Samples queued for `subscriber` and not yet taken.
    pub fn pending_samples(&self, subscriber: &SubscriberHandle) -> usize {
        self.lock()
            .readers
            .get(&subscriber.guid())
            .map_or(0, |reader| reader.queue.len())
    }

    /// Samples `publisher` keeps for late-joining transient-local readers.
    pub fn retained_samples(&self, publisher: &PublisherHandle) -> usize {
        self.lock()
            .writers
            .get(&publisher.guid())
            .map_or(0, |writer| writer.history.len())
    }

    fn lock(&self) -> MutexGuard<'_, LoopbackState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pops the next sample for `subscriber` together with the adapter to decode it.
    fn take_sample(
        &self,
        subscriber: &SubscriberHandle,
    ) -> Result<Option<(Sample, Arc<dyn TypeAdapter>)>, TransportError> {
        let mut state = self.lock();
        let reader = state
            .readers
            .get_mut(&subscriber.guid())
            .ok_or_else(|| unknown("subscriber", subscriber.guid()))?;
        Ok(reader
            .queue
            .pop_front()
            .map(|sample| (sample, reader.adapter.clone())))
    }
}

fn unknown(entity: &str, guid: Guid) -> TransportError {
    TransportError::fail_with_kind(TransportErrorKind::NotFound, format!("unknown {entity} {guid}"))
}

#[async_trait]
impl PubSubTransport for LoopbackTransport {
    async fn create_participant(
        &self,
        attributes: ParticipantAttributes,
    ) -> Result<ParticipantHandle, TransportError> {
        let guid = Guid::new_random();
        self.lock().participants.insert(
            guid,
            ParticipantEntry {
                attributes: attributes.clone(),
                publishers: Vec::new(),
                subscribers: Vec::new(),
            },
        );
        self.counters
            .participants_created
            .fetch_add(1, Ordering::AcqRel);
        debug!(
            component = COMPONENT,
            transport = %self.name,
            guid = %guid,
            domain_id = attributes.domain_id,
            "participant created"
        );
        Ok(ParticipantHandle::new(guid, attributes))
    }

    async fn create_publisher(
        &self,
        participant: &ParticipantHandle,
        adapter: Arc<dyn TypeAdapter>,
        attributes: PublisherAttributes,
    ) -> Result<PublisherHandle, TransportError> {
        let guid = Guid::new_random();
        let mut state = self.lock();
        let domain_id = state
            .participants
            .get(&participant.guid())
            .ok_or_else(|| unknown("participant", participant.guid()))?
            .attributes
            .domain_id;

        for reader in state.readers.values() {
            if endpoints_match(domain_id, &attributes, reader.domain_id, &reader.attributes) {
                reader.notify_matching(MatchingStatus::Matched, guid);
            }
        }

        state.writers.insert(
            guid,
            WriterEntry {
                domain_id,
                attributes: attributes.clone(),
                adapter,
                sequence_number: 0,
                history: VecDeque::new(),
            },
        );
        if let Some(entry) = state.participants.get_mut(&participant.guid()) {
            entry.publishers.push(guid);
        }
        drop(state);

        self.counters.publishers_created.fetch_add(1, Ordering::AcqRel);
        debug!(
            component = COMPONENT,
            transport = %self.name,
            guid = %guid,
            topic = %attributes.topic.topic_name,
            "publisher created"
        );
        Ok(PublisherHandle::new(guid, participant.guid(), attributes))
    }

    async fn create_subscriber(
        &self,
        participant: &ParticipantHandle,
        adapter: Arc<dyn TypeAdapter>,
        attributes: SubscriberAttributes,
        listener: Arc<dyn SubscriberListener>,
    ) -> Result<SubscriberHandle, TransportError> {
        let guid = Guid::new_random();
        let handle = SubscriberHandle::new(guid, participant.guid(), attributes.clone());

        let mut state = self.lock();
        let domain_id = state
            .participants
            .get(&participant.guid())
            .ok_or_else(|| unknown("participant", participant.guid()))?
            .attributes
            .domain_id;

        let (notifier, receiver) = mpsc::unbounded_channel();
        spawn_reader_dispatch_loop(handle.clone(), listener, receiver)?;

        let capacity = sample_capacity(&attributes.topic.history, self.max_samples);
        let mut reader = ReaderEntry {
            domain_id,
            attributes,
            adapter,
            queue: VecDeque::new(),
            capacity,
            notifier,
        };
        let replay_history = reader.attributes.qos.durability == DurabilityKind::TransientLocal;
        for (writer_guid, writer) in &state.writers {
            if !endpoints_match(writer.domain_id, &writer.attributes, domain_id, &reader.attributes)
            {
                continue;
            }
            reader.notify_matching(MatchingStatus::Matched, *writer_guid);
            if replay_history {
                for sample in &writer.history {
                    reader.enqueue(sample.clone());
                }
            }
        }

        state.readers.insert(guid, reader);
        if let Some(entry) = state.participants.get_mut(&participant.guid()) {
            entry.subscribers.push(guid);
        }
        drop(state);

        self.counters
            .subscribers_created
            .fetch_add(1, Ordering::AcqRel);
        debug!(
            component = COMPONENT,
            transport = %self.name,
            guid = %guid,
            topic = %handle.attributes().topic.topic_name,
            "subscriber created"
        );
        Ok(handle)
    }

    async fn write(
        &self,
        publisher: &PublisherHandle,
        payload: &dyn Payload,
    ) -> Result<(), TransportError> {
        let mut state = self.lock();
        let state = &mut *state;
        let writer = state
            .writers
            .get_mut(&publisher.guid())
            .ok_or_else(|| unknown("publisher", publisher.guid()))?;

        let bytes: Arc<[u8]> = writer.adapter.serialize(payload)?.into();
        writer.sequence_number += 1;
        let sample = Sample {
            bytes,
            info: SampleInfo {
                sequence_number: writer.sequence_number,
                writer_guid: Some(publisher.guid()),
                source_timestamp: Some(SystemTime::now()),
            },
        };
        let mut evicted = writer.record(sample.clone(), self.max_samples);

        let mut delivered = 0;
        for reader in state.readers.values_mut() {
            if endpoints_match(writer.domain_id, &writer.attributes, reader.domain_id, &reader.attributes)
            {
                evicted += reader.enqueue(sample.clone());
                delivered += 1;
            }
        }

        self.counters.samples_written.fetch_add(1, Ordering::AcqRel);
        self.counters
            .samples_delivered
            .fetch_add(delivered, Ordering::AcqRel);
        self.counters
            .samples_evicted
            .fetch_add(evicted as u64, Ordering::AcqRel);
        trace!(
            component = COMPONENT,
            transport = %self.name,
            guid = %publisher.guid(),
            sequence = sample.info.sequence_number,
            readers = delivered,
            "sample written"
        );
        Ok(())
    }

    fn decode_next(
        &self,
        subscriber: &SubscriberHandle,
    ) -> Result<Option<Box<dyn Payload>>, TransportError> {
        match self.take_sample(subscriber)? {
            Some((sample, adapter)) => Ok(Some(adapter.deserialize(&sample.bytes)?)),
            None => Ok(None),
        }
    }

    fn decode_next_into(
        &self,
        subscriber: &SubscriberHandle,
        target: &mut dyn Payload,
        info: &mut SampleInfo,
    ) -> Result<bool, TransportError> {
        let Some((sample, adapter)) = self.take_sample(subscriber)? else {
            return Ok(false);
        };
        adapter.deserialize_into(&sample.bytes, target)?;
        *info = sample.info;
        Ok(true)
    }

    async fn remove_participant(
        &self,
        participant: &ParticipantHandle,
    ) -> Result<(), TransportError> {
        let mut state = self.lock();
        let entry = state
            .participants
            .remove(&participant.guid())
            .ok_or_else(|| unknown("participant", participant.guid()))?;

        for subscriber in &entry.subscribers {
            state.readers.remove(subscriber);
        }
        for publisher in &entry.publishers {
            if let Some(writer) = state.writers.remove(publisher) {
                for reader in state.readers.values() {
                    if endpoints_match(
                        writer.domain_id,
                        &writer.attributes,
                        reader.domain_id,
                        &reader.attributes,
                    ) {
                        reader.notify_matching(MatchingStatus::Removed, *publisher);
                    }
                }
            }
        }
        drop(state);

        self.counters
            .participants_removed
            .fetch_add(1, Ordering::AcqRel);
        debug!(
            component = COMPONENT,
            transport = %self.name,
            guid = %participant.guid(),
            publishers = entry.publishers.len(),
            subscribers = entry.subscribers.len(),
            "participant removed"
        );
        Ok(())
    }
}
