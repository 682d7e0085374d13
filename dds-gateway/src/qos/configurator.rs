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

//! Applies a [`QosProfile`] onto publisher and subscriber attributes.

use crate::qos::policy::{PublishModeKind, ReliabilityKind};
use crate::qos::profile::QosProfile;
use crate::transport::{
    EndpointQos, LivelinessQosPolicy, PublisherAttributes, SubscriberAttributes,
};
use std::sync::Arc;

/// Writes the fields a profile sets, and only those, onto transport attributes.
#[derive(Clone, Debug, Default)]
pub struct QosConfigurator {
    profile: Option<Arc<QosProfile>>,
}

impl QosConfigurator {
    pub fn new(profile: Option<Arc<QosProfile>>) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> Option<&Arc<QosProfile>> {
        self.profile.as_ref()
    }

    pub fn reliability(&self) -> Option<ReliabilityKind> {
        self.profile.as_ref().and_then(|profile| profile.reliability())
    }

    pub fn configure_publisher(&self, attributes: &mut PublisherAttributes) {
        let Some(profile) = self.profile.as_deref() else {
            return;
        };

        apply_common(profile, &mut attributes.qos);
        if let Some(history_kind) = profile.history_kind() {
            attributes.topic.history.kind = history_kind;
        }
        attributes.qos.publish_mode = if profile.asynchronous_publish() {
            PublishModeKind::Asynchronous
        } else {
            PublishModeKind::Synchronous
        };
    }

    pub fn configure_subscriber(&self, attributes: &mut SubscriberAttributes) {
        let Some(profile) = self.profile.as_deref() else {
            return;
        };

        apply_common(profile, &mut attributes.qos);
        if let Some(liveliness_kind) = profile.liveliness_kind() {
            attributes.qos.liveliness = Some(LivelinessQosPolicy::new(liveliness_kind));
        }
    }
}

fn apply_common(profile: &QosProfile, qos: &mut impl EndpointQos) {
    if let Some(reliability) = profile.reliability() {
        qos.set_reliability_kind(reliability);
    }
    if let Some(durability) = profile.durability() {
        qos.set_durability_kind(durability);
    }
    if let Some(ownership) = profile.ownership() {
        qos.set_ownership_kind(ownership);
    }
}

#[cfg(test)]
mod tests {
    use super::QosConfigurator;
    use crate::qos::{
        DurabilityKind, HistoryKind, LivelinessKind, OwnershipKind, PublishModeKind, QosProfile,
        ReliabilityKind,
    };
    use crate::transport::{PublisherAttributes, SubscriberAttributes};
    use std::sync::Arc;

    fn publisher_attributes() -> PublisherAttributes {
        PublisherAttributes::new("Chat", "demo.Chat", ReliabilityKind::Reliable)
    }

    fn subscriber_attributes() -> SubscriberAttributes {
        SubscriberAttributes::new("Chat", "demo.Chat", ReliabilityKind::Reliable)
    }

    #[test]
    fn high_profile_configures_every_publisher_field() {
        let configurator = QosConfigurator::new(Some(Arc::new(QosProfile::high())));
        let mut attributes = publisher_attributes();

        configurator.configure_publisher(&mut attributes);

        assert_eq!(attributes.qos.reliability, ReliabilityKind::Reliable);
        assert_eq!(attributes.qos.durability, DurabilityKind::TransientLocal);
        assert_eq!(attributes.qos.ownership, OwnershipKind::Exclusive);
        assert_eq!(attributes.topic.history.kind, HistoryKind::KeepAll);
        assert_eq!(attributes.qos.publish_mode, PublishModeKind::Synchronous);
    }

    #[test]
    fn reliability_only_profile_leaves_other_fields_untouched() {
        let profile = QosProfile::new("sparse").with_reliability(ReliabilityKind::BestEffort);
        let configurator = QosConfigurator::new(Some(Arc::new(profile)));
        let mut publisher = publisher_attributes();
        let mut subscriber = subscriber_attributes();
        let publisher_before = publisher.clone();
        let subscriber_before = subscriber.clone();

        configurator.configure_publisher(&mut publisher);
        configurator.configure_subscriber(&mut subscriber);

        assert_eq!(publisher.qos.reliability, ReliabilityKind::BestEffort);
        assert_eq!(publisher.qos.durability, publisher_before.qos.durability);
        assert_eq!(publisher.qos.ownership, publisher_before.qos.ownership);
        assert_eq!(publisher.topic, publisher_before.topic);

        assert_eq!(subscriber.qos.reliability, ReliabilityKind::BestEffort);
        assert_eq!(subscriber.qos.durability, subscriber_before.qos.durability);
        assert_eq!(subscriber.qos.ownership, subscriber_before.qos.ownership);
        assert_eq!(subscriber.qos.liveliness, None);
    }

    #[test]
    fn asynchronous_publish_and_liveliness_are_applied() {
        let profile = QosProfile::new("async")
            .with_asynchronous_publish(true)
            .with_liveliness_kind(LivelinessKind::ManualByTopic);
        let configurator = QosConfigurator::new(Some(Arc::new(profile)));
        let mut publisher = publisher_attributes();
        let mut subscriber = subscriber_attributes();

        configurator.configure_publisher(&mut publisher);
        configurator.configure_subscriber(&mut subscriber);

        assert_eq!(publisher.qos.publish_mode, PublishModeKind::Asynchronous);
        let liveliness = subscriber.qos.liveliness.expect("liveliness should be set");
        assert_eq!(liveliness.kind, LivelinessKind::ManualByTopic);
        assert_eq!(liveliness.lease_duration, None);
    }

    #[test]
    fn no_profile_mutates_nothing() {
        let configurator = QosConfigurator::new(None);
        let mut publisher = publisher_attributes();
        publisher.qos.publish_mode = PublishModeKind::Asynchronous;
        let mut subscriber = subscriber_attributes();
        let publisher_before = publisher.clone();
        let subscriber_before = subscriber.clone();

        configurator.configure_publisher(&mut publisher);
        configurator.configure_subscriber(&mut subscriber);

        assert_eq!(publisher, publisher_before);
        assert_eq!(subscriber, subscriber_before);
        assert_eq!(configurator.reliability(), None);
    }
}
