//! Domain events runtime bridge for the web server.
//!
//! Turns committed birthday mutations into turbo-stream fragments and pushes
//! them to every client subscribed to the live-update stream.

use birthdays_core::events::{DomainEvent, DomainEventSink};

use crate::events::{EventBus, ServerEvent};
use crate::{templates, turbo};

/// Domain event sink that broadcasts live updates.
pub struct LiveUpdateSink {
    event_bus: EventBus,
}

impl LiveUpdateSink {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }
}

/// Renders the stream action matching a domain event.
pub fn render_live_update(event: &DomainEvent) -> String {
    match event {
        DomainEvent::BirthdayCreated { birthday } => turbo::append(
            turbo::BIRTHDAYS_TARGET,
            &templates::birthday_row(birthday),
        ),
        DomainEvent::BirthdayDeleted { birthday_id } => {
            turbo::remove(&templates::row_dom_id(*birthday_id))
        }
    }
}

impl DomainEventSink for LiveUpdateSink {
    fn emit(&self, event: DomainEvent) {
        let subscribers = self.event_bus.subscriber_count();
        if subscribers == 0 {
            return;
        }
        tracing::debug!(subscribers, ?event, "Pushing live update");
        self.event_bus
            .publish(ServerEvent::turbo_stream(render_live_update(&event)));
    }
}
