// Copyright (C) Microsoft Corporation. All rights reserved.

//! Records `tracing` events emitted on the current thread while a closure
//! runs, so tests can check the level a message is logged at.

use std::sync::Arc;
use std::sync::Mutex;

use tracing::field::Field;
use tracing::field::Visit;
use tracing::Event;
use tracing::Level;
use tracing::Subscriber;
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

type Events = Arc<Mutex<Vec<(Level, String)>>>;

struct Recorder(Events);

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0
            .lock()
            .expect("events")
            .push((*event.metadata().level(), visitor.0));
    }
}

/// Runs `f` under a recording subscriber and returns `(level, message)`
/// for every event it emitted.
pub(crate) fn capture_events(f: impl FnOnce()) -> Vec<(Level, String)> {
    let events = Events::default();
    let subscriber = Registry::default().with(Recorder(events.clone()));
    tracing::subscriber::with_default(subscriber, f);
    let mut recorded = events.lock().expect("events");
    std::mem::take(&mut *recorded)
}

/// Level of the first recorded event with `message`.
pub(crate) fn level_of(events: &[(Level, String)], message: &str) -> Option<Level> {
    events
        .iter()
        .find(|(_, m)| m == message)
        .map(|(level, _)| *level)
}
