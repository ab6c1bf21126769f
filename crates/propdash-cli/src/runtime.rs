// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use propdash_api::{Client, QueryFilter};
use propdash_app::{AdviceOutcome, PropertyRecord, SummaryStats};
use propdash_tui::{AppRuntime, InternalEvent};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::debug;

/// Talks to the dashboard backend. Fetches run on their own threads so the
/// UI keeps drawing while a slow backend answers.
pub struct HttpRuntime {
    client: Client,
}

impl HttpRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn spawn_worker<F>(&self, name: &str, tx: Sender<InternalEvent>, work: F) -> Result<()>
    where
        F: FnOnce(&Client) -> InternalEvent + Send + 'static,
    {
        let client = self.client.clone();
        thread::Builder::new()
            .name(format!("propdash-{name}"))
            .spawn(move || {
                let event = work(&client);
                if tx.send(event).is_err() {
                    debug!("dashboard closed before a fetch finished");
                }
            })
            .with_context(|| format!("spawn {name} worker"))?;
        Ok(())
    }
}

impl AppRuntime for HttpRuntime {
    fn source_label(&self) -> String {
        with_filter_label(self.client.base_url().to_owned(), self.client.filter())
    }

    fn load_properties(&mut self) -> Vec<PropertyRecord> {
        self.client.properties_or_empty()
    }

    fn load_summary(&mut self) -> Option<SummaryStats> {
        self.client.summary_or_none()
    }

    fn request_advice(&mut self, record: &PropertyRecord) -> AdviceOutcome {
        self.client.advice_outcome(record)
    }

    fn spawn_properties_load(&mut self, tx: Sender<InternalEvent>) -> Result<()> {
        self.spawn_worker("properties", tx, |client| {
            InternalEvent::PropertiesLoaded(client.properties_or_empty())
        })
    }

    fn spawn_summary_load(&mut self, tx: Sender<InternalEvent>) -> Result<()> {
        self.spawn_worker("summary", tx, |client| {
            InternalEvent::SummaryLoaded(client.summary_or_none())
        })
    }

    fn spawn_advice(
        &mut self,
        token: u64,
        record: PropertyRecord,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        self.spawn_worker("coach", tx, move |client| InternalEvent::AdviceArrived {
            token,
            outcome: client.advice_outcome(&record),
        })
    }
}

/// Offline data: the built-in sample listings, a summary computed from them,
/// and rule-of-thumb coaching. Runs inline on the UI thread.
pub struct DemoRuntime {
    rows: Vec<PropertyRecord>,
    filter: QueryFilter,
}

impl DemoRuntime {
    pub fn new(filter: QueryFilter) -> Self {
        let rows = propdash_testkit::demo_properties()
            .into_iter()
            .filter(|record| matches_filter(record, &filter))
            .collect();
        Self { rows, filter }
    }
}

impl AppRuntime for DemoRuntime {
    fn source_label(&self) -> String {
        with_filter_label("demo data".to_owned(), &self.filter)
    }

    fn load_properties(&mut self) -> Vec<PropertyRecord> {
        self.rows.clone()
    }

    fn load_summary(&mut self) -> Option<SummaryStats> {
        Some(propdash_testkit::summarize(&self.rows))
    }

    fn request_advice(&mut self, record: &PropertyRecord) -> AdviceOutcome {
        AdviceOutcome::Advice(propdash_testkit::heuristic_advice(record))
    }
}

fn matches_filter(record: &PropertyRecord, filter: &QueryFilter) -> bool {
    let matches = |wanted: &Option<String>, actual: &Option<String>| match wanted {
        None => true,
        Some(wanted) => actual
            .as_deref()
            .is_some_and(|actual| actual.eq_ignore_ascii_case(wanted.trim())),
    };
    matches(&filter.suburb, &record.suburb) && matches(&filter.state, &record.state)
}

fn with_filter_label(mut label: String, filter: &QueryFilter) -> String {
    let parts = [filter.suburb.as_deref(), filter.state.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();
    if !parts.is_empty() {
        label.push_str(" (");
        label.push_str(&parts.join(", "));
        label.push(')');
    }
    label
}
