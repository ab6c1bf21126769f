// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AdviceOutcome, CoachState, PropertyId, PropertyRecord, SummaryStats, YieldHistogram};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    Loading,
    Ready(T),
}

impl<T> Loadable<T> {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Loading => None,
            Self::Ready(value) => Some(value),
        }
    }
}

/// Everything the dashboard holds: the two fetched snapshots, the selected
/// record, and the coach widget's own request state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    pub rows: Loadable<Vec<PropertyRecord>>,
    pub summary: Loadable<Option<SummaryStats>>,
    pub selected: Option<PropertyRecord>,
    pub coach: CoachState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    PropertiesLoaded(Vec<PropertyRecord>),
    SummaryLoaded(Option<SummaryStats>),
    Select(PropertyId),
    AskCoach,
    AdviceArrived { token: u64, outcome: AdviceOutcome },
    Reload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    RowsLoaded(usize),
    SummaryLoaded { available: bool },
    SelectionChanged(Option<PropertyId>),
    AdviceRequested { token: u64, record: PropertyRecord },
    AdviceAbandoned,
    AdviceShown,
    AdviceDiscarded { token: u64 },
    ReloadRequested,
}

impl DashboardState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::PropertiesLoaded(records) => self.replace_rows(records),
            AppCommand::SummaryLoaded(summary) => {
                let available = summary.is_some();
                self.summary = Loadable::Ready(summary);
                vec![AppEvent::SummaryLoaded { available }]
            }
            AppCommand::Select(id) => self.select(&id),
            AppCommand::AskCoach => {
                let Some(record) = self.selected.clone() else {
                    return Vec::new();
                };
                match self.coach.begin(true) {
                    Some(token) => vec![AppEvent::AdviceRequested { token, record }],
                    None => Vec::new(),
                }
            }
            AppCommand::AdviceArrived { token, outcome } => {
                if self.coach.finish(token, &outcome) {
                    vec![AppEvent::AdviceShown]
                } else {
                    vec![AppEvent::AdviceDiscarded { token }]
                }
            }
            AppCommand::Reload => {
                self.rows = Loadable::Loading;
                self.summary = Loadable::Loading;
                vec![AppEvent::ReloadRequested]
            }
        }
    }

    /// Rows in fetch order; empty while the first fetch is pending.
    pub fn rows(&self) -> &[PropertyRecord] {
        self.rows.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_id(&self) -> Option<&PropertyId> {
        self.selected.as_ref().map(|record| &record.id)
    }

    pub fn is_active(&self, record: &PropertyRecord) -> bool {
        self.selected_id() == Some(&record.id)
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    pub fn histogram(&self) -> YieldHistogram {
        YieldHistogram::from_records(self.rows())
    }

    fn select(&mut self, id: &PropertyId) -> Vec<AppEvent> {
        if self.selected_id() == Some(id) {
            return Vec::new();
        }
        let Some(record) = self.rows().iter().find(|record| &record.id == id).cloned() else {
            return Vec::new();
        };
        self.change_selection(Some(record))
    }

    fn replace_rows(&mut self, records: Vec<PropertyRecord>) -> Vec<AppEvent> {
        let count = records.len();
        let next_selection = match self.selected_id() {
            Some(id) => records
                .iter()
                .find(|record| &record.id == id)
                .or_else(|| records.first()),
            None => records.first(),
        }
        .cloned();
        self.rows = Loadable::Ready(records);

        let mut events = vec![AppEvent::RowsLoaded(count)];
        let same_id = next_selection.as_ref().map(|record| &record.id) == self.selected_id();
        if same_id {
            self.selected = next_selection;
        } else {
            events.extend(self.change_selection(next_selection));
        }
        events
    }

    fn change_selection(&mut self, record: Option<PropertyRecord>) -> Vec<AppEvent> {
        let mut events = Vec::new();
        if self.coach.abandon() {
            events.push(AppEvent::AdviceAbandoned);
        }
        let id = record.as_ref().map(|record| record.id.clone());
        self.selected = record;
        events.push(AppEvent::SelectionChanged(id));
        events
    }
}
