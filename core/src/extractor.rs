//! Metrics extractor: joins the raw snapshot into per-event groups.
//!
//! Every event gets an entry, even with no related rows. Related rows
//! whose event id matches no event are dropped and counted.

use crate::{
    record::{EventRecord, ExpenseRecord, ParticipantRecord, SurveyRecord},
    snapshot::Snapshot,
};
use serde::Serialize;
use std::collections::HashMap;

/// Related rows of one event.
#[derive(Debug, Clone, Default)]
pub struct EventRelations<'a> {
    pub expenses: Vec<&'a ExpenseRecord>,
    pub participants: Vec<&'a ParticipantRecord>,
    pub surveys: Vec<&'a SurveyRecord>,
}

/// Rows dropped because their event id matches no event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrphanCounts {
    pub expenses: usize,
    pub participants: usize,
    pub surveys: usize,
}

impl OrphanCounts {
    pub fn total(&self) -> usize {
        self.expenses + self.participants + self.surveys
    }
}

/// The joined snapshot, borrowing from the raw records.
#[derive(Debug, Clone)]
pub struct Extracted<'a> {
    /// Events in snapshot order, each with its related rows.
    pub events: Vec<(&'a EventRecord, EventRelations<'a>)>,
    pub orphans: OrphanCounts,
    /// Event id to position in `events`.
    index: HashMap<&'a str, usize>,
}

pub fn extract(snapshot: &Snapshot) -> Extracted<'_> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(snapshot.events.len());
    let mut events: Vec<(&EventRecord, EventRelations)> = Vec::with_capacity(snapshot.events.len());
    for event in &snapshot.events {
        // A duplicated id keeps its first row; later rows would double-count.
        if index.contains_key(event.id.as_str()) {
            log::warn!("duplicate event id {} ignored", event.id);
            continue;
        }
        index.insert(event.id.as_str(), events.len());
        events.push((event, EventRelations::default()));
    }

    let mut orphans = OrphanCounts::default();

    for expense in &snapshot.expenses {
        match index.get(expense.event_id.as_str()) {
            Some(&i) => events[i].1.expenses.push(expense),
            None => orphans.expenses += 1,
        }
    }
    for participant in &snapshot.participants {
        match index.get(participant.event_id.as_str()) {
            Some(&i) => events[i].1.participants.push(participant),
            None => orphans.participants += 1,
        }
    }
    for survey in &snapshot.surveys {
        match index.get(survey.event_id.as_str()) {
            Some(&i) => events[i].1.surveys.push(survey),
            None => orphans.surveys += 1,
        }
    }

    if orphans.total() > 0 {
        log::warn!(
            "dropped orphan rows: expenses={} participants={} surveys={}",
            orphans.expenses,
            orphans.participants,
            orphans.surveys,
        );
    }

    Extracted { events, orphans, index }
}

impl<'a> Extracted<'a> {
    pub fn relations_of(&self, event_id: &str) -> Option<&EventRelations<'a>> {
        self.index.get(event_id).map(|&i| &self.events[i].1)
    }
}
