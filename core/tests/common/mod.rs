//! Record builders shared by the integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use eventdesk_core::{
    event_aggregator::{aggregate_events, EventMetrics},
    extractor::extract,
    record::{CenterRecord, EventRecord, ExpenseRecord, ParticipantRecord, SurveyRecord},
    snapshot::Snapshot,
};

/// Route `log` output through the test harness; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// The "current date" every test pins.
pub fn today() -> NaiveDate {
    date(2026, 10, 17)
}

pub fn event(
    id: &str,
    on: NaiveDate,
    center: Option<&str>,
    capacity_actual: i64,
    ticket_price: Option<f64>,
) -> EventRecord {
    EventRecord {
        id: id.into(),
        name: format!("Evento {id}"),
        date: on,
        status: "Completado".into(),
        event_type: "taller".into(),
        center_id: center.map(String::from),
        capacity_max: capacity_actual.max(1) * 2,
        capacity_actual,
        ticket_price,
    }
}

pub fn expense(event_id: &str, cost: f64) -> ExpenseRecord {
    ExpenseRecord {
        event_id: event_id.into(),
        cost,
        description: None,
    }
}

/// `total` participants for `event_id`, the first `attended` of them present.
pub fn participants(event_id: &str, total: usize, attended: usize) -> Vec<ParticipantRecord> {
    (0..total)
        .map(|i| ParticipantRecord {
            event_id: event_id.into(),
            attended: i < attended,
            name: None,
        })
        .collect()
}

pub fn survey(event_id: &str, score: Option<u8>, recommends: Option<bool>) -> SurveyRecord {
    SurveyRecord {
        event_id: event_id.into(),
        overall_score: score,
        recommends,
        comment: None,
    }
}

pub fn center(id: &str, name: &str) -> CenterRecord {
    CenterRecord {
        id: id.into(),
        name: name.into(),
    }
}

pub fn metrics_of(snapshot: &Snapshot) -> Vec<EventMetrics> {
    aggregate_events(&extract(snapshot))
}

/// Four events over two centers, two types and two months.
///
/// | id | center | date       | type      | income | expenses | part/att | scores      |
/// |----|--------|------------|-----------|--------|----------|----------|-------------|
/// | e1 | c1     | 2026-09-05 | taller    | 100    | 40       | 10/9     | 5,4 (rec,rec) |
/// | e2 | c2     | 2026-09-20 | concierto | 100    | 0        | 2/1      | -           |
/// | e3 | c1     | 2026-10-02 | concierto | 0      | 30       | 90/45    | 3 (no rec)  |
/// | e4 | -      | 2026-10-10 | taller    | 20     | 5        | 0/0      | -           |
pub fn mixed_snapshot() -> Snapshot {
    let mut e2 = event("e2", date(2026, 9, 20), Some("c2"), 2, Some(50.0));
    e2.event_type = "concierto".into();
    e2.status = "Activo".into();
    let mut e3 = event("e3", date(2026, 10, 2), Some("c1"), 0, None);
    e3.event_type = "concierto".into();
    let mut e4 = event("e4", date(2026, 10, 10), None, 4, Some(5.0));
    e4.status = "pendiente".into();

    let mut all_participants = participants("e1", 10, 9);
    all_participants.extend(participants("e2", 2, 1));
    all_participants.extend(participants("e3", 90, 45));

    Snapshot {
        events: vec![
            event("e1", date(2026, 9, 5), Some("c1"), 10, Some(10.0)),
            e2,
            e3,
            e4,
        ],
        expenses: vec![
            expense("e1", 25.0),
            expense("e1", 15.0),
            expense("e3", 30.0),
            expense("e4", 5.0),
        ],
        participants: all_participants,
        surveys: vec![
            survey("e1", Some(5), Some(true)),
            survey("e1", Some(4), Some(true)),
            survey("e3", Some(3), Some(false)),
        ],
        centers: vec![center("c1", "Centro Norte"), center("c2", "Centro Sur")],
    }
}
