//! Raw records as the data store hands them over.
//!
//! RULE: records are read-only inputs. The engine never mutates them;
//! everything it produces is a new derived value.

use crate::types::{CenterId, EventId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: EventId,
    pub name: String,
    pub date: NaiveDate,
    /// Free text, e.g. "Completado", "activo", "Pendiente de pago".
    pub status: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub center_id: Option<CenterId>,
    pub capacity_max: i64,
    pub capacity_actual: i64,
    /// Absent means a free event.
    pub ticket_price: Option<f64>,
}

impl EventRecord {
    /// `capacity_actual × ticket_price`, with a free event earning 0.
    pub fn income(&self) -> f64 {
        self.capacity_actual as f64 * self.ticket_price.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub event_id: EventId,
    /// Non-negative.
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub event_id: EventId,
    pub attended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    pub event_id: EventId,
    /// 1–5 when answered.
    pub overall_score: Option<u8>,
    pub recommends: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CenterRecord {
    pub id: CenterId,
    pub name: String,
}
