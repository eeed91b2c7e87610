use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::Reading;

pub const NO_DATA_MESSAGE: &str = "nenhum dado encontrado";

/// Body sent by the ESP32 for every channel.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitReadingRequest {
    pub leitura_sensor: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }
}

/// Plain `{"mensagem": ...}` payload used by the root route and the
/// empty-table sentinel.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub mensagem: String,
}

impl MessageResponse {
    pub fn no_data() -> Self {
        Self {
            mensagem: NO_DATA_MESSAGE.to_owned(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingDto {
    pub id: i32,
    pub leitura: f64,
    pub data_criacao: DateTime<Utc>,
}

impl From<Reading> for ReadingDto {
    fn from(r: Reading) -> Self {
        Self {
            id: r.id,
            leitura: r.leitura,
            data_criacao: r.data_criacao,
        }
    }
}

/// Latest row of a channel, or the no-data message for an empty table.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum LatestResponse {
    Found(ReadingDto),
    Empty(MessageResponse),
}

impl From<Option<Reading>> for LatestResponse {
    fn from(row: Option<Reading>) -> Self {
        match row {
            Some(r) => Self::Found(r.into()),
            None => Self::Empty(MessageResponse::no_data()),
        }
    }
}

/// Most recent rows first, or the no-data message for an empty table.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum HistoryResponse {
    Found(Vec<ReadingDto>),
    Empty(MessageResponse),
}

impl From<Vec<Reading>> for HistoryResponse {
    fn from(rows: Vec<Reading>) -> Self {
        if rows.is_empty() {
            Self::Empty(MessageResponse::no_data())
        } else {
            Self::Found(rows.into_iter().map(Into::into).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn reading(id: i32, leitura: f64) -> Reading {
        Reading {
            id,
            leitura,
            data_criacao: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_latest_is_the_no_data_message() {
        let body = serde_json::to_value(LatestResponse::from(None)).unwrap();
        assert_eq!(body, json!({ "mensagem": "nenhum dado encontrado" }));
    }

    #[test]
    fn found_latest_is_a_bare_row() {
        let body = serde_json::to_value(LatestResponse::from(Some(reading(3, 3.14)))).unwrap();
        assert_eq!(body["id"], 3);
        assert_eq!(body["leitura"], 3.14);
        assert_eq!(body["data_criacao"], "2025-06-01T12:00:00Z");
    }

    #[test]
    fn empty_history_is_the_no_data_message() {
        let body = serde_json::to_value(HistoryResponse::from(Vec::new())).unwrap();
        assert_eq!(body, json!({ "mensagem": "nenhum dado encontrado" }));
    }

    #[test]
    fn history_keeps_row_order() {
        let rows = vec![reading(2, 2.0), reading(1, 1.0)];
        let body = serde_json::to_value(HistoryResponse::from(rows)).unwrap();
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
