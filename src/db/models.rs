use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// One logical sensor feed reported by the ESP32.
///
/// Each channel owns exactly one append-only table. Table names are derived
/// from this enum only, so no caller-supplied string ever reaches SQL.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Vibracao,
    #[serde(rename = "corrente_1")]
    Corrente1,
    #[serde(rename = "corrente_2")]
    Corrente2,
    #[serde(rename = "corrente_3")]
    Corrente3,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Vibracao,
        Channel::Corrente1,
        Channel::Corrente2,
        Channel::Corrente3,
    ];

    /// Slug used in route paths and aggregate result keys.
    pub fn slug(self) -> &'static str {
        match self {
            Channel::Vibracao => "vibracao",
            Channel::Corrente1 => "corrente_1",
            Channel::Corrente2 => "corrente_2",
            Channel::Corrente3 => "corrente_3",
        }
    }

    pub fn table_name(self) -> &'static str {
        match self {
            Channel::Vibracao => "sensor_vibracao",
            Channel::Corrente1 => "sensor_corrente_1",
            Channel::Corrente2 => "sensor_corrente_2",
            Channel::Corrente3 => "sensor_corrente_3",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A row of any channel table. Column names are part of the JSON contract.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Reading {
    pub id: i32,
    pub leitura: f64,
    pub data_criacao: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_are_prefixed_slugs() {
        for channel in Channel::ALL {
            assert_eq!(channel.table_name(), format!("sensor_{}", channel.slug()));
        }
    }

    #[test]
    fn serde_uses_slugs() {
        assert_eq!(
            serde_json::to_value(Channel::Corrente2).unwrap(),
            serde_json::json!("corrente_2")
        );
        assert_eq!(
            serde_json::to_value(Channel::Vibracao).unwrap(),
            serde_json::json!("vibracao")
        );
    }
}
