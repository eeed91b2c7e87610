use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::db::{
    models::Channel,
    readings::{self, StoreResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Ok,
    Erro,
}

/// Result of one maintenance action on one channel table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceOutcome {
    pub status: OutcomeStatus,
    pub mensagem: String,
}

/// Per-channel outcomes of a bulk action, keyed by channel slug.
pub type MaintenanceReport = BTreeMap<Channel, MaintenanceOutcome>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Delete every row and restart the id sequence.
    Clear,
    /// Remove the table.
    Drop,
    /// Create the table if it is missing.
    Provision,
}

impl Operation {
    fn success_message(self, channel: Channel) -> String {
        match self {
            Operation::Clear => format!("Tabela {} limpa com sucesso", channel.table_name()),
            Operation::Drop => "Tabela excluída com sucesso".to_owned(),
            Operation::Provision => format!("Tabela {} criada com sucesso", channel.table_name()),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Operation::Clear => "clear",
            Operation::Drop => "drop",
            Operation::Provision => "provision",
        }
    }
}

pub struct MaintenanceService {
    pool: PgPool,
}

impl MaintenanceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies `op` to a single channel. Errors propagate to the caller.
    pub async fn run(&self, op: Operation, channel: Channel) -> StoreResult<MaintenanceOutcome> {
        match op {
            Operation::Clear => readings::truncate(&self.pool, channel).await?,
            Operation::Drop => readings::drop_table(&self.pool, channel).await?,
            Operation::Provision => readings::create_table(&self.pool, channel).await?,
        }

        info!(
            channel = %channel,
            table = channel.table_name(),
            op = op.name(),
            "Maintenance applied"
        );
        Ok(MaintenanceOutcome {
            status: OutcomeStatus::Ok,
            mensagem: op.success_message(channel),
        })
    }

    /// Applies `op` to every channel in turn. A failing channel is recorded
    /// in the report and does not stop the remaining ones.
    pub async fn run_all(&self, op: Operation) -> MaintenanceReport {
        let mut report = MaintenanceReport::new();

        for channel in Channel::ALL {
            let outcome = match self.run(op, channel).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(channel = %channel, op = op.name(), error = %e, "Maintenance failed");
                    MaintenanceOutcome {
                        status: OutcomeStatus::Erro,
                        mensagem: e.to_string(),
                    }
                }
            };
            report.insert(channel, outcome);
        }

        report
    }
}
