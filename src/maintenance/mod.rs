mod service;

pub use service::{
    MaintenanceOutcome, MaintenanceReport, MaintenanceService, Operation, OutcomeStatus,
};
