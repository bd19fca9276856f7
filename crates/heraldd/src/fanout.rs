//! Fan-out coordinator
//!
//! Runs every registered check concurrently and waits for all of them.
//! A failing check never fails the aggregate: its blank record (title and
//! link, severity unset) takes its place, so N checks always give N records.
//! Records come back in completion order.

use crate::checks::CheckRegistry;
use herald_common::ResultRecord;
use std::collections::HashMap;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

/// Check every service in the registry, one task per check
pub async fn check_all(registry: &CheckRegistry) -> Vec<ResultRecord> {
    let mut join_set = JoinSet::new();
    // Blank records of checks that have not reported back yet
    let mut pending: HashMap<String, ResultRecord> = HashMap::with_capacity(registry.len());

    for (name, check) in registry.iter() {
        let name = name.to_string();
        let check = check.clone();
        pending.insert(name.clone(), check.blank_record());

        join_set.spawn(async move {
            let record = match check.check().await {
                Ok(record) => record,
                Err(e) => {
                    warn!("Status check {} failed: {}", name, e);
                    unavailable(check.blank_record(), &e.to_string())
                }
            };
            (name, record)
        });
    }

    let mut records = Vec::with_capacity(registry.len());
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((name, record)) => {
                debug!("Status check {} finished: {}", name, record.severity);
                pending.remove(&name);
                records.push(record);
            }
            Err(e) => error!("Status check task aborted: {}", e),
        }
    }

    // Whatever is still pending panicked
    for (_, blank) in pending {
        records.push(unavailable(blank, "check aborted"));
    }

    records
}

fn unavailable(blank: ResultRecord, reason: &str) -> ResultRecord {
    blank.with_body(format!("Status unavailable: {}", reason))
}
