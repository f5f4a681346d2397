//! Response time probe for `nrm test`.

use std::{
    io,
    time::{Duration, Instant},
};

use nrm_core::{error::NrmError, table::RegistryEntry, NrmResult};
use rayon::prelude::*;
use tracing::{debug, trace};
use ureq::Agent;

use crate::{current::resolve, NrmContext, ProbeReport, ProbeResult, ProbeStatus};

const USER_AGENT: &str = concat!("nrm/", env!("CARGO_PKG_VERSION"));

fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .user_agent(USER_AGENT)
        .build()
        .into()
}

/// Requests `{url}nrm` from every registry, or only from `target`, in
/// parallel.
///
/// Results keep table order. The fastest successful registry is marked only
/// when every registry was probed.
pub fn probe_registries(ctx: &NrmContext, target: Option<&str>) -> NrmResult<ProbeReport> {
    let table = ctx.table()?;
    let entries: Vec<&RegistryEntry> = match target {
        Some(name) => {
            vec![table
                .get(name)
                .ok_or_else(|| NrmError::RegistryNotFound(name.to_string()))?]
        }
        None => table.all().collect(),
    };

    let current = resolve(&table, ctx)?;
    let timeout = ctx.test_timeout();
    let agent = build_agent(timeout);
    debug!(count = entries.len(), ?timeout, "probing registries");

    let mut results: Vec<ProbeResult> = entries
        .par_iter()
        .map(|entry| {
            let (status, elapsed) = probe(&agent, &entry.registry.url);
            ProbeResult {
                name: entry.name.clone(),
                url: entry.registry.url.clone(),
                elapsed,
                status,
                current: current.name() == Some(entry.name.as_str()),
                fastest: false,
            }
        })
        .collect();

    if target.is_none() {
        mark_fastest(&mut results);
    }

    Ok(ProbeReport { results, timeout })
}

fn probe(agent: &Agent, url: &str) -> (ProbeStatus, Duration) {
    let endpoint = format!("{url}nrm");
    let start = Instant::now();

    let status = match agent.get(&endpoint).call() {
        Ok(_) => ProbeStatus::Ok,
        Err(ureq::Error::Timeout(_)) => ProbeStatus::Timeout,
        Err(ureq::Error::Io(err)) if err.kind() == io::ErrorKind::TimedOut => ProbeStatus::Timeout,
        Err(err) => ProbeStatus::Failed(err.to_string()),
    };
    let elapsed = start.elapsed();

    trace!(endpoint = %endpoint, ?status, ?elapsed, "probe finished");
    (status, elapsed)
}

/// Flags the first successful result with the lowest elapsed time.
pub fn mark_fastest(results: &mut [ProbeResult]) {
    let fastest = results
        .iter_mut()
        .filter(|result| result.status == ProbeStatus::Ok)
        .min_by_key(|result| result.elapsed);
    if let Some(result) = fastest {
        result.fastest = true;
    }
}
