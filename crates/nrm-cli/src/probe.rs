use nrm_core::NrmResult;
use nrm_operations::{probe::probe_registries, NrmContext, ProbeResult, ProbeStatus};
use nu_ansi_term::Color::{Green, Red, Yellow};
use tracing::info;

use crate::{
    list::current_marker,
    utils::{column_width, dash_line, icon_or, Colored, Icons},
};

pub fn test_registries(ctx: &NrmContext, target: Option<&str>) -> NrmResult<()> {
    let report = probe_registries(ctx, target)?;
    let timeout_ms = report.timeout.as_millis();
    let width = column_width(report.results.iter().map(|result| result.name.as_str()));

    for result in &report.results {
        info!(
            "{}{}{}{}",
            current_marker(result.current),
            result.name,
            dash_line(&result.name, width),
            describe(result, timeout_ms)
        );
    }

    Ok(())
}

fn describe(result: &ProbeResult, timeout_ms: u128) -> String {
    let elapsed = format!("{} ms", result.elapsed.as_millis());

    match &result.status {
        ProbeStatus::Ok if result.fastest => {
            format!(
                "{} {}",
                Colored(Green, elapsed),
                icon_or(Icons::FASTEST, "(fastest)")
            )
        }
        ProbeStatus::Ok => elapsed,
        ProbeStatus::Failed(_) => {
            format!(
                "{elapsed}{}",
                Colored(
                    Red,
                    " (Fetch error, if this is your private registry, please ignore)"
                )
            )
        }
        ProbeStatus::Timeout => {
            format!(
                "timeout{}",
                Colored(Yellow, format!(" (Fetch timeout over {timeout_ms} ms)"))
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::utils::set_color;

    fn result(status: ProbeStatus, fastest: bool) -> ProbeResult {
        ProbeResult {
            name: "npm".into(),
            url: "https://registry.npmjs.org/".into(),
            elapsed: Duration::from_millis(42),
            status,
            current: false,
            fastest,
        }
    }

    #[test]
    fn test_describe() {
        set_color(false);

        assert_eq!(describe(&result(ProbeStatus::Ok, false), 5000), "42 ms");
        assert_eq!(
            describe(&result(ProbeStatus::Timeout, false), 5000),
            "timeout (Fetch timeout over 5000 ms)"
        );
        assert_eq!(
            describe(&result(ProbeStatus::Failed("404".into()), false), 5000),
            "42 ms (Fetch error, if this is your private registry, please ignore)"
        );
        assert!(describe(&result(ProbeStatus::Ok, true), 5000).starts_with("42 ms "));
    }
}
