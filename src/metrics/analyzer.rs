use super::CensusSnapshot;
use serde::{Deserialize, Serialize};

/// Outcome summary of one run, or the mean of several (`runs > 1`).
/// Averaged quantities are kept as floats so single and averaged reports share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub name: String,
    pub cell_count: usize,
    pub runs: u32,
    pub completion_rate: f64,
    pub ticks_run: f64,
    pub peak_infected: f64,
    pub peak_tick: f64,
    pub total_infected: f64,
    pub attack_rate: f64,
    pub final_susceptible: f64,
    pub final_immune: f64,
}

/// `initially_immune` cells never were at risk, so they are left out of the attack rate.
pub fn analyze(snapshots: &[CensusSnapshot], name: &str, initially_immune: usize) -> AnalysisReport {
    let Some(last) = snapshots.last() else {
        return AnalysisReport {
            name: name.to_string(),
            cell_count: 0,
            runs: 1,
            completion_rate: 0.0,
            ticks_run: 0.0,
            peak_infected: 0.0,
            peak_tick: 0.0,
            total_infected: 0.0,
            attack_rate: 0.0,
            final_susceptible: 0.0,
            final_immune: 0.0,
        };
    };

    let cell_count = last.total();
    let peak = snapshots
        .iter()
        .reduce(|best, s| if s.infected > best.infected { s } else { best })
        .unwrap_or(last);

    let at_risk = cell_count.saturating_sub(initially_immune);
    let total_infected = at_risk.saturating_sub(last.susceptible);
    let attack_rate = if at_risk > 0 {
        total_infected as f64 / at_risk as f64
    } else {
        0.0
    };

    AnalysisReport {
        name: name.to_string(),
        cell_count,
        runs: 1,
        completion_rate: if last.infected == 0 { 1.0 } else { 0.0 },
        ticks_run: last.tick as f64,
        peak_infected: peak.infected as f64,
        peak_tick: peak.tick as f64,
        total_infected: total_infected as f64,
        attack_rate,
        final_susceptible: last.susceptible as f64,
        final_immune: last.immune as f64,
    }
}

/// Mean of several reports under the first report's name. `None` for an empty slice.
pub fn average_reports(reports: &[AnalysisReport]) -> Option<AnalysisReport> {
    let first = reports.first()?;
    let n = reports.len() as f64;
    let mean = |f: fn(&AnalysisReport) -> f64| reports.iter().map(f).sum::<f64>() / n;

    Some(AnalysisReport {
        name: first.name.clone(),
        cell_count: first.cell_count,
        runs: reports.iter().map(|r| r.runs).sum(),
        completion_rate: mean(|r| r.completion_rate),
        ticks_run: mean(|r| r.ticks_run),
        peak_infected: mean(|r| r.peak_infected),
        peak_tick: mean(|r| r.peak_tick),
        total_infected: mean(|r| r.total_infected),
        attack_rate: mean(|r| r.attack_rate),
        final_susceptible: mean(|r| r.final_susceptible),
        final_immune: mean(|r| r.final_immune),
    })
}
