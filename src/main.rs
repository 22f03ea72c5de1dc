// cellspread: a small contact-epidemic sandbox. Cells drift around a walled arena,
// infect whoever gets too close and eventually recover for good.

// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use cellspread::metrics::analyzer::{self, AnalysisReport};
use cellspread::prelude::*;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Overrides applied on top of the defaults or a `--config` file.
#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    name: Option<String>,
    #[arg(short = 'n', long)]
    cells: Option<usize>,
    #[arg(short, long)]
    speed: Option<f64>,
    #[arg(short, long)]
    infected: Option<usize>,
    #[arg(long)]
    immune: Option<usize>,
    #[arg(long)]
    radius: Option<f64>,
    #[arg(long)]
    recovery: Option<u32>,
    #[arg(long)]
    max_ticks: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    Run {
        #[command(flatten)]
        config: ConfigArgs,
        #[arg(short, long, default_value = "results")]
        output: PathBuf,
        #[arg(long)]
        no_save: bool,
    },

    Compare {
        #[command(flatten)]
        config: ConfigArgs,
        #[arg(long, default_value = "5,10,15,20,30")]
        radii: String,
        #[arg(short, long, default_value_t = 3)]
        repetitions: u32,
        #[arg(short, long, default_value = "results")]
        output: PathBuf,
    },

    Analyze {
        #[arg(default_value = "results")]
        path: PathBuf,
    },

    /// Print the default configuration as JSON
    Config,
}

fn main() -> Result<()> {
    let program_start = Instant::now();

    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run { config, output, no_save } => {
            let config = build_config(&config)?;
            run_single_simulation(config, &output, !no_save)?;
        }

        Commands::Compare { config, radii, repetitions, output } => {
            let config = build_config(&config)?;
            let radii = parse_radii(&radii)?;
            compare_radii(config, &radii, repetitions, &output)?;
        }

        Commands::Analyze { path } => {
            analyze_results(&path)?;
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&SimConfig::default())?);
        }
    }

    info!("Total runtime: {:.2}s", program_start.elapsed().as_secs_f64());

    Ok(())
}

fn build_config(args: &ConfigArgs) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SimConfig::default(),
    };

    if let Some(name) = &args.name {
        config.name = name.clone();
    }
    if let Some(cells) = args.cells {
        config.cell_count = cells;
    }
    if let Some(speed) = args.speed {
        config.speed = speed;
    }
    if let Some(infected) = args.infected {
        config.infected_count = infected;
    }
    if let Some(immune) = args.immune {
        config.immune_count = immune;
    }
    if let Some(radius) = args.radius {
        config.world.contact_radius = radius;
    }
    if let Some(recovery) = args.recovery {
        config.world.recovery_period = recovery;
    }
    if let Some(max_ticks) = args.max_ticks {
        config.max_ticks = max_ticks;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    config.validate()?;
    Ok(config)
}

fn parse_radii(list: &str) -> Result<Vec<f64>> {
    let radii = list
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().with_context(|| format!("Bad radius: {}", s)))
        .collect::<Result<Vec<_>>>()?;

    if radii.is_empty() {
        anyhow::bail!("No contact radii given");
    }
    Ok(radii)
}

fn run_single_simulation(config: SimConfig, output: &Path, save: bool) -> Result<()> {
    info!("cellspread: Single Run");

    let mut sim = Simulation::new(config)?.with_progress(true);
    let report = sim.run();

    if save {
        sim.save_results(output)?;
    }

    comparison_table(std::slice::from_ref(&report));
    Ok(())
}

fn compare_radii(base: SimConfig, radii: &[f64], repetitions: u32, output: &Path) -> Result<()> {
    info!("cellspread: Comparison");
    info!("Radii: {:?}", radii);
    info!("Repetitions: {}", repetitions);

    let mut all_reports = Vec::new();

    for &radius in radii {
        info!("Testing radius {}", radius);
        let name = format!("radius_{}", radius);

        let mut reports = Vec::new();
        for rep in 0..repetitions {
            let mut config = base.clone().with_name(name.clone()).with_contact_radius(radius);
            // vary the seed per repetition but keep the sweep reproducible
            if let Some(seed) = base.seed {
                config.seed = Some(seed.wrapping_add(rep as u64));
            }

            let mut sim = Simulation::new(config)?;
            let report = sim.run();
            info!(
                "  Run {}/{}: {} ticks, attack rate {:.1}%",
                rep + 1,
                repetitions,
                report.ticks_run,
                report.attack_rate * 100.0
            );
            reports.push(report);
        }

        if let Some(avg) = analyzer::average_reports(&reports) {
            all_reports.push(avg);
        }
    }

    comparison_table(&all_reports);

    std::fs::create_dir_all(output)?;
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let comparison_path = output.join(format!("comparison_{}.json", timestamp));
    std::fs::write(&comparison_path, serde_json::to_string_pretty(&all_reports)?)?;
    info!("Comparison saved to: {}", comparison_path.display());

    Ok(())
}

fn analyze_results(path: &Path) -> Result<()> {
    info!("Analyzing results in: {}", path.display());

    let mut reports = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let path = entry?.path();

        if path.extension().and_then(|s| s.to_str()) == Some("json")
            && path.to_string_lossy().contains("analysis")
        {
            let content = std::fs::read_to_string(&path)?;
            let report: AnalysisReport = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            reports.push(report);
        }
    }

    if reports.is_empty() {
        info!("No analysis files found.");
        return Ok(());
    }

    reports.sort_by(|a, b| a.name.cmp(&b.name));
    comparison_table(&reports);
    Ok(())
}

fn comparison_table(reports: &[AnalysisReport]) {
    println!("\n╔═══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                              OUTBREAK SUMMARY                                 ║");
    println!("╠═══════════════╦══════╦═══════════╦═══════════╦════════════╦══════════╦═══════╣");
    println!("║ Run           ║ Runs ║ Ticks     ║ Peak      ║ Peak Tick  ║ Attack   ║ Done  ║");
    println!("║               ║      ║           ║ (cells)   ║            ║ (%)      ║ (%)   ║");
    println!("╠═══════════════╬══════╬═══════════╬═══════════╬════════════╬══════════╬═══════╣");

    for report in reports {
        println!(
            "║ {:<13} ║ {:>4} ║ {:>9.1} ║ {:>9.1} ║ {:>10.1} ║ {:>7.1}% ║ {:>5.0} ║",
            report.name,
            report.runs,
            report.ticks_run,
            report.peak_infected,
            report.peak_tick,
            report.attack_rate * 100.0,
            report.completion_rate * 100.0,
        );
    }

    println!("╚═══════════════╩══════╩═══════════╩═══════════╩════════════╩══════════╩═══════╝\n");

    if let Some(fastest) = reports
        .iter()
        .filter(|r| r.completion_rate > 0.0)
        .min_by(|a, b| a.ticks_run.total_cmp(&b.ticks_run))
    {
        println!("Shortest Outbreak: {} ({:.1} ticks)", fastest.name, fastest.ticks_run);
    }

    if let Some(mildest) = reports
        .iter()
        .min_by(|a, b| a.attack_rate.total_cmp(&b.attack_rate))
    {
        println!("Lowest Attack Rate: {} ({:.1}%)", mildest.name, mildest.attack_rate * 100.0);
    }

    println!();
}
