use anyhow::Result;
use clap::Parser;

use contagion::{SeedSpec, Simulation, World};

#[derive(Debug, Parser)]
#[command(author, version, about = "Epidemic simulation over a toroidal grid of regions")]
struct Cli {
    /// Grid rows
    #[arg(long, default_value_t = 6)]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = 8)]
    cols: usize,

    /// Total population to seed
    #[arg(long, default_value_t = 1000)]
    population: usize,

    /// Percentage seeded infected
    #[arg(long, default_value_t = 10.0)]
    pct_infected: f64,

    /// Percentage seeded super-healthy (immune)
    #[arg(long, default_value_t = 5.0)]
    pct_super: f64,

    /// Percentage given the doctor role
    #[arg(long, default_value_t = 2.0)]
    pct_doctor: f64,

    /// Number of days to simulate
    #[arg(long, default_value_t = 30)]
    days: u64,

    /// RNG seed; the same seed reproduces the same run
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Emit one JSON day report per line instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let world = World::new(cli.rows, cli.cols)?;
    let mut sim = Simulation::new(world, cli.seed);
    sim.seed_population(&SeedSpec {
        count: cli.population,
        pct_infected: cli.pct_infected,
        pct_super: cli.pct_super,
        pct_doctor: cli.pct_doctor,
    })?;

    for _ in 0..cli.days {
        let report = sim.advance_day();
        if cli.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("== DAY {} ==", report.day);
            for region in sim.world().regions() {
                println!("{region}");
            }
            println!();
        }
    }

    if !cli.json {
        let infected: usize = sim.country_stats().iter().map(|s| s.infected).sum();
        println!(
            "Simulated {} days over a {}x{} grid; {} of {} still infected.",
            sim.days_passed(),
            cli.rows,
            cli.cols,
            infected,
            cli.population
        );
    }
    Ok(())
}
