//! Hello Search Example
//!
//! Ten UAVs search the unit square for a hidden target.

use uav_swarm::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("UAV Swarm Hello Search Example");
    println!("==============================");

    let config = SwarmConfig::builder()
        .population_size(10)
        .dimension(2)
        .n_iterations(100)
        .seed(26)
        .build()?;

    println!("Configuration:");
    println!("  UAVs: {}", config.population_size);
    println!("  Iterations: {}", config.n_iterations);

    let mut swarm = Swarm::new(config)?;
    let mut improvements = 0usize;
    let mut count = |report: &IterationReport| {
        if report.improved {
            improvements += 1;
        }
    };
    let outcome = swarm.run_with_observer(&mut count)?;

    println!("\nGlobal best improved in {improvements} iterations");
    print!("{}", render_text(&outcome, 4));

    Ok(())
}
