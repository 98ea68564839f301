//! Console report for a finished search.

use uav_swarm_core::outcome::SearchOutcome;

/// Render the three report lines: best position, target position, total sensor data.
///
/// Coordinates and fitness are printed with `precision` decimal places.
pub fn render_text(outcome: &SearchOutcome, precision: usize) -> String {
    format!(
        "Best position: {:.*}\nTarget position: {:.*}\nTotal sensor data: {:.*}\n",
        precision, outcome.best_position, precision, outcome.target, precision, outcome.best_fitness,
    )
}
