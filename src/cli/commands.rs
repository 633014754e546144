use std::time::Instant;

use serde_json::json;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::processors::Coordinator;
use crate::utils::progress::ProgressReporter;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Aggregate {
            input,
            max_workers,
            json,
            quiet,
        } => {
            let coordinator = Coordinator::new(max_workers);
            let progress =
                ProgressReporter::new_spinner("Aggregating measurements...", quiet);

            let started = Instant::now();
            let summary = coordinator.aggregate_path(&input, Some(&progress))?;
            let elapsed = started.elapsed();

            progress.finish_with_message(&format!(
                "Aggregated {} records from {}",
                summary.record_count(),
                input.display()
            ));

            if json {
                let map: serde_json::Map<String, serde_json::Value> = summary
                    .to_sorted_vec()
                    .into_iter()
                    .map(|(station, stats)| {
                        (
                            station.to_string(),
                            json!({
                                "min": stats.min,
                                "max": stats.max,
                                "mean": stats.mean(),
                                "sum": stats.sum,
                                "count": stats.count,
                            }),
                        )
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                println!("Workers: {}", coordinator.effective_workers());
                println!("Stations: {}", summary.len());
                println!("Records: {}", summary.record_count());
                println!("Time elapsed: {:.3?}", elapsed);
            }
        }

        Commands::Validate { input, max_workers } => {
            println!("Validating measurements file: {}", input.display());

            let coordinator = Coordinator::new(max_workers);
            let progress = ProgressReporter::new_spinner("Validating data...", false);

            let summary = coordinator.aggregate_path(&input, Some(&progress))?;

            progress.finish_with_message("Validation complete");
            println!(
                "✅ {} records across {} stations parsed cleanly",
                summary.record_count(),
                summary.len()
            );
        }
    }

    Ok(())
}
