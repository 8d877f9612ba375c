use std::sync::Arc;
use std::{env, fs};

use lookup_core::config::{expand_path, Config};
use lookup_core::error::Error;
use lookup_core::types::InputEntry;
use lookup_index::{into_artifacts, run_lookups, ArtifactIndex, BatchConfig};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <index_dir> <input_file> <out_file>", args[0]);
        std::process::exit(1);
    }
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let index_dir = expand_path(&args[1]);
    let input_file = expand_path(&args[2]);
    let out_file = expand_path(&args[3]);
    println!(
        "Starting lookup for index {} and input file {} and out file {}",
        index_dir.display(), input_file.display(), out_file.display()
    );

    // Parse the whole batch before touching the index; a malformed input
    // must abort without creating or modifying the output file.
    let input_raw = fs::read_to_string(&input_file)
        .map_err(|e| Error::InputParse(format!("{}: {}", input_file.display(), e)))?;
    let entries: Vec<InputEntry> =
        serde_json::from_str(&input_raw).map_err(|e| Error::InputParse(e.to_string()))?;
    let ids: Vec<String> = entries.iter().map(|entry| entry.id.clone()).collect();
    let total = ids.len();

    let defaults = BatchConfig::default();
    let batch_config = BatchConfig {
        parallelism: config.get("batch.parallelism").unwrap_or(defaults.parallelism),
        log_interval: config.get("batch.log_interval").unwrap_or(defaults.log_interval),
        limit: defaults.limit,
    };

    let index = Arc::new(ArtifactIndex::open(&index_dir)?);
    let outcomes = tokio::runtime::Runtime::new()?
        .block_on(run_lookups(index, ids, &batch_config))?;
    let results = into_artifacts(outcomes);

    println!("Found {} results for {} artifacts", results.len(), total);
    fs::write(&out_file, serde_json::to_string(&results)?)?;
    println!("Results saved to {}", out_file.display());
    Ok(())
}
