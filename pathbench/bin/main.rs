use std::path::PathBuf;

use pathbench::{bench, config::BenchConfig};

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // an optional JSON config file is the only argument
    let config = match std::env::args_os().nth(1) {
        Some(path) => BenchConfig::load(&PathBuf::from(path))?,
        None => BenchConfig::default(),
    };

    let reports = bench::run(&config)?;

    for report in &reports {
        println!("{}", report);
    }

    Ok(())
}
