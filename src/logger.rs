use anyhow::Result;
use anyhow::anyhow;
use ftail::Ftail;
use log::LevelFilter;
use log::info;
use std::fs;
use std::path::Path;

const LOGS_DIR: &str = "logs";
const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Warnings go to the console, the full info-level history goes to
/// `logs/gregory.log` in the working directory.
pub fn init_logger() -> Result<()> {
    let logs_path = Path::new(LOGS_DIR);
    let logs_file = logs_path.join(format!("{}.log", PKG_NAME));

    // Idempotent, so it's chill to run every time
    match fs::create_dir_all(logs_path) {
        Ok(_) => (),
        Err(e) => {
            return Err(anyhow!(
                "Could not create logs dir at {:#?}: {}",
                &logs_path,
                e
            ));
        }
    }

    match Ftail::new()
        .console(LevelFilter::Warn)
        .single_file(&logs_file, true, LevelFilter::Info)
        .init()
    {
        Ok(_) => {
            info!("Logger initialized.");
            Ok(())
        }
        Err(e) => Err(anyhow!("Could not initialize logger: {}", e)),
    }
}
