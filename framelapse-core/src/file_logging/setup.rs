use anyhow::Result;
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::path::{Path, PathBuf};

/// Name of the run log written into the log directory for a given timestamp.
pub fn log_file_name(timestamp: &str) -> String {
    format!("framelapse_run_{}.log", timestamp)
}

/// Routes all `log` output to `log_dir/framelapse_run_<timestamp>.log`.
///
/// Returns the path of the log file. Fails if a global logger is already set.
pub fn setup_file_logging(
    log_dir: &Path,
    timestamp: &str,
    log_level: LevelFilter,
) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)?;
    let log_file = log_dir.join(log_file_name(timestamp));

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file)?;

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(Root::builder().appender("file").build(log_level))?;

    log4rs::init_config(config)?;

    Ok(log_file)
}
