use crate::config::Config;
use log::{LevelFilter, SetLoggerError};
use log4rs::{
    append::{
        console::ConsoleAppender,
        rolling_file::{
            policy::compound::{
                roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy,
            },
            RollingFileAppender,
        },
    },
    config::{runtime::ConfigErrors, Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    init_config,
};
use std::{io, path::Path};
use thiserror::Error;

/// The pattern to use when logging
const LOGGING_PATTERN: &str = "[{d} {h({l})} {M}] {m}{n}";
/// Size of the active log file before it is rolled over (5mb)
const LOGGING_MAX_SIZE: u64 = 1024 * 1024 * 5;
/// Number of rolled over log files kept in the logging directory
const LOGGING_MAX_FILES: u32 = 8;
/// The module logged at the configured level, everything else is
/// only logged from warnings up
const LOGGING_MODULE: &str = "leaderboard_view";

const STDOUT_APPENDER: &str = "stdout";
const FILE_APPENDER: &str = "file";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log roller: {0}")]
    Roller(String),
    #[error("Failed to open log file: {0}")]
    File(#[from] io::Error),
    #[error("Invalid logging config: {0}")]
    Config(#[from] ConfigErrors),
    #[error("Logger already initialized: {0}")]
    Init(#[from] SetLoggerError),
}

/// Installs the global logger for the provided config. Output always
/// goes to stdout, a rolling log file is only added when a logging
/// directory is configured. Does nothing when logging is turned off
pub fn setup(config: &Config) -> Result<(), LoggingError> {
    if config.logging == LevelFilter::Off {
        return Ok(());
    }

    let config = logging_config(config.logging, config.logging_dir.as_deref())?;
    init_config(config)?;

    // Route panics through the logger
    log_panics::init();
    Ok(())
}

/// Builds the log4rs config, the crate module is logged at `level`
/// and the file appender is only present when `logging_dir` is set
fn logging_config(
    level: LevelFilter,
    logging_dir: Option<&Path>,
) -> Result<log4rs::Config, LoggingError> {
    let pattern = Box::new(PatternEncoder::new(LOGGING_PATTERN));

    let stdout = ConsoleAppender::builder().encoder(pattern.clone()).build();
    let mut builder = log4rs::Config::builder()
        .appender(Appender::builder().build(STDOUT_APPENDER, Box::new(stdout)));
    let mut appenders = vec![STDOUT_APPENDER];

    if let Some(dir) = logging_dir {
        let roller = FixedWindowRoller::builder()
            .build(
                &dir.join("log-{}.log").to_string_lossy(),
                LOGGING_MAX_FILES,
            )
            .map_err(|err| LoggingError::Roller(err.to_string()))?;
        let policy = CompoundPolicy::new(
            Box::new(SizeTrigger::new(LOGGING_MAX_SIZE)),
            Box::new(roller),
        );
        let file = RollingFileAppender::builder()
            .encoder(pattern)
            .build(dir.join("log.log"), Box::new(policy))?;

        builder = builder.appender(Appender::builder().build(FILE_APPENDER, Box::new(file)));
        appenders.push(FILE_APPENDER);
    }

    let config = builder
        .logger(
            Logger::builder()
                .appenders(appenders.iter().copied())
                .additive(false)
                .build(LOGGING_MODULE, level),
        )
        .build(
            Root::builder()
                .appenders(appenders.iter().copied())
                .build(LevelFilter::Warn),
        )?;
    Ok(config)
}
