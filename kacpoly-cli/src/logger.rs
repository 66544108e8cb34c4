use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Stderr logger; records carry their source location like
/// `DEBUG - H for dimension [2] = ... - kacpoly-core/src/logexp.rs:67`.
struct CliLogger {
    level: LevelFilter,
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if record.level() <= Level::Info {
            eprintln!("{} - {}", record.level(), record.args());
        } else {
            eprintln!(
                "{} - {} - {}:{}",
                record.level(),
                record.args(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0)
            );
        }
    }

    fn flush(&self) {}
}

/// `KACPOLY_LOG` (error|warn|info|debug|trace) wins over the `-v` count.
pub fn init(verbosity: u8) -> Result<(), SetLoggerError> {
    let from_env = std::env::var("KACPOLY_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok());
    let level = from_env.unwrap_or(match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    });
    log::set_boxed_logger(Box::new(CliLogger { level }))?;
    log::set_max_level(level);
    Ok(())
}
