use log::LevelFilter;
use std::io::Write;
use std::sync::Once;

/// Install the process-wide logger. Output goes to stderr so `--json`
/// stdout stays machine-readable. `RUST_LOG` overrides the CLI level.
pub fn init_logging(level: LevelFilter) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{}] {} {} - {}",
                    buf.timestamp_millis(),
                    record.level(),
                    record.target(),
                    record.args()
                )
            })
            .init();
    });
}

pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
