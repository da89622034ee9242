//! Logging setup for the soundboard binary

/// Initialize the logger with `default_level`.
/// Uses a format that works correctly in raw terminal mode.
/// The RUST_LOG environment variable can override the default level.
pub fn init_logger(default_level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "\r[{} {:5} {}] {}",
                buf.timestamp(),
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        })
        .init();
}
