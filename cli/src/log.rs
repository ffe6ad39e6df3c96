use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

/// Level used when `RUST_LOG` is not set.
const LOG_LEVEL: LevelFilter = LevelFilter::WARN;

/// Installs a stderr subscriber filtered by `RUST_LOG`.
///
/// Standard output stays reserved for command output, which the completion
/// script captures.
pub fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LOG_LEVEL.into())
        .from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}
