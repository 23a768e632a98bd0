//! Opt-in JSON trace output for hosts embedding the C ABI.
//!
//! The engine's `debug_span!`/`debug!` calls are compiled out unless the
//! `trace` feature is on. With it, `singlish_trace_init` points them at a
//! `singlish-trace.jsonl` file so a keystroke-by-keystroke session can be
//! replayed offline.

#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Install a JSON-lines subscriber writing to `log_dir`. Later calls are
/// ignored.
///
/// The appender's worker guard flushes and stops the writer thread when
/// dropped. A host keeps this library loaded until the process exits and
/// has no teardown call, so the guard is leaked to keep the writer alive
/// for every later conversion.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) {
    INIT.call_once(|| {
        let appender = tracing_appender::rolling::never(log_dir, "singlish-trace.jsonl");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        std::mem::forget(guard);

        let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new("singlish_core=debug,singlish_engine=debug")
        });
        tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(filter)
            .init();
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) {}

/// Whether tracing support was compiled in.
pub const fn enabled() -> bool {
    cfg!(feature = "trace")
}
