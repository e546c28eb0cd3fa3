//! Log setup for GUI embeddings of this crate. Every line carries the
//! process session id from [`crate::run_id`], so one user session can be
//! followed across proposal submissions and room subscriptions.

use std::panic;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::run_id;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static INIT: OnceLock<()> = OnceLock::new();

/// Initialize logging for the embedding application: a `tracing`
/// subscriber (stdout, or `<CM_LOG_DIR>/<app>.log` with daily rotation
/// when `CM_LOG_DIR` is set, `RUST_LOG` filtering, `info` default) plus a
/// panic hook that routes panics into the same sink. Idempotent; later
/// calls are no-ops.
pub fn init(app_name: &'static str) {
    INIT.get_or_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

        if let Some(writer) = rotating_file_writer(app_name) {
            let _ = builder.with_writer(writer).try_init();
        } else {
            let _ = builder.try_init();
        }

        install_panic_hook(app_name);

        tracing::info!(
            application = app_name,
            session_id = run_id::get(),
            "logging initialized"
        );
    });
}

fn rotating_file_writer(app_name: &'static str) -> Option<BoxMakeWriter> {
    let dir = std::path::PathBuf::from(std::env::var_os("CM_LOG_DIR")?);
    if std::fs::create_dir_all(&dir).is_err() {
        // fall back to stdout; the subscriber is not up yet so there is
        // nowhere better to report this
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Some(BoxMakeWriter::new(non_blocking))
}

fn install_panic_hook(app_name: &'static str) {
    let default_hook = panic::take_hook();
    let include_backtrace = std::env::var("CM_LOG_INCLUDE_BACKTRACE")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));

        tracing::error!(
            application = app_name,
            session_id = run_id::get(),
            location = location.as_deref().unwrap_or("unknown"),
            panic_message = %panic_message(info.payload()),
            "panic captured"
        );

        if include_backtrace {
            default_hook(info);
        }
    }));
}

fn panic_message(payload: &dyn std::any::Any) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic payload not string".into())
}
