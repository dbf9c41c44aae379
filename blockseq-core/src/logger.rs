//! Tracing subscriber setup for applications and tests.
//!
//! The container crates only emit `tracing` events: reallocations at `trace`
//! level under the `blockseq::sequence` target, configuration loads at
//! `debug`. Nothing is printed unless a subscriber is installed.
//!
//! [`subscriber`] builds a filtered plain-text subscriber over any writer,
//! suitable for [`tracing::subscriber::with_default`]. [`init_logging`]
//! installs one globally on stderr and bridges `log` records into it.
//!
//! ```ignore
//! use blockseq_core::logger::init_logging;
//!
//! // RUST_LOG=blockseq=trace shows every reallocation
//! init_logging("my_app");
//! ```

use std::sync::OnceLock;

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, fmt::MakeWriter, layer::SubscriberExt};

/// Filter used by [`init_logging`] when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "info";

static GLOBAL_INSTALLED: OnceLock<bool> = OnceLock::new();

/// Subscriber writing one plain-text line per enabled event to `writer`.
///
/// `directives` uses the `RUST_LOG` syntax, e.g. `"warn,blockseq=trace"`.
/// Malformed directives are skipped.
pub fn subscriber<W>(directives: &str, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let events = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(EnvFilter::new(directives))
        .with(events)
}

/// Install a stderr subscriber as the global default.
///
/// The filter comes from `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVES`].
/// Records sent through the `log` crate are forwarded to it. On success an
/// `info` event carrying `name` marks the start of the program's output.
///
/// Returns `true` only for the call that installed the subscriber. Later
/// calls, and calls made after another global subscriber was set, return
/// `false` and change nothing.
pub fn init_logging(name: &str) -> bool {
    let mut installed_now = false;
    GLOBAL_INSTALLED.get_or_init(|| {
        let directives = std::env::var(EnvFilter::DEFAULT_ENV)
            .unwrap_or_else(|_| DEFAULT_DIRECTIVES.to_string());
        installed_now =
            tracing::subscriber::set_global_default(subscriber(&directives, std::io::stderr))
                .is_ok();
        if installed_now {
            // another logger may own the `log` facade already
            tracing_log::LogTracer::init().ok();
            tracing::info!(app = name, "logging initialized");
        }
        installed_now
    });
    installed_now
}
