//! Application provides a plain-value façade of the lending [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod config;
pub mod error;
mod input;
pub mod system;

use std::io;

use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::{SubscriberInitExt as _, TryInitError},
};

pub use self::{
    config::Config,
    error::{AsError, Error},
    system::System,
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<service::infra::Memory>;

/// Levels of the events written to `stderr` rather than `stdout`.
const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

/// Installs the global logger writing events up to the configured level.
///
/// # Errors
///
/// If the global logger has been installed already.
pub fn init_logging(conf: config::Log) -> Result<(), TryInitError> {
    let level = log::Level::from(conf.level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(move |meta| {
                    meta.is_span()
                        || !STDERR_LEVELS.contains(meta.level())
                            && level >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(move |meta| {
                    meta.is_span()
                        || STDERR_LEVELS.contains(meta.level())
                            && level >= *meta.level()
                })),
        )
        .try_init()
}
