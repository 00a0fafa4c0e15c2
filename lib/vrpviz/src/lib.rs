use std::path::Path;

pub mod canvas;
pub mod nodes;
pub mod routes;
pub mod summary;

pub use canvas::{Canvas, Figure, Point};
pub use nodes::{Coords, plot_nodes, draw_nodes};
pub use routes::{plot_routes, plot_route, draw_routes};
pub use summary::{summarize, SolutionSummary, RouteSummary};


mod logging_setup {
    use super::*;
    use anyhow::{Context, Result};
    use tracing_subscriber::{EnvFilter, fmt, registry, prelude::*};
    use tracing_appender::{non_blocking, non_blocking::WorkerGuard};
    use std::fs::OpenOptions;

    fn build_and_set_global_subscriber<P>(logfile: Option<P>, is_test : bool) -> Result<Option<WorkerGuard>> where
        P : AsRef<Path>
    {
        // stdout may carry the JSON summary
        let stderr_log = fmt::layer().with_writer(std::io::stderr);
        let env_filter = EnvFilter::from_default_env();
        let r = registry().with(stderr_log).with(env_filter);

        let flush_guard = match logfile {
            Some(p) => {
                let p = p.as_ref();
                let logfile = OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(p)
                    .with_context(|| format!("failed to open log file {:?}", p))?;
                let (writer, _guard) = non_blocking::NonBlockingBuilder::default()
                    .lossy(false)
                    .finish(logfile);
                let json = fmt::layer()
                    .json()
                    .with_span_list(true)
                    .with_current_span(false)
                    .with_writer(writer);

                let r = r.with(json);
                if is_test { r.try_init().ok(); }
                else { r.init(); }
                Some(_guard)
            },
            None => {
                if is_test { r.try_init().ok(); }
                else { r.init(); }
                None
            }
        };
        Ok(flush_guard)
    }

    /// Installs the global subscriber: human-readable events on stderr, filtered by `RUST_LOG`,
    /// and every event as JSON in `logfile` if one is given. Keep the guard alive until exit.
    pub fn init_logging(logfile: Option<impl AsRef<Path>>) -> Result<Option<WorkerGuard>> {
        build_and_set_global_subscriber(logfile, false)
    }

    #[allow(dead_code)]
    pub(crate) fn init_test_logging(logfile: Option<impl AsRef<Path>>) -> Option<WorkerGuard> {
        build_and_set_global_subscriber(logfile, true).ok().flatten()
    }
}
pub use logging_setup::*;
