//! Library side of the `kpi-forecast` binary: logging setup and the
//! file-to-file pipeline stages, shared with the integration tests.

pub mod logging;
pub mod pipeline;
pub mod types;
