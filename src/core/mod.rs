pub mod exporter;
pub mod snapshot;
pub mod stats;

pub use exporter::SnapshotExporter;
pub use snapshot::{build_records, build_snapshot};
pub use stats::{compute_status_stats, StatusColumn};
