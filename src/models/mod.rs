pub mod entry;
pub mod interaction;
pub mod report;

pub use entry::{EntryKind, TimingEntry};
pub use interaction::Interaction;
pub use report::{MetricReport, NavigationKind, Rating, METRIC_NAME};
