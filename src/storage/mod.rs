pub mod xlsx;

pub use xlsx::{SnapshotStore, XlsxStorage};
