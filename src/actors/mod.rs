pub mod explorer;

pub use explorer::{ExplorerHandle, ProfileExplorer, ProfileExplorerMessage};
