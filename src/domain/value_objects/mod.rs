/// Value objects parsed from version-control output.
pub mod branch;
pub mod change_set;
pub mod dirty_state;
pub mod remote;
pub mod tag_sequence;
pub mod version;

pub use change_set::ChangeSet;
pub use dirty_state::{DirtyState, FileStatus};
pub use remote::{RemoteInfo, RemoteSet};
pub use tag_sequence::{compare_tags, SortDirection, TagSequence};
pub use version::{suggest_next, Version, VersionBump};
