//! Domain logic - pure bump decisions independent of git, npm and the network

pub mod branch;
pub mod bump;
pub mod commit;
pub mod policy;
pub mod version;

pub use branch::BranchContext;
pub use bump::{classify, BumpType, Keywords, VersionAction};
pub use commit::{Commit, Person};
pub use policy::{bump_message_pattern, has_previous_bump, render_message, BumpPolicy};
