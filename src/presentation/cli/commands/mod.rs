pub mod changelog;
pub mod commit;
pub mod prompt;
pub mod pull;
pub mod report;
pub mod status;
pub mod tag;

pub use changelog::ChangelogCommand;
pub use commit::CommitCommand;
pub use prompt::ConsolePrompt;
pub use pull::PullCommand;
pub use status::StatusCommand;
pub use tag::TagCommand;
