pub mod repository_enumerator;

pub use repository_enumerator::{Candidates, RepositoryCandidate, RepositoryEnumerator};
