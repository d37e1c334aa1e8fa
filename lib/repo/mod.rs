mod id;
mod util;

pub use self::id::{RepoId, RepoIdParseError};
