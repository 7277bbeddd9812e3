use std::io;
use std::path::Path;

/// Source-control revision the running build was produced from
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildInfo {
    commit: Option<String>,
}

impl BuildInfo {
    pub fn new(commit: Option<String>) -> Self {
        Self {
            commit: commit.filter(|c| !c.trim().is_empty()),
        }
    }

    /// Reads a commit file: first line is the commit hash, second the branch.
    /// A missing file yields no revision.
    pub fn from_commit_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e),
        };

        let mut lines = text.lines().map(str::trim);
        let commit = match lines.next() {
            Some(sha) if !sha.is_empty() => {
                let branch = lines.next().unwrap_or("");
                Some(format!("commit:{}; branch:{}", sha, branch))
            }
            _ => None,
        };

        Ok(Self { commit })
    }

    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }
}
