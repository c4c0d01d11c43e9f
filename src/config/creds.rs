use std::io::{Read as _, Write as _};

use anyhow::Context as _;
use getset::Getters;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::abs_path::AbsPathBuf;
use crate::console::Console;
use crate::Result;

/// Username, password and root link of the contest, any of which may be missing.
#[derive(Serialize, Deserialize, Getters, Default, Debug, Clone, PartialEq, Eq, Hash)]
#[get = "pub"]
pub struct Credentials {
    username: Option<String>,
    password: Option<String>,
    link: Option<String>,
}

impl Credentials {
    pub fn new(username: Option<String>, password: Option<String>, link: Option<String>) -> Self {
        Self {
            username,
            password,
            link,
        }
    }

    /// Parses the content of a credentials file.
    ///
    /// Returns `None` for empty or malformed content.
    pub fn parse(content: &[u8]) -> Option<Self> {
        serde_json::from_slice(content).ok()
    }

    #[cfg(test)]
    pub fn test_default() -> Self {
        Self::new(
            Some("alice".into()),
            Some("secret".into()),
            Some("https://judge.test/c/contest/".into()),
        )
    }
}

/// Locates, reads and writes the credentials file.
///
/// The file is searched in `base_dir` and its ancestors. If it is not found,
/// an empty one is created in `base_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialStore {
    file_name: String,
    base_dir: AbsPathBuf,
    max_depth: usize,
}

impl CredentialStore {
    pub const DEFAULT_FILE_NAME: &'static str = "creds.save";

    pub const DEFAULT_MAX_DEPTH: usize = 4;

    pub fn new(file_name: impl Into<String>, base_dir: AbsPathBuf) -> Self {
        Self {
            file_name: file_name.into(),
            base_dir,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Returns the path of the credentials file, creating an empty file if none is found.
    pub fn resolve_path(&self, cnsl: &mut Console) -> Result<AbsPathBuf> {
        if let Some(path) = self.base_dir.search_upward(&self.file_name, self.max_depth) {
            debug!("Found credentials file: {}", path);
            return Ok(path);
        }
        let path = self.base_dir.join(&self.file_name);
        path.touch()
            .with_context(|| format!("Could not create credentials file : {}", path))?;
        cnsl.warn(&format!(
            "Could not find {} in {} or its parent directories. Created an empty one.",
            self.file_name, self.base_dir
        ))?;
        debug!("Created credentials file: {}", path);
        Ok(path)
    }

    pub fn load(&self, cnsl: &mut Console) -> Result<Credentials> {
        let path = self.resolve_path(cnsl)?;
        let content = path.load(|file| {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)?;
            Ok(buf)
        })?;
        Ok(Credentials::parse(&content).unwrap_or_else(|| {
            debug!("Could not parse credentials file, treating it as empty");
            Credentials::default()
        }))
    }

    pub fn save(&self, creds: &Credentials, cnsl: &mut Console) -> Result<()> {
        let path = self.resolve_path(cnsl)?;
        path.save(|file| {
            serde_json::to_writer(&mut *file, creds)
                .context("Could not write credentials as json")?;
            file.flush()?;
            Ok(())
        })
        .with_context(|| format!("Could not save credentials file : {}", path))?;
        debug!("Saved credentials to {}", path);
        Ok(())
    }
}
