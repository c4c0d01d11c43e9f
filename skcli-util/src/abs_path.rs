use std::env::current_dir;
use std::fmt;
use std::fs;
use std::io::{self, Seek as _, SeekFrom};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _};
use fs2::FileExt as _;
use serde::Serialize;
use tracing::debug;

use crate::Result;

/// An absolute (not necessarily canonicalized) path that may or may not exist.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbsPathBuf(PathBuf);

impl AbsPathBuf {
    /// Construct an absolute path.
    ///
    /// Returns error if `path` is not absolute.
    pub fn try_new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_absolute() {
            return Err(anyhow!("Path is not absolute : {}", path.display()));
        }
        let mut ret = Self(PathBuf::new());
        ret.push(path);
        Ok(ret)
    }

    /// Returns current directory as an absolute path.
    pub fn cwd() -> Result<Self> {
        Ok(Self(current_dir()?))
    }

    /// Joins path.
    pub fn join<P: AsRef<Path>>(&self, path: P) -> Self {
        Self(self.0.join(path))
    }

    fn push<P: AsRef<Path>>(&mut self, path: P) {
        self.0.push(path)
    }

    /// Returns parent path.
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(|parent| Self(parent.to_owned()))
    }

    /// Searches `file_name` in this directory and then in each ancestor,
    /// one level higher per step, at most `max_depth` levels up.
    ///
    /// Returns the path of the first existing file.
    pub fn search_upward(&self, file_name: &str, max_depth: usize) -> Option<Self> {
        self.0
            .ancestors()
            .take(max_depth + 1)
            .map(|dir| dir.join(file_name))
            .inspect(|file_path| debug!("Looking for {}", file_path.display()))
            .find(|file_path| file_path.is_file())
            .map(Self)
    }

    /// Truncates the file and writes it with `save` under an exclusive lock.
    ///
    /// Returns true if the file existed before.
    pub fn save(&self, save: impl FnOnce(&mut fs::File) -> Result<()>) -> Result<bool> {
        let is_existed = self.as_ref().is_file();
        let mut file = self
            .create_dir_all_and_open(false, true)
            .with_context(|| format!("Could not open file : {}", self))?;
        file.lock_exclusive()
            .with_context(|| format!("Could not lock file : {}", self))?;
        // truncate file before write
        file.seek(SeekFrom::Start(0))?;
        file.set_len(0)?;
        save(&mut file)?;
        Ok(is_existed)
    }

    /// Opens the file under a shared lock and reads it with `load`.
    pub fn load<T>(&self, load: impl FnOnce(&mut fs::File) -> Result<T>) -> Result<T> {
        let mut file = fs::OpenOptions::new()
            .read(true)
            .open(&self.0)
            .with_context(|| format!("Could not open file : {}", self))?;
        file.lock_shared()
            .with_context(|| format!("Could not lock file : {}", self))?;
        load(&mut file)
    }

    /// Creates an empty file, keeping the content if it already exists.
    pub fn touch(&self) -> io::Result<()> {
        self.create_dir_all_and_open(false, true).map(|_| ())
    }

    pub fn create_dir_all_and_open(&self, is_read: bool, is_write: bool) -> io::Result<fs::File> {
        if let Some(dir) = self.parent() {
            dir.create_dir_all()?
        }
        self.open(is_read, is_write)
    }

    pub fn create_dir_all(&self) -> io::Result<()> {
        fs::create_dir_all(self.as_ref())
    }

    fn open(&self, is_read: bool, is_write: bool) -> io::Result<fs::File> {
        fs::OpenOptions::new()
            .read(is_read)
            .write(is_write)
            .create(true)
            .open(&self.0)
    }
}

impl AsRef<PathBuf> for AbsPathBuf {
    fn as_ref(&self) -> &PathBuf {
        &self.0
    }
}

impl fmt::Display for AbsPathBuf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.display().fmt(f)
    }
}
