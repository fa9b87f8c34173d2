// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialized disk access.
//!
//! Every read and write goes through one mutex, so at most one disk
//! operation runs at a time in the process.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use masala_core::sync::lock;
use masala_core::{MasalaError, MasalaObject, Result};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

const TRACE_TARGET: &str = "masala::disk_manager";

pub struct DiskManager {
    disk_io: Mutex<()>,
}

impl DiskManager {
    fn new() -> Self {
        Self {
            disk_io: Mutex::new(()),
        }
    }

    /// The process-wide instance, created on first use.
    pub fn get_instance() -> &'static DiskManager {
        static INSTANCE: OnceLock<DiskManager> = OnceLock::new();
        INSTANCE.get_or_init(DiskManager::new)
    }

    /// Write `contents` to `path`, replacing any existing file.
    pub fn write_ascii_file(&self, path: impl AsRef<Path>, contents: &str) -> Result<()> {
        let path = path.as_ref();
        {
            let _io = lock(&self.disk_io);
            std::fs::write(path, contents).map_err(|e| {
                self.io_error("write_ascii_file", format!("Could not write \"{}\".", path.display()), e)
            })?;
        }
        debug!(target: TRACE_TARGET, path = %path.display(), "wrote file");
        Ok(())
    }

    /// The lines of `path`, without line terminators.
    pub fn read_ascii_file_to_string_vector(&self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let contents = self.read("read_ascii_file_to_string_vector", path.as_ref())?;
        Ok(contents.lines().map(str::to_string).collect())
    }

    /// The whole of `path` as one string.
    pub fn read_ascii_file_to_string(&self, path: impl AsRef<Path>) -> Result<String> {
        self.read("read_ascii_file_to_string", path.as_ref())
    }

    pub fn read_json_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let contents = self.read("read_json_file", path)?;
        serde_json::from_str(&contents).map_err(|e| {
            MasalaError::resource(
                self.class_namespace_and_name(),
                "read_json_file",
                format!("Could not parse \"{}\" as JSON: {e}", path.display()),
                Some(Box::new(e)),
            )
        })
    }

    /// `path` made absolute against the current directory. The path need
    /// not exist.
    pub fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        std::path::absolute(path).map_err(|e| {
            self.io_error(
                "absolute_path",
                format!("Could not make \"{}\" absolute.", path.display()),
                e,
            )
        })
    }

    /// Directories directly inside `root`, sorted.
    pub fn subdirectories(&self, root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        self.entries("subdirectories", root.as_ref(), |path| path.is_dir())
    }

    /// Regular files directly inside `directory`, sorted.
    pub fn files(&self, directory: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        self.entries("files", directory.as_ref(), |path| path.is_file())
    }

    /// Regular files directly inside `directory` whose file name matches
    /// `pattern`, sorted. Anchor the pattern with `^...$` to match whole
    /// names.
    pub fn files_matching(
        &self,
        directory: impl AsRef<Path>,
        pattern: &Regex,
    ) -> Result<Vec<PathBuf>> {
        self.entries("files_matching", directory.as_ref(), |path| {
            path.is_file()
                && path
                    .file_name()
                    .is_some_and(|name| pattern.is_match(&name.to_string_lossy()))
        })
    }

    /// The final component of a path, e.g. `"b.txt"` for `"a/b.txt"`.
    /// Empty if the path ends in a separator or is empty.
    pub fn filename_from_path_and_filename(path_and_filename: &str) -> String {
        if path_and_filename.ends_with('/') {
            return String::new();
        }
        Path::new(path_and_filename)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn read(&self, function: &str, path: &Path) -> Result<String> {
        let contents = {
            let _io = lock(&self.disk_io);
            std::fs::read_to_string(path).map_err(|e| {
                self.io_error(function, format!("Could not open \"{}\" for read.", path.display()), e)
            })?
        };
        debug!(target: TRACE_TARGET, path = %path.display(), "read file");
        Ok(contents)
    }

    fn entries(
        &self,
        function: &str,
        directory: &Path,
        keep: impl Fn(&Path) -> bool,
    ) -> Result<Vec<PathBuf>> {
        let _io = lock(&self.disk_io);
        let listing = std::fs::read_dir(directory).map_err(|e| {
            self.io_error(function, format!("Could not list \"{}\".", directory.display()), e)
        })?;
        let mut paths = Vec::new();
        for entry in listing {
            let path = entry
                .map_err(|e| {
                    self.io_error(function, format!("Could not list \"{}\".", directory.display()), e)
                })?
                .path();
            if keep(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn io_error(&self, function: &str, message: String, source: std::io::Error) -> MasalaError {
        MasalaError::resource(
            self.class_namespace_and_name(),
            function,
            message,
            Some(Box::new(source)),
        )
    }
}

impl MasalaObject for DiskManager {
    fn class_name(&self) -> String {
        "MasalaDiskManager".into()
    }

    fn class_namespace(&self) -> String {
        "masala::base::managers::disk".into()
    }
}

impl std::fmt::Debug for DiskManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskManager").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_last_component() {
        assert_eq!(DiskManager::filename_from_path_and_filename("a/b/c.pdb"), "c.pdb");
        assert_eq!(DiskManager::filename_from_path_and_filename("c.pdb"), "c.pdb");
        assert_eq!(DiskManager::filename_from_path_and_filename("a/b/"), "");
        assert_eq!(DiskManager::filename_from_path_and_filename(""), "");
    }

    #[test]
    fn missing_file_is_a_resource_error() {
        let err = DiskManager::get_instance()
            .read_ascii_file_to_string("/nonexistent/masala/file.txt")
            .unwrap_err();
        assert_eq!(err.kind(), masala_core::ErrorKind::Resource);
        assert!(err.message().contains("for read"));
    }
}
