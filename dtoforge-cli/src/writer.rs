//! Writing generated sources to disk

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dtoforge::{ProjectMeta, RenderedSources};
use tracing::debug;

/// A file written by [`OutputWriter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Class the file holds
    pub class: String,
    /// Full path of the file
    pub path: PathBuf,
}

/// Writes one file per rendered class into an output directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    /// Writer targeting `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths the sources would be written to, without touching the disk
    #[must_use]
    pub fn plan(&self, sources: &RenderedSources, meta: &ProjectMeta) -> Vec<WrittenFile> {
        sources
            .keys()
            .map(|class| WrittenFile {
                class: class.clone(),
                path: self.dir.join(meta.file_name(class)),
            })
            .collect()
    }

    /// Write every source, creating the output directory if needed
    ///
    /// `on_written` is called after each file, in class-name order.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a file cannot
    /// be written.
    pub fn write<F>(
        &self,
        sources: &RenderedSources,
        meta: &ProjectMeta,
        mut on_written: F,
    ) -> Result<Vec<WrittenFile>>
    where
        F: FnMut(&WrittenFile),
    {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let files = self.plan(sources, meta);
        for file in &files {
            let content = &sources[&file.class];
            fs::write(&file.path, content)
                .with_context(|| format!("Failed to write file: {}", file.path.display()))?;
            debug!(class = %file.class, path = %file.path.display(), "Wrote source");
            on_written(file);
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sources() -> RenderedSources {
        let mut sources = RenderedSources::new();
        sources.insert("Person".to_string(), "class Person {}".to_string());
        sources.insert("Address".to_string(), "class Address {}".to_string());
        sources
    }

    #[test]
    fn test_plan_uses_extension() {
        let writer = OutputWriter::new("out");
        let meta = ProjectMeta {
            extension: "kt".to_string(),
            ..ProjectMeta::default()
        };

        let plan = writer.plan(&sources(), &meta);
        assert_eq!(plan[0].class, "Address");
        assert_eq!(plan[0].path, PathBuf::from("out/Address.kt"));
        assert_eq!(plan[1].path, PathBuf::from("out/Person.kt"));
    }

    #[test]
    fn test_write_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested").join("dto");
        let writer = OutputWriter::new(&dir);

        let mut seen = Vec::new();
        let files = writer
            .write(&sources(), &ProjectMeta::default(), |f| seen.push(f.class.clone()))
            .unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(seen, vec!["Address", "Person"]);
        assert_eq!(
            fs::read_to_string(dir.join("Person.java")).unwrap(),
            "class Person {}"
        );
    }
}
