//! Gitignore-aware expansion of path arguments into document files.
//! - Plain file arguments are kept as given, even if ignored
//! - Directory arguments are walked respecting .gitignore and extra globs
//! - Optional include globs narrow the walked set (e.g. "*.md")
//! - Deterministic ordering for stable output
//!
//! Backed by ripgrep's `ignore` crate and `globset`.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, warn};

/// Expands files and directories into a sorted, de-duplicated file list.
pub struct DocumentWalker
{
    /// Extra ignore globs applied to walked entries
    ignore_patterns: GlobSet,

    /// When set, walked files must match one of these
    include_patterns: Option<GlobSet>,

    /// Include hidden (dot) files; default false
    include_hidden: bool,

    /// Maximum recursion depth; default None (unbounded)
    max_depth: Option<usize>,
}

fn build_globs(patterns: &[String]) -> Result<GlobSet>
{
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns
    {
        // "target/" style entries mean the directory itself
        let p = pattern.trim_end_matches('/');
        builder.add(Glob::new(p)?);
        builder.add(Glob::new(&format!("**/{p}"))?);
    }
    Ok(builder.build()?)
}

impl DocumentWalker
{
    pub fn new(additional_ignores: &[String]) -> Result<Self>
    {
        Ok(Self {
            ignore_patterns: build_globs(additional_ignores)?,
            include_patterns: None,
            include_hidden: false,
            max_depth: None,
        })
    }

    /// Only keep walked files whose path matches one of `patterns`.
    pub fn with_includes(
        mut self,
        patterns: &[String],
    ) -> Result<Self>
    {
        if !patterns.is_empty()
        {
            self.include_patterns = Some(build_globs(patterns)?);
        }
        Ok(self)
    }

    pub fn with_include_hidden(
        mut self,
        include_hidden: bool,
    ) -> Self
    {
        self.include_hidden = include_hidden;
        self
    }

    pub fn with_max_depth(
        mut self,
        depth: Option<usize>,
    ) -> Self
    {
        self.max_depth = depth;
        self
    }

    fn build_walk(
        &self,
        root: &Path,
    ) -> WalkBuilder
    {
        let mut b = WalkBuilder::new(root);

        // WalkBuilder::hidden(true) skips dotfiles
        b.hidden(!self.include_hidden);
        b.git_ignore(true);
        b.git_global(true);
        b.git_exclude(true);
        b.max_depth(self.max_depth);

        // Prune ignored directories early
        let extra = self
            .ignore_patterns
            .clone();
        b.filter_entry(move |ent: &DirEntry| {
            let is_dir = ent
                .file_type()
                .map(|ft| ft.is_dir())
                .unwrap_or(false);
            !(is_dir && extra.is_match(ent.path()))
        });

        b
    }

    /// Files under `root`, sorted.
    pub fn walk_dir(
        &self,
        root: &Path,
    ) -> Vec<PathBuf>
    {
        let mut out: Vec<PathBuf> = self
            .build_walk(root)
            .build()
            .filter_map(|res| match res
            {
                Ok(entry) => Some(entry),
                Err(e) =>
                {
                    warn!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| {
                entry
                    .file_type()
                    .is_some_and(|ft| ft.is_file())
            })
            .map(|entry| entry.into_path())
            .filter(|abs| {
                let rel = abs
                    .strip_prefix(root)
                    .unwrap_or(abs);
                !self
                    .ignore_patterns
                    .is_match(rel)
                    && self
                        .include_patterns
                        .as_ref()
                        .is_none_or(|inc| inc.is_match(rel))
            })
            .collect();

        out.sort();
        out
    }

    /// Expand every argument; files pass through, directories are walked.
    pub fn expand(
        &self,
        paths: &[PathBuf],
    ) -> Result<Vec<PathBuf>>
    {
        let mut out = Vec::new();
        for p in paths
        {
            if p.is_dir()
            {
                let found = self.walk_dir(p);
                debug!(dir = %p.display(), files = found.len(), "expanded directory");
                out.extend(found);
            }
            else if p.is_file()
            {
                out.push(p.clone());
            }
            else
            {
                bail!("No such file or directory: {}", p.display());
            }
        }

        // Keep first occurrence order stable while dropping repeats
        let mut seen = std::collections::HashSet::new();
        out.retain(|p| seen.insert(p.clone()));
        Ok(out)
    }
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    /// Create a file with parent dirs as needed
    fn write_file(
        root: &Path,
        rel: &str,
        contents: &str,
    ) -> Result<()>
    {
        let path = root.join(rel);
        if let Some(parent) = path.parent()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    fn relative(
        root: &Path,
        files: Vec<PathBuf>,
    ) -> Vec<PathBuf>
    {
        files
            .into_iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_path_buf()
            })
            .collect()
    }

    #[test]
    fn walks_sorted_and_skips_hidden() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        write_file(root, "b.txt", "b")?;
        write_file(root, "a/c.txt", "c")?;
        write_file(root, ".secret", "s")?;

        let files = relative(root, DocumentWalker::new(&[])?.walk_dir(root));
        assert_eq!(files, vec![PathBuf::from("a/c.txt"), PathBuf::from("b.txt")]);

        let files = relative(
            root,
            DocumentWalker::new(&[])?
                .with_include_hidden(true)
                .walk_dir(root),
        );
        assert!(files.contains(&PathBuf::from(".secret")));
        Ok(())
    }

    #[test]
    fn extra_ignores_prune_directories() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        write_file(root, "target/out.txt", "x")?;
        write_file(root, "docs/keep.md", "k")?;

        let walker = DocumentWalker::new(&["target/".to_string()])?;
        assert_eq!(relative(root, walker.walk_dir(root)), vec![PathBuf::from("docs/keep.md")]);
        Ok(())
    }

    #[test]
    fn includes_narrow_the_walk() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        write_file(root, "one.md", "1")?;
        write_file(root, "two.txt", "2")?;
        write_file(root, "deep/three.md", "3")?;

        let walker = DocumentWalker::new(&[])?.with_includes(&["*.md".to_string()])?;
        assert_eq!(
            relative(root, walker.walk_dir(root)),
            vec![PathBuf::from("deep/three.md"), PathBuf::from("one.md")]
        );
        Ok(())
    }

    #[test]
    fn expand_keeps_files_and_rejects_missing() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        write_file(root, "dir/x.txt", "x")?;
        write_file(root, "y.txt", "y")?;

        let walker = DocumentWalker::new(&[])?;
        let files = walker.expand(&[root.join("y.txt"), root.join("dir"), root.join("y.txt")])?;
        assert_eq!(files, vec![root.join("y.txt"), root.join("dir/x.txt")]);

        assert!(
            walker
                .expand(&[root.join("nope")])
                .is_err()
        );
        Ok(())
    }

    #[test]
    fn max_depth_limits_recursion() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        write_file(root, "a.txt", "a")?;
        write_file(root, "sub/b.txt", "b")?;

        let walker = DocumentWalker::new(&[])?.with_max_depth(Some(1));
        assert_eq!(relative(root, walker.walk_dir(root)), vec![PathBuf::from("a.txt")]);
        Ok(())
    }
}
