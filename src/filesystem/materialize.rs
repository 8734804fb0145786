use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use compio::fs::symlink;
#[cfg(windows)]
use compio::fs::symlink_file as symlink;
use compio::fs::{self, OpenOptions};
use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::ext::PathExt;
use crate::filesystem::{TreeNode, pluralize};

/// Number of filesystem entries created by a [`Materializer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub directories: usize,
    pub files: usize,
    pub symlinks: usize,
}

impl fmt::Display for MaterializeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {} {}, {} {}",
            self.directories,
            pluralize(self.directories, "directory", "directories"),
            self.files,
            pluralize(self.files, "file", "files"),
            self.symlinks,
            pluralize(self.symlinks, "symlink", "symlinks"),
        )
    }
}

/// Creates the directories, empty files and symbolic links of a [`TreeNode`]
/// below a base path.
///
/// Each level is handled in a fixed order: directories first (recursing into
/// each one right after creating it), then files, then symbolic links. Every
/// operation is awaited before the next one starts. The first failure stops
/// the run; entries created before it are left in place.
pub struct Materializer {
    base: PathBuf,
    report: MaterializeReport,
}

impl Materializer {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            report: MaterializeReport::default(),
        }
    }

    pub async fn materialize(
        mut self,
        root: &TreeNode,
    ) -> Result<MaterializeReport, MaterializeError> {
        info!("Materializing tree into {}", self.base.display());
        let base = self.base.clone();
        self.materialize_node(root, &base).await?;
        info!("Created {}", self.report);
        Ok(self.report)
    }

    async fn materialize_node(
        &mut self,
        node: &TreeNode,
        base: &Path,
    ) -> Result<(), MaterializeError> {
        for (name, child) in &node.directories {
            let path = base.join_verbatim(name);
            create_directory(&path).await?;
            self.report.directories += 1;
            Box::pin(self.materialize_node(child, &path)).await?;
        }

        for name in &node.files {
            let path = base.join_verbatim(name);
            create_empty_file(&path).await?;
            self.report.files += 1;
        }

        for symlink in &node.symlinks {
            let link = base.join_verbatim(&symlink.target);
            let destination = base.join_verbatim(&symlink.source);
            create_symlink(&destination, &link).await?;
            self.report.symlinks += 1;
        }

        Ok(())
    }
}

/// Creating a directory that already exists is not an error.
async fn create_directory(path: &Path) -> Result<(), MaterializeError> {
    debug!("Creating directory {}", path.display());
    fs::create_dir_all(path).await.context(CreateDirectorySnafu {
        path: path.to_path_buf(),
    })
}

async fn create_empty_file(path: &Path) -> Result<(), MaterializeError> {
    debug!("Creating file {}", path.display());
    let opened = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await;
    match opened {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => AlreadyExistsSnafu {
            path: path.to_path_buf(),
        }
        .fail(),
        Err(err) => Err(err).context(CreateFileSnafu {
            path: path.to_path_buf(),
        }),
    }
}

async fn create_symlink(destination: &Path, link: &Path) -> Result<(), MaterializeError> {
    debug!(
        "Creating symlink {} -> {}",
        link.display(),
        destination.display()
    );
    match symlink(destination, link).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => AlreadyExistsSnafu {
            path: link.to_path_buf(),
        }
        .fail(),
        Err(err) => Err(err).context(CreateSymlinkSnafu {
            link: link.to_path_buf(),
            destination: destination.to_path_buf(),
        }),
    }
}

#[derive(Debug, Snafu)]
pub enum MaterializeError {
    #[snafu(display("Failed to create directory {}", path.display()))]
    CreateDirectoryError { path: PathBuf, source: io::Error },
    #[snafu(display("Failed to create file {}", path.display()))]
    CreateFileError { path: PathBuf, source: io::Error },
    #[snafu(display(
        "Failed to create symlink {} pointing at {}",
        link.display(),
        destination.display()
    ))]
    CreateSymlinkError {
        link: PathBuf,
        destination: PathBuf,
        source: io::Error,
    },
    #[snafu(display("{} already exists", path.display()))]
    AlreadyExistsError { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::Symlink;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn tree_with_link() -> TreeNode {
        let mut dir = TreeNode::new();
        dir.files.push("a.txt".into());
        dir.symlinks.push(Symlink::new("b", "a.txt"));
        let mut root = TreeNode::new();
        root.directories.insert("dir".into(), dir);
        root
    }

    #[cfg(unix)]
    #[compio::test]
    async fn creates_directories_files_and_symlinks() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();

        let report = Materializer::new(base)
            .materialize(&tree_with_link())
            .await
            .expect("Failed to materialize tree");

        assert_eq!(
            report,
            MaterializeReport {
                directories: 1,
                files: 1,
                symlinks: 1,
            }
        );
        assert!(base.join("dir").is_dir());
        let file = base.join("dir/a.txt");
        assert!(file.is_file());
        assert_eq!(std_fs::metadata(&file).expect("Failed to stat file").len(), 0);

        let link = base.join("dir/b");
        assert!(
            std_fs::symlink_metadata(&link)
                .expect("Failed to stat symlink")
                .file_type()
                .is_symlink()
        );
    }

    #[cfg(unix)]
    #[compio::test]
    async fn symlink_points_at_base_joined_source() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();

        Materializer::new(base)
            .materialize(&tree_with_link())
            .await
            .expect("Failed to materialize tree");

        let destination = std_fs::read_link(base.join("dir/b")).expect("Failed to read symlink");
        assert_eq!(destination, base.join_verbatim("dir").join_verbatim("a.txt"));
    }

    #[cfg(unix)]
    #[compio::test]
    async fn dangling_symlink_source_is_not_checked() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut root = TreeNode::new();
        root.symlinks.push(Symlink::new("ghost", "../nowhere/at all"));

        Materializer::new(temp_dir.path())
            .materialize(&root)
            .await
            .expect("Failed to materialize tree");

        let destination =
            std_fs::read_link(temp_dir.path().join("ghost")).expect("Failed to read symlink");
        assert_eq!(
            destination,
            temp_dir.path().join_verbatim("../nowhere/at all")
        );
    }

    #[compio::test]
    async fn creating_existing_directory_is_not_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut root = TreeNode::new();
        root.directories.insert("dir".into(), TreeNode::new());

        for _ in 0..2 {
            Materializer::new(temp_dir.path())
                .materialize(&root)
                .await
                .expect("Directory creation should be idempotent");
        }
    }

    #[cfg(unix)]
    #[compio::test]
    async fn existing_file_is_a_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let tree = tree_with_link();

        Materializer::new(temp_dir.path())
            .materialize(&tree)
            .await
            .expect("First run should succeed");
        let result = Materializer::new(temp_dir.path()).materialize(&tree).await;

        match result {
            Err(MaterializeError::AlreadyExistsError { path }) => {
                assert_eq!(path, temp_dir.path().join_verbatim("dir").join_verbatim("a.txt"));
            }
            other => panic!("Expected AlreadyExistsError, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[compio::test]
    async fn existing_symlink_path_is_a_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std_fs::write(temp_dir.path().join("link"), b"").expect("Failed to create file");

        let mut root = TreeNode::new();
        root.symlinks.push(Symlink::new("link", "elsewhere"));
        let result = Materializer::new(temp_dir.path()).materialize(&root).await;

        assert!(matches!(
            result,
            Err(MaterializeError::AlreadyExistsError { .. })
        ));
    }

    #[compio::test]
    async fn collision_stops_remaining_siblings() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std_fs::write(temp_dir.path().join("second"), b"").expect("Failed to create file");

        let mut root = TreeNode::new();
        root.files = vec!["first".into(), "second".into(), "third".into()];
        let result = Materializer::new(temp_dir.path()).materialize(&root).await;

        assert!(result.is_err());
        assert!(temp_dir.path().join("first").exists());
        assert!(!temp_dir.path().join("third").exists());
    }

    #[compio::test]
    async fn missing_base_fails_for_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut root = TreeNode::new();
        root.files.push("a.txt".into());

        let result = Materializer::new(temp_dir.path().join("missing"))
            .materialize(&root)
            .await;
        assert!(matches!(
            result,
            Err(MaterializeError::CreateFileError { .. })
        ));
    }

    #[test]
    fn error_display_names_the_path() {
        let error = MaterializeError::AlreadyExistsError {
            path: PathBuf::from("/tmp/out/a.txt"),
        };
        assert_eq!(error.to_string(), "/tmp/out/a.txt already exists");
    }

    #[test]
    fn report_display_uses_singular_for_one() {
        let report = MaterializeReport {
            directories: 1,
            files: 1,
            symlinks: 1,
        };
        assert_eq!(report.to_string(), "1 directory, 1 file, 1 symlink");
    }

    #[test]
    fn report_display_uses_plural_otherwise() {
        let report = MaterializeReport {
            directories: 0,
            files: 2,
            symlinks: 3,
        };
        assert_eq!(report.to_string(), "0 directories, 2 files, 3 symlinks");
    }
}
