use anyhow::{bail, Context, Result};
use std::path::{Component, Path, PathBuf};

/// Path resolver and size gate for images handed to the platform provider.
///
/// With a root configured, every image path must resolve inside it; `..`
/// and symlinks that escape the root are rejected.
pub struct ImageGuard {
    root: Option<PathBuf>,
    max_file_size: u64,
}

impl ImageGuard {
    /// Guard with no root confinement.
    /// Limits too large to express in bytes saturate to `u64::MAX`.
    pub fn new(max_image_size_mb: u64) -> Self {
        Self {
            root: None,
            max_file_size: max_image_size_mb.saturating_mul(1024 * 1024),
        }
    }

    /// Confine image paths to `root`.
    pub fn with_root(mut self, root: PathBuf) -> Result<Self> {
        let root = root
            .canonicalize()
            .context(format!("Image root not found: {:?}", root))?;
        self.root = Some(root);
        Ok(self)
    }

    /// Resolve a caller-provided image path.
    pub fn resolve(&self, input_path: &str) -> Result<PathBuf> {
        let Some(root) = &self.root else {
            return Ok(PathBuf::from(input_path));
        };

        let joined = root.join(input_path);

        // Existing paths: canonicalize to resolve symlinks
        let resolved = if joined.exists() {
            joined.canonicalize()?
        } else {
            normalize_path(&joined)
        };

        if !resolved.starts_with(root) {
            bail!(
                "Path {:?} is outside the image root {:?}",
                input_path,
                root
            );
        }
        Ok(resolved)
    }

    /// Check file size against limit
    pub async fn check_size(&self, path: &Path) -> Result<()> {
        let meta = tokio::fs::metadata(path)
            .await
            .context(format!("Image not found: {:?}", path))?;
        if !meta.is_file() {
            bail!("Not a file: {:?}", path);
        }
        if meta.len() > self.max_file_size {
            bail!(
                "Image too large: {} bytes (max {} MB)",
                meta.len(),
                self.max_file_size / (1024 * 1024)
            );
        }
        Ok(())
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

/// Resolve `.` and `..` lexically, never popping past the root.
fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for c in path.components() {
        match c {
            Component::ParentDir => {
                if matches!(parts.last(), Some(Component::Normal(_))) {
                    parts.pop();
                }
            }
            Component::CurDir => {}
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfined_passes_path_through() {
        let guard = ImageGuard::new(1);
        assert_eq!(
            guard.resolve("/tmp/x.jpg").unwrap(),
            PathBuf::from("/tmp/x.jpg")
        );
        assert!(guard.root().is_none());
    }

    #[test]
    fn test_root_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let guard = ImageGuard::new(1).with_root(dir.path().to_path_buf()).unwrap();

        assert!(guard.resolve("../../etc/passwd").is_err());
        assert!(guard.resolve("/etc/passwd").is_err());

        let inside = guard.resolve("sub/../photo.png").unwrap();
        assert!(inside.starts_with(guard.root().unwrap()));
        assert!(inside.ends_with("photo.png"));
    }

    #[test]
    fn test_missing_root_fails() {
        assert!(ImageGuard::new(1)
            .with_root(PathBuf::from("/definitely/not/here"))
            .is_err());
    }

    #[tokio::test]
    async fn test_check_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let small = dir.path().join("small.bin");
        let big = dir.path().join("big.bin");
        std::fs::write(&small, vec![0u8; 16]).unwrap();
        std::fs::write(&big, vec![0u8; 1024 * 1024 + 1]).unwrap();

        let guard = ImageGuard::new(1);
        assert!(guard.check_size(&small).await.is_ok());
        assert!(guard.check_size(&big).await.is_err());
        assert!(guard.check_size(dir.path()).await.is_err());
        assert!(guard.check_size(&dir.path().join("missing.png")).await.is_err());
    }

    #[tokio::test]
    async fn test_huge_size_limit_saturates() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("image.bin");
        std::fs::write(&image, vec![0u8; 4096]).unwrap();

        for limit_mb in [1u64 << 44, u64::MAX] {
            let guard = ImageGuard::new(limit_mb);
            assert!(guard.check_size(&image).await.is_ok());
        }
    }
}
