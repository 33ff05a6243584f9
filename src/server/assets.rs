//! Read-only access to the client assets directory.

use std::path::PathBuf;

use crate::server::error::ApiError;

const SCREENS_DIR: &str = "screens";
const TEMPLATES_DIR: &str = "templates";
const INDEX_FILE: &str = "index.html";

/// Serves files from `root/screens`, `root/templates` and `root/index.html`.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// A screen fragment. Only `*.inc` files are served.
    pub async fn screen(&self, file: &str) -> Result<String, ApiError> {
        if !file.ends_with(".inc") {
            return Err(not_found(SCREENS_DIR, file));
        }
        self.read(SCREENS_DIR, file).await
    }

    pub async fn template(&self, file: &str) -> Result<String, ApiError> {
        self.read(TEMPLATES_DIR, file).await
    }

    /// Landing page for `/app/...` deep links.
    pub async fn index(&self) -> Result<String, ApiError> {
        let path = self.root.join(INDEX_FILE);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|_| ApiError::AssetNotFound {
                path: INDEX_FILE.to_string(),
            })
    }

    async fn read(&self, dir: &str, file: &str) -> Result<String, ApiError> {
        if !is_plain_file_name(file) {
            return Err(not_found(dir, file));
        }
        let path = self.root.join(dir).join(file);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|_| not_found(dir, file))
    }
}

fn not_found(dir: &str, file: &str) -> ApiError {
    ApiError::AssetNotFound {
        path: format!("{dir}/{file}"),
    }
}

/// Rejects anything that could leave the asset directory.
fn is_plain_file_name(file: &str) -> bool {
    !file.is_empty()
        && !file.starts_with('.')
        && !file.contains(['/', '\\'])
        && !file.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_screen() -> (tempfile::TempDir, AssetStore) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("screens")).unwrap();
        std::fs::write(dir.path().join("screens/home.inc"), "<p>hi</p>").unwrap();
        std::fs::write(dir.path().join("secret.txt"), "nope").unwrap();
        let store = AssetStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn plain_file_names() {
        assert!(is_plain_file_name("home.inc"));
        assert!(!is_plain_file_name("../secret.txt"));
        assert!(!is_plain_file_name("a/b.inc"));
        assert!(!is_plain_file_name(".hidden"));
        assert!(!is_plain_file_name(""));
    }

    #[tokio::test]
    async fn reads_screen_fragment() {
        let (_dir, store) = store_with_screen();
        assert_eq!(store.screen("home.inc").await.unwrap(), "<p>hi</p>");
    }

    #[tokio::test]
    async fn rejects_non_fragment_and_traversal() {
        let (_dir, store) = store_with_screen();
        assert!(store.screen("home.html").await.is_err());
        assert!(store.screen("..%2Fsecret.inc").await.is_err());
        assert!(store.template("../secret.txt").await.is_err());
    }
}
