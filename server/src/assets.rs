use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use std::path::{Path, PathBuf};

/// Directory on disk that uploaded files are written into.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        AssetStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Write `data` to `<root>/<file_name>`, replacing any existing file.
    pub async fn write(&self, file_name: &str, data: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.path_for(file_name);
        tokio::fs::write(&path, data).await?;
        Ok(path)
    }
}

/// 32 random bytes, base64url without padding, plus `.ext`.
pub fn random_file_name(extension: &str) -> String {
    let mut key = [0u8; 32];
    rand::rng().fill_bytes(&mut key);
    format!("{}.{}", URL_SAFE_NO_PAD.encode(key), extension)
}

// Always localhost; a deployment behind another host gets unusable URLs.
pub fn asset_url(port: u16, file_name: &str) -> String {
    format!("http://localhost:{}/assets/{}", port, file_name)
}
