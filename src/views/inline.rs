//! Inline asset fetching.
//!
//! After a tree is assembled, the root's `styles.inline` and `scripts.inline`
//! hold resolved file paths. [`fetch_inline_assets`] swaps each path for the
//! file's contents, in place and in order, so the document template can embed
//! them with `{{{this}}}`. Two files with identical contents are embedded
//! once. Any unreadable asset fails the whole render.

use futures::future::try_join_all;
use indexmap::IndexSet;
use std::path::{Path, PathBuf};

use crate::core::TesseraError;
use crate::views::builder::ResolvedView;

/// Default upper bound for a single inline asset (1 MB).
pub const DEFAULT_MAX_INLINE_ASSET_SIZE: u64 = 1024 * 1024;

/// Replace inline style and script paths on `root` with file contents.
///
/// Only the root is touched; child nodes keep their paths.
///
/// # Errors
///
/// - [`TesseraError::InlineAssetRead`] if a file can't be read
/// - [`TesseraError::InlineAssetTooLarge`] if a file exceeds `max_size` bytes
pub async fn fetch_inline_assets(root: &mut ResolvedView, max_size: u64) -> Result<(), TesseraError> {
    fetch_set(&mut root.styles.inline, max_size).await?;
    fetch_set(&mut root.scripts.inline, max_size).await?;
    Ok(())
}

async fn fetch_set(set: &mut IndexSet<String>, max_size: u64) -> Result<(), TesseraError> {
    if set.is_empty() {
        return Ok(());
    }

    let contents =
        try_join_all(set.iter().map(|path| read_inline_asset(PathBuf::from(path), max_size))).await?;
    *set = contents.into_iter().collect();
    Ok(())
}

async fn read_inline_asset(path: PathBuf, max_size: u64) -> Result<String, TesseraError> {
    tracing::debug!("Inlining asset {}", path.display());

    let metadata = tokio::fs::metadata(&path).await.map_err(|source| read_error(&path, source))?;
    if metadata.len() > max_size {
        return Err(TesseraError::InlineAssetTooLarge {
            path,
            size: metadata.len(),
            limit: max_size,
        });
    }

    tokio::fs::read_to_string(&path).await.map_err(|source| read_error(&path, source))
}

fn read_error(path: &Path, source: std::io::Error) -> TesseraError {
    TesseraError::InlineAssetRead {
        path: path.to_path_buf(),
        source,
    }
}
