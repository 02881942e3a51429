//! Streaming zip writer for an [`ArchivePlan`].

use async_zip::tokio::write::ZipFileWriter;
use async_zip::{Compression, DeflateOption, ZipEntryBuilder};
use tokio::io::AsyncWrite;
use tokio_util::compat::TokioAsyncReadCompatExt;

use super::{ArchivePlan, ArchiveStage, PlannedEntry};
use crate::error::{Result, ServerError};
use crate::storage::{AssetStorage, StorageError};

fn entry_builder(path: String) -> ZipEntryBuilder {
    ZipEntryBuilder::new(path.into(), Compression::Deflate).deflate_option(DeflateOption::Maximum)
}

/// Write every planned entry into a zip stream over `out` and finalize it.
///
/// Files are copied chunk by chunk. A file that disappeared since planning is
/// replaced by its placeholder. Any failure of the writer itself aborts the
/// archive; `out` is returned only once the central directory is written.
pub async fn write_archive<W>(plan: &ArchivePlan, storage: &dyn AssetStorage, out: W) -> Result<W>
where
    W: AsyncWrite + Unpin,
{
    let mut writer = ZipFileWriter::with_tokio(out);
    let group_count = plan.groups.len();

    for (group_idx, group) in plan.groups.iter().enumerate() {
        for (entry_idx, entry) in group.entries.iter().enumerate() {
            let stage = ArchiveStage::Writing {
                group: group_idx + 1,
                groups: group_count,
                entry: entry_idx + 1,
                entries: group.entries.len(),
            };
            tracing::debug!(
                stage = %stage,
                folder = group.variant.folder(),
                asset = entry.asset_id,
                "Writing archive entry"
            );

            if entry.on_disk {
                if let Some(source) = entry.source.as_deref() {
                    match storage.open(source).await {
                        Ok(reader) => {
                            write_file_entry(&mut writer, entry.file_path(), reader).await?;
                            continue;
                        }
                        Err(StorageError::NotFound(_)) | Err(StorageError::InvalidKey(_)) => {}
                        Err(StorageError::Io(e)) => return Err(ServerError::Io(e)),
                    }
                }
            }

            tracing::warn!(
                "Asset {} unavailable ({}), writing placeholder",
                entry.asset_id,
                entry.source.as_deref().unwrap_or("unresolved")
            );
            write_placeholder_entry(&mut writer, entry).await?;
        }
    }

    tracing::debug!(stage = %ArchiveStage::Finalizing, entries = plan.len(), "Finalizing archive");
    let out = writer
        .close()
        .await
        .map_err(|e| ServerError::ArchiveWrite(format!("Failed to finalize archive: {}", e)))?;
    Ok(out.into_inner())
}

async fn write_file_entry<W>(
    writer: &mut ZipFileWriter<W>,
    path: String,
    reader: Box<dyn tokio::io::AsyncRead + Unpin + Send>,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut entry_writer = writer
        .write_entry_stream(entry_builder(path.clone()))
        .await
        .map_err(|e| ServerError::ArchiveWrite(format!("Failed to open entry {}: {}", path, e)))?;

    futures::io::copy(reader.compat(), &mut entry_writer)
        .await
        .map_err(|e| ServerError::ArchiveWrite(format!("Failed to write entry {}: {}", path, e)))?;

    entry_writer
        .close()
        .await
        .map_err(|e| ServerError::ArchiveWrite(format!("Failed to close entry {}: {}", path, e)))?;
    Ok(())
}

async fn write_placeholder_entry<W>(writer: &mut ZipFileWriter<W>, entry: &PlannedEntry) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let path = entry.placeholder_path();
    writer
        .write_entry_whole(entry_builder(path.clone()), entry.placeholder.as_bytes())
        .await
        .map_err(|e| ServerError::ArchiveWrite(format!("Failed to write placeholder {}: {}", path, e)))
}
