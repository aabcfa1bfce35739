//! Writes bronze artifacts as snappy-compressed parquet files.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use statvid_core::{
    ChannelRecord, PlaylistItemRecord, SearchItemRecord, SelectedChannel, VideoRecord,
};
use uuid::Uuid;

use crate::error::LakeError;
use crate::paths::DataPaths;
use crate::schema::{with_run_id, LakeRecord};

/// UTC timestamp used in run-keyed file names, e.g. `20250102T030405Z`.
#[must_use]
pub fn artifact_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Writer rooted at `<bronze>/youtube`, with one method per artifact family.
#[derive(Debug, Clone)]
pub struct LakeWriter {
    root: PathBuf,
}

impl LakeWriter {
    #[must_use]
    pub fn new(paths: &DataPaths) -> Self {
        Self {
            root: paths.youtube_bronze(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `search/<category_id>.parquet`: raw search hits before any filtering.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError`] if the batch cannot be built or written.
    pub fn write_search(
        &self,
        category_id: u32,
        rows: &[SearchItemRecord],
    ) -> Result<PathBuf, LakeError> {
        self.write_records(&self.keyed("search", &category_id.to_string()), rows)
    }

    /// `channels/<category_id>.parquet`: normalized metadata of the overfetched
    /// candidate pool.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError`] if the batch cannot be built or written.
    pub fn write_channels(
        &self,
        category_id: u32,
        rows: &[ChannelRecord],
    ) -> Result<PathBuf, LakeError> {
        self.write_records(&self.keyed("channels", &category_id.to_string()), rows)
    }

    /// `uploads/<channel_id>.parquet`: one channel's fetched uploads playlist.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError`] if the batch cannot be built or written.
    pub fn write_uploads(
        &self,
        channel_id: &str,
        rows: &[PlaylistItemRecord],
    ) -> Result<PathBuf, LakeError> {
        self.write_records(&self.keyed("uploads", channel_id), rows)
    }

    /// `channel_selection/<category_id>.parquet`: one category's balanced selection.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError`] if the batch cannot be built or written.
    pub fn write_category_selection(
        &self,
        category_id: u32,
        rows: &[SelectedChannel],
    ) -> Result<PathBuf, LakeError> {
        self.write_records(
            &self.keyed("channel_selection", &category_id.to_string()),
            rows,
        )
    }

    /// `channel_selection/selection_<ts>.parquet`: every category's selection
    /// concatenated, tagged with the run id.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError`] if the batch cannot be built or written.
    pub fn write_combined_selection(
        &self,
        rows: &[SelectedChannel],
        run_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<PathBuf, LakeError> {
        let path = self.keyed(
            "channel_selection",
            &format!("selection_{}", artifact_timestamp(at)),
        );
        let batch = with_run_id(&SelectedChannel::to_batch(rows)?, run_id)?;
        write_batch(&path, &batch)
    }

    /// `videos/videos_<ts>.parquet`: video metadata from an ingest run.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError`] if the batch cannot be built or written.
    pub fn write_videos(
        &self,
        rows: &[VideoRecord],
        at: DateTime<Utc>,
    ) -> Result<PathBuf, LakeError> {
        let path = self.keyed("videos", &format!("videos_{}", artifact_timestamp(at)));
        self.write_records(&path, rows)
    }

    fn keyed(&self, family: &str, key: &str) -> PathBuf {
        self.root
            .join(family)
            .join(format!("{}.parquet", file_stem(key)))
    }

    fn write_records<R: LakeRecord>(&self, path: &Path, rows: &[R]) -> Result<PathBuf, LakeError> {
        write_batch(path, &R::to_batch(rows)?)
    }
}

/// Keeps API ids from escaping their artifact directory.
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c => c,
        })
        .collect()
}

fn write_batch(path: &Path, batch: &RecordBatch) -> Result<PathBuf, LakeError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| LakeError::io(dir, e))?;
    }

    let tmp = path.with_extension("parquet.tmp");
    if let Err(e) = write_parquet(&tmp, batch) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    std::fs::rename(&tmp, path).map_err(|e| LakeError::io(path, e))?;

    tracing::debug!(
        path = %path.display(),
        rows = batch.num_rows(),
        "parquet artifact written"
    );
    Ok(path.to_path_buf())
}

fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<(), LakeError> {
    let file = File::create(path).map_err(|e| LakeError::io(path, e))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use arrow::array::{StringArray, UInt64Array};
    use chrono::TimeZone;

    use super::*;
    use crate::read::{count_rows, read_batches};

    fn writer(dir: &Path) -> LakeWriter {
        LakeWriter::new(&DataPaths::new(dir))
    }

    fn selected(id: &str, subs: u64) -> SelectedChannel {
        SelectedChannel {
            channel: ChannelRecord {
                channel_id: id.to_string(),
                title: id.to_string(),
                country: "US".to_string(),
                subscriber_count: subs,
                video_count: 100,
                uploads_playlist_id: Some(format!("UU{id}")),
                category_id: Some(20),
                category_name: Some("Gaming".to_string()),
            },
            uploads_last_year: 30,
            recent_video_ids: vec![format!("{id}-v1")],
        }
    }

    #[test]
    fn artifact_timestamp_is_compact_utc() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(artifact_timestamp(at), "20250102T030405Z");
    }

    #[test]
    fn category_selection_lands_under_bronze_youtube() {
        let dir = tempfile::tempdir().unwrap();
        let path = writer(dir.path())
            .write_category_selection(20, &[selected("A", 5_000), selected("B", 9_000)])
            .unwrap();

        assert_eq!(
            path,
            dir.path()
                .join("bronze/youtube/channel_selection/20.parquet")
        );
        assert_eq!(count_rows(&path).unwrap(), 2);

        let batches = read_batches(&path).unwrap();
        let subs = batches[0]
            .column_by_name("subscriber_count")
            .unwrap()
            .as_any()
            .downcast_ref::<UInt64Array>()
            .unwrap();
        assert_eq!(subs.values().to_vec(), vec![5_000, 9_000]);
    }

    #[test]
    fn combined_selection_carries_run_id_and_timestamp_name() {
        let dir = tempfile::tempdir().unwrap();
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let run_id = Uuid::new_v4();

        let path = writer(dir.path())
            .write_combined_selection(&[selected("A", 1)], run_id, at)
            .unwrap();

        assert!(path.ends_with("channel_selection/selection_20250601T120000Z.parquet"));
        let batches = read_batches(&path).unwrap();
        let ids = batches[0]
            .column_by_name("run_id")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(ids.value(0), run_id.to_string());
    }

    #[test]
    fn rewrite_replaces_previous_artifact_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let lake = writer(dir.path());

        lake.write_category_selection(10, &[selected("A", 1), selected("B", 2)])
            .unwrap();
        let path = lake
            .write_category_selection(10, &[selected("C", 3)])
            .unwrap();

        assert_eq!(count_rows(&path).unwrap(), 1);
        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|x| x == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn uploads_are_keyed_by_channel_id() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![PlaylistItemRecord {
            video_id: Some("v1".into()),
            published_at: None,
            playlist_id: Some("UUx".into()),
        }];
        let path = writer(dir.path()).write_uploads("UCx", &rows).unwrap();
        assert!(path.ends_with("uploads/UCx.parquet"));
        assert_eq!(count_rows(&path).unwrap(), 1);
    }

    #[test]
    fn path_separators_in_keys_are_neutralised() {
        let dir = tempfile::tempdir().unwrap();
        let path = writer(dir.path()).write_uploads("../evil", &[]).unwrap();
        assert_eq!(path.parent().unwrap().file_name().unwrap(), "uploads");
        assert_eq!(path.file_name().unwrap(), ".._evil.parquet");
    }

    #[test]
    fn empty_artifact_is_still_readable() {
        let dir = tempfile::tempdir().unwrap();
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let path = writer(dir.path()).write_videos(&[], at).unwrap();
        assert_eq!(count_rows(&path).unwrap(), 0);
        let batches = read_batches(&path).unwrap();
        assert!(batches.iter().all(|b| b.num_rows() == 0));
    }
}
