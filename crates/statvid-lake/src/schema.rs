//! Arrow schemas for every bronze artifact and the record → batch
//! conversions that feed the parquet writer.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, ListBuilder, StringArray, StringBuilder, TimestampMicrosecondArray, UInt32Array,
    UInt64Array,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use statvid_core::{
    ChannelRecord, PlaylistItemRecord, SearchItemRecord, SelectedChannel, VideoRecord,
};
use uuid::Uuid;

const UTC: &str = "UTC";

/// A row type with a fixed columnar layout in the lake.
pub trait LakeRecord: Sized {
    fn schema() -> SchemaRef;

    /// One array per schema field, in schema order.
    fn columns(rows: &[Self]) -> Vec<ArrayRef>;

    /// # Errors
    ///
    /// Returns [`ArrowError`] if the columns do not match the schema.
    fn to_batch(rows: &[Self]) -> Result<RecordBatch, ArrowError> {
        RecordBatch::try_new(Self::schema(), Self::columns(rows))
    }
}

/// Appends a constant `run_id` column to `batch`.
///
/// # Errors
///
/// Returns [`ArrowError`] if the extended batch cannot be assembled.
pub fn with_run_id(batch: &RecordBatch, run_id: Uuid) -> Result<RecordBatch, ArrowError> {
    let mut fields: Vec<Field> = batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    fields.push(Field::new("run_id", DataType::Utf8, false));

    let run_id = run_id.to_string();
    let mut columns = batch.columns().to_vec();
    columns.push(Arc::new(StringArray::from_iter_values(
        std::iter::repeat(run_id.as_str()).take(batch.num_rows()),
    )));

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}

fn timestamp_type() -> DataType {
    DataType::Timestamp(TimeUnit::Microsecond, Some(UTC.into()))
}

fn utf8<'a>(values: impl Iterator<Item = &'a str>) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(values))
}

fn nullable_utf8<'a>(values: impl Iterator<Item = Option<&'a str>>) -> ArrayRef {
    Arc::new(values.collect::<StringArray>())
}

fn counts(values: impl Iterator<Item = u64>) -> ArrayRef {
    Arc::new(UInt64Array::from_iter_values(values))
}

fn timestamps(values: impl Iterator<Item = Option<DateTime<Utc>>>) -> ArrayRef {
    Arc::new(
        values
            .map(|ts| ts.map(|t| t.timestamp_micros()))
            .collect::<TimestampMicrosecondArray>()
            .with_timezone(UTC),
    )
}

impl LakeRecord for VideoRecord {
    fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("video_id", DataType::Utf8, false),
            Field::new("title", DataType::Utf8, false),
            Field::new("published_at", timestamp_type(), true),
            Field::new("category_id", DataType::Utf8, true),
            Field::new("channel_id", DataType::Utf8, true),
            Field::new("view_count", DataType::UInt64, false),
            Field::new("like_count", DataType::UInt64, false),
            Field::new("comment_count", DataType::UInt64, false),
        ]))
    }

    fn columns(rows: &[Self]) -> Vec<ArrayRef> {
        vec![
            utf8(rows.iter().map(|r| r.video_id.as_str())),
            utf8(rows.iter().map(|r| r.title.as_str())),
            timestamps(rows.iter().map(|r| r.published_at)),
            nullable_utf8(rows.iter().map(|r| r.category_id.as_deref())),
            nullable_utf8(rows.iter().map(|r| r.channel_id.as_deref())),
            counts(rows.iter().map(|r| r.view_count)),
            counts(rows.iter().map(|r| r.like_count)),
            counts(rows.iter().map(|r| r.comment_count)),
        ]
    }
}

fn channel_fields() -> Vec<Field> {
    vec![
        Field::new("channel_id", DataType::Utf8, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("country", DataType::Utf8, false),
        Field::new("subscriber_count", DataType::UInt64, false),
        Field::new("video_count", DataType::UInt64, false),
        Field::new("uploads_playlist_id", DataType::Utf8, true),
        Field::new("category_id", DataType::UInt32, true),
        Field::new("category_name", DataType::Utf8, true),
    ]
}

fn channel_columns(rows: &[&ChannelRecord]) -> Vec<ArrayRef> {
    vec![
        utf8(rows.iter().map(|r| r.channel_id.as_str())),
        utf8(rows.iter().map(|r| r.title.as_str())),
        utf8(rows.iter().map(|r| r.country.as_str())),
        counts(rows.iter().map(|r| r.subscriber_count)),
        counts(rows.iter().map(|r| r.video_count)),
        nullable_utf8(rows.iter().map(|r| r.uploads_playlist_id.as_deref())),
        Arc::new(rows.iter().map(|r| r.category_id).collect::<UInt32Array>()),
        nullable_utf8(rows.iter().map(|r| r.category_name.as_deref())),
    ]
}

impl LakeRecord for ChannelRecord {
    fn schema() -> SchemaRef {
        Arc::new(Schema::new(channel_fields()))
    }

    fn columns(rows: &[Self]) -> Vec<ArrayRef> {
        let rows: Vec<&ChannelRecord> = rows.iter().collect();
        channel_columns(&rows)
    }
}

impl LakeRecord for SelectedChannel {
    fn schema() -> SchemaRef {
        let mut fields = channel_fields();
        fields.push(Field::new("uploads_last_year", DataType::UInt64, false));
        fields.push(Field::new(
            "recent_video_ids",
            DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
            false,
        ));
        Arc::new(Schema::new(fields))
    }

    fn columns(rows: &[Self]) -> Vec<ArrayRef> {
        let channels: Vec<&ChannelRecord> = rows.iter().map(|r| &r.channel).collect();
        let mut columns = channel_columns(&channels);
        columns.push(counts(rows.iter().map(|r| r.uploads_last_year)));

        let mut recent = ListBuilder::new(StringBuilder::new());
        for row in rows {
            for id in &row.recent_video_ids {
                recent.values().append_value(id);
            }
            recent.append(true);
        }
        columns.push(Arc::new(recent.finish()));
        columns
    }
}

impl LakeRecord for PlaylistItemRecord {
    fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("video_id", DataType::Utf8, true),
            Field::new("published_at", timestamp_type(), true),
            Field::new("playlist_id", DataType::Utf8, true),
        ]))
    }

    fn columns(rows: &[Self]) -> Vec<ArrayRef> {
        vec![
            nullable_utf8(rows.iter().map(|r| r.video_id.as_deref())),
            timestamps(rows.iter().map(|r| r.published_at)),
            nullable_utf8(rows.iter().map(|r| r.playlist_id.as_deref())),
        ]
    }
}

impl LakeRecord for SearchItemRecord {
    fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("video_id", DataType::Utf8, true),
            Field::new("channel_id", DataType::Utf8, true),
            Field::new("channel_title", DataType::Utf8, true),
            Field::new("title", DataType::Utf8, true),
            Field::new("published_at", timestamp_type(), true),
        ]))
    }

    fn columns(rows: &[Self]) -> Vec<ArrayRef> {
        vec![
            nullable_utf8(rows.iter().map(|r| r.video_id.as_deref())),
            nullable_utf8(rows.iter().map(|r| r.channel_id.as_deref())),
            nullable_utf8(rows.iter().map(|r| r.channel_title.as_deref())),
            nullable_utf8(rows.iter().map(|r| r.title.as_deref())),
            timestamps(rows.iter().map(|r| r.published_at)),
        ]
    }
}
