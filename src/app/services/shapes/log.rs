//! Log-corpus shapes: event filter, time, and users.

use crate::error::Result;
use polars::prelude::*;

/// Substring of the `page` field marking a song-played event.
const SONG_PLAYED_PAGE: &str = "NextSong";

/// Keep only song-played events, parse the epoch-ms `ts` field into a
/// datetime, and sort ascending by it.
///
/// Every downstream log shape consumes this frame. Feeding the loader
/// time-sorted rows makes the update policy's physically-last tie-break
/// equivalent to latest-by-timestamp.
pub fn filter_log_events(corpus: &DataFrame) -> Result<DataFrame> {
    let df = corpus
        .clone()
        .lazy()
        .filter(col("page").str().contains_literal(lit(SONG_PLAYED_PAGE)))
        .with_columns([col("ts").cast(DataType::Datetime(TimeUnit::Milliseconds, None))])
        .sort_by_exprs([col("ts")], SortMultipleOptions::default())
        .collect()?;
    Ok(df)
}

/// Derive the time shape {start_time, hour, day, week, month, year, weekday}
/// from the filtered log frame, sorted by start_time.
///
/// week is the ISO week of year; weekday is 0-based from Monday.
pub fn time_shape(filtered: &DataFrame) -> Result<DataFrame> {
    let ts = || col("ts");
    let df = filtered
        .clone()
        .lazy()
        .select([
            ts().alias("start_time"),
            ts().dt().hour().cast(DataType::Int32).alias("hour"),
            ts().dt().day().cast(DataType::Int32).alias("day"),
            ts().dt().week().cast(DataType::Int32).alias("week"),
            ts().dt().month().cast(DataType::Int32).alias("month"),
            ts().dt().year().cast(DataType::Int32).alias("year"),
            (ts().dt().weekday().cast(DataType::Int32) - lit(1)).alias("weekday"),
        ])
        .sort_by_exprs([col("start_time")], SortMultipleOptions::default())
        .collect()?;
    Ok(df)
}

/// Project the user shape {user_id, first_name, last_name, gender, level}
/// from the filtered log frame, coercing user_id to integer.
///
/// Rows are neither deduplicated nor re-sorted here: duplicate user ids are
/// resolved by the bulk loader's update policy, which keeps the
/// physically-last occurrence. The input is the time-sorted filtered frame,
/// so last-occurring means latest `level`.
pub fn user_shape(filtered: &DataFrame) -> Result<DataFrame> {
    let df = filtered
        .clone()
        .lazy()
        .select([
            col("userId").cast(DataType::Int64).alias("user_id"),
            col("firstName").alias("first_name"),
            col("lastName").alias("last_name"),
            col("gender"),
            col("level"),
        ])
        .collect()?;
    Ok(df)
}
