//! Songplay shapes, resolved and filled.

use crate::app::services::catalog::CatalogResolver;
use crate::error::Result;
use polars::prelude::*;

/// Assemble the resolved songplay shape from the filtered, time-sorted log
/// frame.
///
/// Each row receives a 1-based sequential songplay_id and the
/// (song_id, artist_id) pair resolved by exact catalog lookup, null when no
/// exact match exists. Ids are only stable for a given run's input ordering.
pub fn songplay_shape(filtered: &DataFrame, resolver: &CatalogResolver) -> Result<DataFrame> {
    let mut df = filtered
        .clone()
        .lazy()
        .with_row_index(PlSmallStr::from("songplay_id"), Some(1))
        .select([
            col("songplay_id").cast(DataType::Int64),
            col("ts").alias("start_time"),
            col("userId").cast(DataType::Int64).alias("user_id"),
            col("level"),
            col("sessionId").cast(DataType::Int64).alias("session_id"),
            col("location"),
            col("userAgent").alias("user_agent"),
            col("song"),
            col("artist"),
            col("length"),
        ])
        .collect()?;

    let songs = df.column("song")?.as_materialized_series().str()?.clone();
    let artists = df.column("artist")?.as_materialized_series().str()?.clone();
    let lengths = df.column("length")?.as_materialized_series().f64()?.clone();

    let mut song_ids: Vec<Option<String>> = Vec::with_capacity(df.height());
    let mut artist_ids: Vec<Option<String>> = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let resolved = match (songs.get(i), artists.get(i), lengths.get(i)) {
            (Some(title), Some(artist), Some(duration)) => {
                resolver.resolve(title, artist, duration)?
            }
            _ => None,
        };
        match resolved {
            Some((song_id, artist_id)) => {
                song_ids.push(Some(song_id));
                artist_ids.push(Some(artist_id));
            }
            None => {
                song_ids.push(None);
                artist_ids.push(None);
            }
        }
    }

    df.with_column(Series::new(PlSmallStr::from("song_id"), song_ids))?;
    df.with_column(Series::new(PlSmallStr::from("artist_id"), artist_ids))?;

    let df = df.select([
        "songplay_id",
        "start_time",
        "user_id",
        "level",
        "song_id",
        "artist_id",
        "session_id",
        "location",
        "user_agent",
    ])?;
    Ok(df)
}

/// Assemble the filled songplay shape: same grain as the resolved shape but
/// carrying the literal song and artist names, with a 0-based sequential
/// songplay_id.
pub fn songplay_filled_shape(filtered: &DataFrame) -> Result<DataFrame> {
    let df = filtered
        .clone()
        .lazy()
        .with_row_index(PlSmallStr::from("songplay_id"), None)
        .select([
            col("songplay_id").cast(DataType::Int64),
            col("ts").alias("start_time"),
            col("userId").cast(DataType::Int64).alias("user_id"),
            col("level"),
            col("song").alias("song_name"),
            col("artist").alias("artist_name"),
            col("sessionId").cast(DataType::Int64).alias("session_id"),
            col("location"),
            col("userAgent").alias("user_agent"),
        ])
        .collect()?;
    Ok(df)
}
