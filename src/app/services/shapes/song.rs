//! Song-corpus shapes: songs and artists.

use crate::error::Result;
use polars::prelude::*;

/// Project the song shape {song_id, title, artist_id, year, duration} from
/// the aggregated song corpus.
///
/// Sorted by title. The sort key is chosen for deterministic,
/// human-auditable staging CSV diffs, not for correctness.
pub fn song_shape(corpus: &DataFrame) -> Result<DataFrame> {
    let df = corpus
        .clone()
        .lazy()
        .select([
            col("song_id"),
            col("title"),
            col("artist_id"),
            col("year").cast(DataType::Int32),
            col("duration"),
        ])
        .sort_by_exprs([col("title")], SortMultipleOptions::default())
        .collect()?;
    Ok(df)
}

/// Project the artist shape {artist_id, name, location, latitude, longitude}
/// from the aggregated song corpus, sorted by name.
pub fn artist_shape(corpus: &DataFrame) -> Result<DataFrame> {
    let df = corpus
        .clone()
        .lazy()
        .select([
            col("artist_id"),
            col("artist_name").alias("name"),
            col("artist_location").alias("location"),
            col("artist_latitude").alias("latitude"),
            col("artist_longitude").alias("longitude"),
        ])
        .sort_by_exprs([col("name")], SortMultipleOptions::default())
        .collect()?;
    Ok(df)
}
