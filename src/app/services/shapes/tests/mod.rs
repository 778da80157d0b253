//! Shape transformer tests, shared fixtures first.

mod song_tests;

use polars::prelude::*;

/// 2018-11-03T00:36:36.796Z, a Saturday. Reference instant for the time
/// shape derivations.
pub(crate) const SATURDAY_NIGHT_MS: i64 = 1_541_205_396_796;

/// Later instant on the following Sunday.
pub(crate) const SUNDAY_MORNING_MS: i64 = 1_541_300_000_000;

/// Aggregated song-corpus fixture: two catalog entries, deliberately out of
/// title order, one with sparse artist fields.
pub(crate) fn song_corpus() -> DataFrame {
    df!(
        "song_id" => ["SOZULU1", "SOALPH1"],
        "title" => ["Zulu Dawn", "Alpha Ray"],
        "artist_id" => ["ARB1", "ARA1"],
        "artist_name" => ["Banda", "Aretha"],
        "artist_location" => [Some("Lagos"), None::<&str>],
        "artist_latitude" => [Some(6.45), None::<f64>],
        "artist_longitude" => [Some(3.39), None::<f64>],
        "year" => [1999i64, 0],
        "duration" => [301.12f64, 215.5],
    )
    .unwrap()
}

/// Aggregated log-corpus fixture: two song plays listed newest-first, plus
/// one page visit that the event filter must drop. Both plays belong to the
/// same user, whose level changes between them.
pub(crate) fn log_corpus() -> DataFrame {
    df!(
        "artist" => [Some("The Smiths"), Some("Elena"), None::<&str>],
        "song" => [Some("Intro"), Some("Setanta matins"), None::<&str>],
        "length" => [Some(120.0f64), Some(269.58), None::<f64>],
        "page" => ["NextSong", "NextSong", "Home"],
        "ts" => [SUNDAY_MORNING_MS, SATURDAY_NIGHT_MS, SATURDAY_NIGHT_MS + 1000],
        "userId" => ["39", "39", "39"],
        "firstName" => ["Walter", "Walter", "Walter"],
        "lastName" => ["Frye", "Frye", "Frye"],
        "gender" => ["M", "M", "M"],
        "level" => ["paid", "free", "free"],
        "sessionId" => [52i64, 38, 38],
        "location" => [
            "San Francisco-Oakland-Hayward, CA",
            "San Francisco-Oakland-Hayward, CA",
            "San Francisco-Oakland-Hayward, CA",
        ],
        "userAgent" => ["\"Mozilla/5.0\"", "\"Mozilla/5.0\"", "\"Mozilla/5.0\""],
    )
    .unwrap()
}
