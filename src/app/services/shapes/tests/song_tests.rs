use super::song_corpus;
use crate::app::models::Table;
use crate::app::services::shapes::{artist_shape, song_shape};
use polars::prelude::*;

#[test]
fn test_song_shape_projects_and_sorts_by_title() {
    let songs = song_shape(&song_corpus()).unwrap();

    assert_eq!(songs.get_column_names_str(), Table::Songs.columns());
    assert_eq!(songs.column("year").unwrap().dtype(), &DataType::Int32);

    let titles = songs
        .column("title")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap();
    assert_eq!(titles.get(0), Some("Alpha Ray"));
    assert_eq!(titles.get(1), Some("Zulu Dawn"));
}

#[test]
fn test_artist_shape_renames_and_sorts_by_name() {
    let artists = artist_shape(&song_corpus()).unwrap();

    assert_eq!(artists.get_column_names_str(), Table::Artists.columns());

    let names = artists
        .column("name")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap();
    assert_eq!(names.get(0), Some("Aretha"));
    assert_eq!(names.get(1), Some("Banda"));

    // Sparse artist fields stay null after the rename
    let latitudes = artists
        .column("latitude")
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap();
    assert_eq!(latitudes.get(0), None);
    assert_eq!(latitudes.get(1), Some(6.45));
}
