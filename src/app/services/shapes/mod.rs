//! Shape transformers.
//!
//! Each transformer derives one narrowed, destination-ready projection of
//! an aggregated corpus DataFrame. Column names and order match the
//! destination tables exactly, so the bulk loader can stage them verbatim.

mod log;
mod song;
mod songplay;

#[cfg(test)]
mod tests;

pub use log::{filter_log_events, time_shape, user_shape};
pub use song::{artist_shape, song_shape};
pub use songplay::{songplay_filled_shape, songplay_shape};
