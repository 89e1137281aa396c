mod matching;
mod rect;
mod stop_tracker;
mod track;

pub use matching::{Detection, find_best_match};
pub use rect::Rect;
pub use stop_tracker::StopTracker;
pub use track::{ParkedTrack, TrackStore};
