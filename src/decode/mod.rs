pub mod fields;
pub mod header;
pub mod stats;
pub mod table;
pub mod time;
pub mod vsgm;

pub use fields::Gamemode;
pub use stats::{assemble, StatsResult, TextBound};
pub use table::EncodingTable;
