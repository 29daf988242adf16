//! Room entity.

pub mod category;
pub mod model;
pub mod status;

pub use category::RoomType;
pub use model::{CreateRoom, Room, RoomFilters, UpdateRoom};
pub use status::RoomStatus;
