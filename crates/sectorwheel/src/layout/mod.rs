use std::time::Duration;

pub mod half;
pub mod manager;
pub mod model;
pub mod recycler;

pub use half::{BottomHalf, WheelHalf};
pub use manager::{InitialLayoutFinishingListener, LayoutManager};
pub use model::{AdapterPosition, AttachAt, LayoutCursor, Sector, SectorLayoutParams};
pub use recycler::{SectorRecycler, SectorView};

pub const STARTUP_ANIMATION_DURATION: Duration = Duration::from_millis(2000);
