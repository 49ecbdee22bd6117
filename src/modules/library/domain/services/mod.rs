pub mod volume_grouping;

pub use volume_grouping::{group_chapters_by_volume, VolumeGroup};
