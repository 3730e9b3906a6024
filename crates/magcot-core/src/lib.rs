pub mod config;
pub mod copy;
pub mod groups;
pub mod id;
pub mod info;
pub mod layout;
pub mod model;
pub mod pager;
pub mod surface;
pub mod viewer;

pub use config::{DomIds, ViewerConfig};
pub use copy::CopyCycle;
pub use groups::{GroupSet, GroupState};
pub use id::GroupId;
pub use layout::{DisplayPlan, compute_magnification};
pub use model::*;
pub use pager::TexturePager;
pub use surface::Surface;
pub use viewer::Viewer;
