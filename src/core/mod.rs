pub mod etl;
pub mod mapper;
pub mod opening_hours;
pub mod scheduler;

pub use crate::domain::model::{LibraryRecord, RawFeature, ResultSet};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
