//! Data access and award-processing services.

pub mod carousel;
pub mod icons;
pub mod image;
pub mod rows;
pub mod search;
pub mod transform;

pub use carousel::{ItemBox, ScrollMode, ScrollPlan, Viewport, plan_scroll};
pub use image::{ImageFallback, ResolvedImage, resolve_image};
pub use rows::{HttpRowSource, RowSource, RowStore};
pub use search::{FilterResult, filter_awards};
pub use transform::{available_years, build_year_data};
