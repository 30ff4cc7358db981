mod match_stage;
mod page_stage;
pub mod pipeline;
mod sort_stage;
pub mod traits;

pub use page_stage::PAGE_SIZE;
pub use pipeline::{ListingPage, run_listing};
pub use traits::{ListingParams, Sort};
