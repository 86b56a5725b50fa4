pub mod properties;
pub mod show;

pub use properties::list_properties;
pub use show::{show_card, RunConfig};
