pub mod search_results;
pub mod spinner;

// Re-export component symbols so callers can `use crate::components::ui::Spinner` etc.
pub use search_results::*;
pub use spinner::*;
