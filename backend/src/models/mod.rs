pub mod content;
pub mod year;

pub use content::*;
pub use year::*;
