pub mod category;
pub mod plant;
pub mod rule;
pub mod seed;

pub use category::*;
pub use plant::*;
pub use rule::*;
pub use seed::*;
