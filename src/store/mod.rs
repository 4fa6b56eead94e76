pub mod blob;
pub mod fs;
pub mod memory;
pub mod paths;
pub mod traits;

pub use blob::*;
pub use fs::*;
pub use memory::*;
pub use traits::*;
