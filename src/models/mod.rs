pub mod capture;
pub mod generation;
pub mod wire;

pub use capture::*;
pub use generation::*;
pub use wire::*;
