pub mod ckmeans;
pub mod color;
pub mod error;
pub mod method;
pub mod sample;
pub mod scale;

pub use error::*;
pub use method::*;
pub use sample::*;
pub use scale::*;
