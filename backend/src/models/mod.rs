//! Domain models for catalog objects, observation windows and watch state.

pub mod alert;
pub mod known_set;
pub mod object;
pub mod time;
pub mod window;


pub use alert::*;
pub use known_set::*;
pub use object::*;
pub use time::*;
pub use window::*;
