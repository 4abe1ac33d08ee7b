pub mod department;
pub mod flight;
pub mod time;


pub use department::*;
pub use flight::*;
pub use time::*;
