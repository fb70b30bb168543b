pub mod record_type;
pub mod tag;
pub mod user;

pub use record_type::*;
pub use tag::*;
pub use user::*;
