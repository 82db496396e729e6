pub mod attendance;
pub mod member;
pub mod package;
pub mod payment;
pub mod trainer;
pub mod user;

pub use attendance::*;
pub use member::*;
pub use package::*;
pub use payment::*;
pub use trainer::*;
pub use user::*;
