pub(crate) mod auth;
pub use auth::{current_user, login, logout, switch_user};

mod bills;
pub use bills::*;

mod campaigns;
pub use campaigns::*;

mod shifts;
pub use shifts::*;

mod users;
pub use users::*;

mod workspace;
pub use workspace::*;
