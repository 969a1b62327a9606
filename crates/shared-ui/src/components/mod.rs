// Layout blocks
pub mod card;
pub mod modal;
pub mod page_header;

// Controls
pub mod button;
pub mod input;

// Display
pub mod badge;
pub mod countdown;
pub mod stat_card;

pub use badge::*;
pub use button::*;
pub use card::*;
pub use countdown::*;
pub use input::*;
pub use modal::*;
pub use page_header::*;
pub use stat_card::*;
