mod alert;
mod button;
mod code;
mod form;
mod layout;
mod link;
mod table;

pub use self::alert::*;
pub use self::button::*;
pub use self::code::*;
pub use self::form::*;
pub use self::layout::*;
pub use self::link::*;
pub use self::table::*;
