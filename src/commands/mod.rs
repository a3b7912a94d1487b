pub mod convert;
pub mod list;
pub mod validate;

pub use convert::{ConvertCommandArgs, execute_convert};
pub use list::execute_list;
pub use validate::execute_validate;
