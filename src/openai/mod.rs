mod core;
pub use self::core::{Message, Role, completion, first_choice_content};
