//! Domain entities - the core business objects.

mod category;
mod member;
mod page;
mod petition;

pub use category::{Category, ParseCategoryError};
pub use member::Member;
pub use page::{Page, PageRequest};
pub use petition::Petition;
