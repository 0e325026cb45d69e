mod chapter;
mod filter;
mod manga;
mod page;
mod search_manga;

pub use chapter::Chapter;
pub use filter::*;
pub use manga::*;
pub use page::Page;
pub use search_manga::*;
