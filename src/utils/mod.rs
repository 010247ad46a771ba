pub mod errors;
pub mod format;
pub mod link;
pub mod page;
pub mod table;

pub use errors::{banner, extract_backend_message};
pub use link::{parse_link_header, LinkCursors};
pub use page::PageControls;
pub use table::Table;
