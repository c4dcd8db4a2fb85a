pub mod page_id;

pub use page_id::is_valid_page_id;
