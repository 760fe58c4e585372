// ABOUTME: Page registry for toggle-cloze: which pages to process and where their files live.
// ABOUTME: Provides page-list parsing, title sanitization and export path discovery.

pub mod error;
pub mod export;
pub mod settings;
pub mod title;

pub use error::PageListError;
pub use export::{discover, PageFiles, Postfixes};
pub use settings::{load_page_list, parse_page_list, target_titles, PageEntry};
pub use title::sanitize_title;
