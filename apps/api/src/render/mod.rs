// Cover-letter export: text layout, PDF serialisation and download naming.
// Layout and PDF writing are CPU-bound and run inside tokio::task::spawn_blocking.

pub mod filename;
pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod pdf;

pub use font_metrics::{default_page_config, PageConfig};
