pub mod html;
pub mod json;

pub use html::HtmlFormatter;
pub use json::JsonFormatter;
