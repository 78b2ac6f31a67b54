// Presentation layer: concrete views the presenter draws on.

pub mod facts;
pub mod html;

pub use html::HtmlView;
