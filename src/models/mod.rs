pub mod element;
pub mod title_page;
pub mod document;
pub mod script;
pub mod conf;

pub use element::{Element, ElementType};
pub use title_page::TitlePage;
pub use document::Document;
pub use script::{Actor, Line, Scene, Script};
pub use conf::Conf;
