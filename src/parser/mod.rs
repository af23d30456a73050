pub mod classifier;
pub mod fountain_parser;
pub mod lexer;
pub mod refine;
pub mod rules;
pub mod text_processor;
pub mod title_page_parser;

pub use classifier::BodyClassifier;
pub use fountain_parser::FountainParser;
pub use rules::{RuleId, RuleTable, RULE_TABLE};
pub use text_processor::{text_styles, to_html, TextStyle};
pub use title_page_parser::{parse_title_page, split_title_page, TitlePageParser};
