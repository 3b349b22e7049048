//! Domain layer: outline tree and everything derived from it
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod cards;
pub mod chapters;
pub mod display;
pub mod document;
pub mod editor;
pub mod error;
pub mod parser;
pub mod practice;
pub mod serializer;

pub use arena::{OutlineNode, OutlineTree, TreeIterator};
pub use cards::{generate, locate_card, renumber, BulletItem, SpeechCard, MAX_STRUCTURAL_DEPTH};
pub use chapters::{Chapter, ChapterNavigator};
pub use display::ToTermTree;
pub use document::{parse_to_outline, NodeDocument, Outline, OutlineDocument, DEFAULT_OUTLINE_NAME};
pub use editor::{OutlineEditor, DEFAULT_NEW_ITEM_TITLE};
pub use error::{DomainError, DomainResult};
pub use parser::{extract_title, parse, status_line, ParseResult};
pub use practice::PracticeSession;
pub use serializer::{to_text, INDENT_WIDTH};
