//! HTML clipboard payloads
//!
//! - [`extract`] - header/fragment separation, cleaning, document shell
//! - [`beautify`] - tokenizer and tab-indenting printer
//! - [`entities`] - character reference decoding

pub mod beautify;
pub mod entities;
pub mod extract;

pub use beautify::{beautify_html, tokenize, HtmlToken, VOID_ELEMENTS};
pub use entities::decode_entities;
pub use extract::{
    clean_fragment, decode_html_bytes, extract_fragment, process_html, HtmlFragment,
    FRAGMENT_BASE_INDENT,
};
