//! Book cipher engine.
//!
//! Messages are hidden as character positions inside a set of public pages
//! (the keytext). Every byte becomes a token naming one exact character in
//! one text node of one page.
//!
//! # Module Structure
//!
//! | Module     | Purpose                                              |
//! |------------|------------------------------------------------------|
//! | `index`    | Markup → ordered text node references                |
//! | `corpus`   | Ordered union of references across pages             |
//! | `token`    | Coordinate ↔ base-77 printable token                 |
//! | `allocate` | Encode direction: byte → unused coordinate           |
//! | `resolve`  | Decode direction: token → byte                       |
//! | `message`  | Whole-message encode/decode with `/` wire format     |
//!
//! # Data Flow
//!
//! ```text
//! encode: pages ─► index ─► Corpus ─► allocate ─► token ─► "tok/tok/tok"
//! decode: pages ─► index ─► Corpus ◄─ resolve  ◄─ token ◄─ "tok/tok/tok"
//! ```

pub mod allocate;
pub mod corpus;
mod error;
pub mod index;
pub mod message;
pub mod resolve;
pub mod token;
mod types;

pub use allocate::Allocator;
pub use corpus::Corpus;
pub use error::{CipherError, FetchError};
pub use index::index_document;
pub use message::{Decoded, Encoded, MessageOptions, decode_message, encode_message};
pub use resolve::{Resolution, resolve};
pub use types::{Coordinate, Reference, RefKey};
