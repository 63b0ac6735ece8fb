//! Field tag metadata for Rust records.
//!
//! Fields carry semicolon-delimited `key=value` directives under a namespace:
//!
//! ```
//! use tago::{Instruction, Tagged, Tago};
//!
//! #[derive(Tagged)]
//! struct Post {
//!     #[tag(orm = "preload=true")]
//!     author: Author,
//!     #[tag(orm = "preload=true;limit=20")]
//!     comments: Vec<Comment>,
//! }
//!
//! #[derive(Tagged)]
//! struct Author {
//!     #[tag(mask = "partial")]
//!     email: String,
//! }
//!
//! #[derive(Tagged)]
//! struct Comment {
//!     #[tag(orm = "preload=true")]
//!     author: Author,
//! }
//!
//! let orm = Tago::new("orm");
//! let index = orm.get_nested::<Post>();
//!
//! let mut preloaded = Vec::new();
//! index.apply_one(&Instruction::from("preload=true"), |field| preloaded.push(field.to_string()));
//! assert_eq!(preloaded, ["author", "comments", "comments.author"]);
//! ```
//!
//! The index is rebuilt on every extraction call; callers that dispatch
//! repeatedly should keep the returned [`InstructionIndex`].

extern crate self as tago;

pub mod dispatch;
pub mod errors;
pub mod extract;
pub mod index;
pub mod instruction;
pub mod parse;
pub mod record;
pub mod registry;
pub mod shape;

pub use dispatch::{Action, ActionMap, apply, apply_one};
pub use errors::*;
pub use extract::{DEFAULT_SEPARATOR, Tago};
pub use index::InstructionIndex;
pub use instruction::{FieldName, Instruction};
pub use parse::{parse_directives, parse_field_tag};
pub use record::{FieldDescriptor, RecordDescriptor, Tagged};
pub use registry::{TaggedRegistration, get_record_by_name, is_record_registered, registered_records};
pub use shape::{Shape, TypeShape, element_shape, element_shape_of};
pub use tago_macros::Tagged;

// Re-export inventory for auto-registration in the record derive macro
pub use inventory;
