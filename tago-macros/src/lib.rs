use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod parsed;

use parsed::ParsedRecord;

/// Derive a field table for tag extraction.
///
/// ```text
/// #[derive(Tagged)]
/// struct Post {
///     #[tag(orm = "preload=true;limit=20", mask = "skip")]
///     comments: Vec<Comment>,
///     #[tagged(opaque)]
///     published_at: chrono::DateTime<chrono::Utc>,
///     #[tagged(skip)]
///     cache: Cache,
/// }
/// ```
///
/// - `#[tag(<namespace> = "...")]` raw tag text, one entry per namespace.
/// - `#[tagged(rename = "...")]` on a field or the struct changes the reported name.
/// - `#[tagged(opaque)]` treats the field as a scalar (no `Shape` impl needed).
/// - `#[tagged(skip)]` leaves the field out.
#[proc_macro_derive(Tagged, attributes(tag, tagged))]
pub fn derive_tagged(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedRecord::from_input(&input) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
