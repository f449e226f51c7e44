pub mod errors;
pub mod model;
mod registry;
pub mod schema;

pub use errors::ParserError;
pub use model::Table;
pub use registry::{parse_sheet, parse_table};
pub use schema::SheetKind;

#[cfg(test)]
mod tests;
