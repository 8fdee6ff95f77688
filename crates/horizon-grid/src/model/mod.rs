//! Data model for grid editing.
//!
//! The editors only ever see three data types from the host grid:
//!
//! - `CellValue`: a dynamically typed cell value
//! - `Item`: the mutable row record, keyed by column field name
//! - `Column`: the column descriptor (field, validator, editor factory)
//!
//! Items are owned by the host's data layer. An editor reads the field
//! named by its column in `load_value` and writes it back in `apply_value`;
//! nothing else in the item is touched.

mod column;
mod item;
mod value;

pub use column::Column;
pub use item::Item;
pub use value::CellValue;
