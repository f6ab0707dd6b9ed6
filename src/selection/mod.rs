//! Selection and grouping.
//!
//! ## Modules
//!
//! - `active` - the active shape, selection notifications
//! - `grouping` - selection-key toggling into a multi-selection
//! - `lasso` - rubber-band resolution on pointer-up

mod active;
mod grouping;
mod lasso;
