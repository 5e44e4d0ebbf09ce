//! Record registration helpers

pub mod macros;
