pub mod form_values;
pub mod header_case;
