pub mod client_addr;
pub mod form_extractor;
