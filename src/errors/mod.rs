pub mod api_error;
pub mod server_error;
