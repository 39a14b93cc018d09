pub mod form_errors;

pub use form_errors::FormErrors;
