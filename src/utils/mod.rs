pub mod date_codec;
pub mod validation;
