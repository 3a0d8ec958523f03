pub mod date;
pub mod str;
