pub mod export;
pub mod my_clippings;
pub mod utility;
