pub mod path;
pub mod response;
