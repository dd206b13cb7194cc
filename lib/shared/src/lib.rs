pub mod library;
pub mod release;
