pub mod java;
pub mod known_types;
pub mod mod_file;
pub mod rust;
