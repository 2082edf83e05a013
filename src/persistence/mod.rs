pub mod config;
pub mod files;
pub mod parser;
pub mod serializer;

pub use config::{config_file, load_config, save_config, Config};
pub use files::{
    atomic_write, create_user, list_users, load_collection, save_collection, user_file,
    validate_user_name,
};
pub use parser::{decode_collection, decode_line, Decoded};
pub use serializer::{encode_collection, encode_line};
