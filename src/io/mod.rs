pub mod config_io;
pub mod data_dir;
pub mod kv;
pub mod lock;
pub mod persist;
pub mod recovery;
pub mod state;
