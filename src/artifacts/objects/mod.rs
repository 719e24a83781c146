pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of an object id in hexadecimal form
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an object id in raw binary form
pub const RAW_OBJECT_ID_LENGTH: usize = 20;
