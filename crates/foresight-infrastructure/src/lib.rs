pub mod config_service;
pub mod in_memory_record_repository;
pub mod json_dir_record_repository;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::in_memory_record_repository::InMemoryRecordRepository;
pub use crate::json_dir_record_repository::JsonDirRecordRepository;
pub use crate::paths::ForesightPaths;
pub use crate::secret_service::SecretServiceImpl;
