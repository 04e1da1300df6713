//! 工具模块：数值提取、哈希前缀压缩、ID 规范化、输出写入
pub mod num_extractor;
pub mod hash_prefix;
pub mod id;
pub mod writer;

pub use self::num_extractor::NumExtractor;
pub use self::hash_prefix::{content_hash, HashPrefixCompressor, DEFAULT_PREFIX_FLOOR};
pub use self::id::{is_operator, short_char_id, standardize_id};
pub use self::writer::OutputWriter;
