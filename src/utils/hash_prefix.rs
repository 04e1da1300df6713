//! 内容哈希与最小唯一前缀压缩
//!
//! 技能描述以规范语言（cn）文本的 MD5 作为跨语言关联键；
//! 写出前统一截断到使全部哈希仍两两不同的最短长度。

use std::collections::HashSet;
use indexmap::IndexMap;
use tracing::debug;

use crate::error::{ArkResult, RsArkError};

/// 默认搜索下限，首个候选长度为 4
pub const DEFAULT_PREFIX_FLOOR: usize = 3;

/// 计算描述文本的内容哈希（32 位十六进制 MD5）
pub fn content_hash(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

/// 哈希前缀压缩工具
pub struct HashPrefixCompressor;

impl HashPrefixCompressor {
    /// 求最小唯一前缀长度：从 `floor + 1` 起逐一尝试，返回首个无冲突的长度
    pub fn minimal_unique_prefix_length<'a, I>(hashes: I, floor: usize) -> ArkResult<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let unique: HashSet<&str> = hashes.into_iter().collect();
        let max_len = unique.iter().map(|h| h.chars().count()).max().unwrap_or(0);
        let upper = max_len.max(floor + 1);

        for len in (floor + 1)..=upper {
            let truncated: HashSet<&str> = unique.iter().map(|h| Self::truncate(h, len)).collect();
            if truncated.len() == unique.len() {
                debug!("哈希前缀压缩：{} 个哈希，前缀长度 {}", unique.len(), len);
                return Ok(len);
            }
        }

        Err(RsArkError::HashPrefixUnresolved(unique.len(), upper))
    }

    /// 截断到前 `len` 个字符
    pub fn truncate(hash: &str, len: usize) -> &str {
        match hash.char_indices().nth(len) {
            Some((idx, _)) => &hash[..idx],
            None => hash,
        }
    }

    /// 按截断后的键重建映射，保持原有顺序
    pub fn rekey<V>(map: IndexMap<String, V>, len: usize) -> IndexMap<String, V> {
        map.into_iter()
            .map(|(hash, value)| (Self::truncate(&hash, len).to_string(), value))
            .collect()
    }

    /// 截断映射中作为值的哈希
    pub fn truncate_values(map: &mut IndexMap<String, String>, len: usize) {
        for hash in map.values_mut() {
            let short = Self::truncate(hash, len).to_string();
            *hash = short;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_is_md5_hex() {
        assert_eq!(content_hash(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(content_hash("abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_first_candidate_is_floor_plus_one() {
        let hashes = ["aaaa0000", "bbbb0000", "cccc0000"];
        assert_eq!(HashPrefixCompressor::minimal_unique_prefix_length(hashes, 3).unwrap(), 4);
        assert_eq!(HashPrefixCompressor::minimal_unique_prefix_length(hashes, 0).unwrap(), 1);
    }

    #[test]
    fn test_smallest_collision_free_length() {
        let hashes = ["abcde111", "abcdf222", "abcdx333", "zzzzz444"];
        let len = HashPrefixCompressor::minimal_unique_prefix_length(hashes, 3).unwrap();
        assert_eq!(len, 5);

        // 短一位必然冲突
        let shorter: HashSet<&str> = hashes.iter().map(|h| HashPrefixCompressor::truncate(h, len - 1)).collect();
        assert!(shorter.len() < hashes.len());
    }

    #[test]
    fn test_duplicates_in_input_are_ignored() {
        let hashes = ["abcd1", "abcd1", "abce2"];
        assert_eq!(HashPrefixCompressor::minimal_unique_prefix_length(hashes, 3).unwrap(), 4);
    }

    #[test]
    fn test_empty_set_returns_first_candidate() {
        let hashes: [&str; 0] = [];
        assert_eq!(HashPrefixCompressor::minimal_unique_prefix_length(hashes, 3).unwrap(), 4);
    }

    #[test]
    fn test_full_md5_set_converges() {
        let hashes: Vec<String> = (0..500).map(|i| content_hash(&format!("描述{}", i))).collect();
        let len = HashPrefixCompressor::minimal_unique_prefix_length(hashes.iter().map(String::as_str), 3).unwrap();
        assert!(len > 3 && len <= 32);
    }

    #[test]
    fn test_rekey_and_truncate_values() {
        let mut by_hash = IndexMap::new();
        by_hash.insert("abcdef".to_string(), 1);
        by_hash.insert("123456".to_string(), 2);
        let rekeyed = HashPrefixCompressor::rekey(by_hash, 4);
        assert_eq!(rekeyed.keys().collect::<Vec<_>>(), vec!["abcd", "1234"]);

        let mut by_id = IndexMap::new();
        by_id.insert("buff_a".to_string(), "abcdef".to_string());
        HashPrefixCompressor::truncate_values(&mut by_id, 4);
        assert_eq!(by_id["buff_a"], "abcd");
    }
}
