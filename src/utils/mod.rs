pub mod clock;
pub mod url_validator;

pub use clock::{Clock, ManualClock, SystemClock};

/// 62 个符号：大小写字母 + 数字
pub const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const MIN_CODE_LEN: usize = 3;
pub const MAX_CODE_LEN: usize = 64;

/// Random code over [`CODE_ALPHABET`].
///
/// Draws from the thread-local generator, a CSPRNG seeded from the OS.
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// 校验短码格式：3-64 个 `[A-Za-z0-9_-]` 字符
#[inline]
pub fn is_valid_short_code(code: &str) -> bool {
    (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&code.len())
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Source of candidate codes for the allocator.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, length: usize) -> String;
}

/// Default generator backed by [`generate_random_code`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        generate_random_code(length)
    }
}
