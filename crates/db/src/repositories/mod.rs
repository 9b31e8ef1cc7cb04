//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Simple
//! reads and writes take `&PgPool`; anything that must run inside a
//! caller-owned transaction takes an executor or `&mut PgConnection`.

pub mod course_repo;
pub mod student_repo;

pub use course_repo::CourseRepo;
pub use student_repo::StudentRepo;

/// Page size used when a list request gives no `limit`.
pub const DEFAULT_LIMIT: i64 = 100;

/// Largest page size a list request may ask for.
pub const MAX_LIMIT: i64 = 500;

/// Clamp a requested page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Wrap user text as a `LIKE` substring pattern matched literally.
///
/// Escapes `\`, `%` and `_`; the query must declare `ESCAPE '\'`.
pub fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
