//! 序列切分与拼接
//!
//! Positions are counted in characters; FASTQ lines are ASCII so this is the
//! same as counting bytes.

use crate::config::InsertionEnd;

/// Byte index of the `n`th character, or the string length if `n` is past the end.
fn char_boundary(s: &str, n: usize) -> usize {
    if s.is_ascii() {
        return n.min(s.len());
    }
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

/// 按带符号偏移量切分序列，返回 (保留部分, 移动部分)
///
/// - `offset >= 0`：移动前 `offset` 个碱基
/// - `offset < 0`：移动末尾 `|offset|` 个碱基
///
/// Offsets longer than the sequence move the whole string and keep nothing.
pub fn split(sequence: &str, offset: i64) -> (&str, &str) {
    let len = sequence.chars().count();
    let magnitude = usize::try_from(offset.unsigned_abs()).unwrap_or(usize::MAX);
    if offset >= 0 {
        let at = char_boundary(sequence, magnitude);
        let (moved, kept) = sequence.split_at(at);
        (kept, moved)
    } else {
        let at = char_boundary(sequence, len.saturating_sub(magnitude));
        sequence.split_at(at)
    }
}

/// 将移动部分插入到目标序列的 5' 或 3' 端
pub fn recombine(base: &str, inserted: &str, end: InsertionEnd) -> String {
    let mut out = String::with_capacity(base.len() + inserted.len());
    match end {
        InsertionEnd::FivePrime => {
            out.push_str(inserted);
            out.push_str(base);
        }
        InsertionEnd::ThreePrime => {
            out.push_str(base);
            out.push_str(inserted);
        }
    }
    out
}

fn complement_base(base: char) -> char {
    match base.to_ascii_uppercase() {
        'A' => 'T',
        'T' => 'A',
        'G' => 'C',
        'C' => 'G',
        _ => 'N',
    }
}

/// DNA 序列反向互补
///
/// - A ↔ T
/// - G ↔ C
/// - 其他字符转为 N
/// - 自动转大写并反向序列
pub fn reverse_complement(sequence: &str) -> String {
    sequence.chars().rev().map(complement_base).collect()
}

/// Quality strings follow their bases when a segment is reverse complemented.
pub fn reverse(quality: &str) -> String {
    quality.chars().rev().collect()
}
