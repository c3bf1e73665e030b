/// 提取 FASTQ header 的基础 ID（取第一个空白分隔字段，移除 /1 或 /2 后缀）
///
/// Never fails: a header without a mate suffix is returned as its first token.
pub fn normalize(header: &str) -> &str {
    let token = header.split_whitespace().next().unwrap_or("");
    if token.ends_with("/1") || token.ends_with("/2") {
        &token[..token.len() - 2]
    } else {
        token
    }
}
