//! 正文词法：把正文切成逻辑行
//!
//! `/* */`（Boneyard）和 `[[ ]]`（注解）块可以跨越多行甚至包含空行，
//! 它们在这里被合并成一个逻辑行，后续按行、按空行判断的规则不会把它们拆开。

/// 逻辑行类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Plain,
    Boneyard,
    Note,
}

/// 逻辑行
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    pub kind: LineKind,
    /// 普通行为原文；注释块为去掉定界符后的内容（保留内部换行）
    pub text: String,
    /// 在原文中的起始行号
    pub line: usize,
}

impl SourceLine {
    pub fn is_blank(&self) -> bool {
        self.kind == LineKind::Plain && self.text.trim().is_empty()
    }
}

/// 统一换行符
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// 把正文切分成逻辑行，`line_offset` 为正文第一行在原文中的行号
pub fn lex(body: &str, line_offset: usize) -> Vec<SourceLine> {
    let raw: Vec<&str> = body.split('\n').collect();
    let boneyard_closers = next_closer_lines(&raw, "*/");
    let note_closers = next_closer_lines(&raw, "]]");
    let mut lines = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let trimmed = raw[i].trim_start();
        let block = if trimmed.starts_with("/*") {
            protect_block(&raw, i, "/*", "*/", &boneyard_closers).map(|b| (LineKind::Boneyard, b))
        } else if trimmed.starts_with("[[") {
            protect_block(&raw, i, "[[", "]]", &note_closers).map(|b| (LineKind::Note, b))
        } else {
            None
        };

        match block {
            Some((kind, (end, inner))) => {
                lines.push(SourceLine { kind, text: inner, line: line_offset + i });
                i = end + 1;
            }
            None => {
                lines.push(SourceLine { kind: LineKind::Plain, text: raw[i].to_string(), line: line_offset + i });
                i += 1;
            }
        }
    }

    lines
}

// 从每一行起（含该行）第一个包含闭合符号的行，末尾多一项 None
fn next_closer_lines(raw: &[&str], close: &str) -> Vec<Option<usize>> {
    let mut next = vec![None; raw.len() + 1];
    for i in (0..raw.len()).rev() {
        next[i] = if raw[i].contains(close) { Some(i) } else { next[i + 1] };
    }
    next
}

// 闭合符号之后只允许空白
fn closes_line(segment: &str, pos: usize, close: &str) -> bool {
    segment[pos + close.len()..].trim().is_empty()
}

// 查找注释块的结束行。闭合符号必须位于行尾（允许尾随空白），否则不算注释块。
// 结束行直接查表得到，未闭合的开头不会重复扫描后文。
fn protect_block(raw: &[&str], start: usize, open: &str, close: &str, closers: &[Option<usize>]) -> Option<(usize, String)> {
    let head = &raw[start].trim_start()[open.len()..];
    if let Some(pos) = head.find(close) {
        return closes_line(head, pos, close).then(|| (start, head[..pos].to_string()));
    }

    let end = closers[start + 1]?;
    let tail = raw[end];
    let pos = tail.find(close)?;
    if !closes_line(tail, pos, close) {
        return None;
    }

    let mut inner: Vec<&str> = Vec::with_capacity(end - start + 1);
    inner.push(head);
    inner.extend_from_slice(&raw[start + 1..end]);
    inner.push(&tail[..pos]);
    Some((end, inner.join("\n")))
}
