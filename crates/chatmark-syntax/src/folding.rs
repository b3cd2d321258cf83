//! Fold-region scanner for BSL source.
//!
//! Computes collapsible line ranges from the same line-oriented source the
//! tokenizer consumes: procedure and function bodies, and multi-line runs of
//! `//` comments. This is the pure half of code folding; attaching fold
//! indicators to rendered markup is the caller's concern.
//!
//! Well-formed nesting is not required. Openers are matched to the nearest
//! closer of the same kind; blocks left unclosed at end of input are
//! discarded rather than guessed at. Every produced block satisfies
//! `end_line > start_line`.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldKind {
    Procedure,
    Function,
    Comment,
}

/// A collapsible line range, `start_line`/`end_line` zero-based inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldBlock {
    pub kind: FoldKind,
    pub start_line: usize,
    pub end_line: usize,
    pub collapsed: bool,
}

/// Scan BSL source for fold regions.
pub fn fold_blocks(source: &str) -> Vec<FoldBlock> {
    let mut blocks = Vec::new();
    let mut open_procs: Vec<(FoldKind, usize)> = Vec::new();
    let mut comment_start: Option<usize> = None;
    let mut last_comment_line: usize = 0;

    for (line_no, line) in source.lines().enumerate() {
        let lower = line.trim_start().to_lowercase();

        if lower.starts_with("//") {
            if comment_start.is_none() {
                comment_start = Some(line_no);
            }
            last_comment_line = line_no;
        } else if let Some(start) = comment_start.take()
            && last_comment_line > start
        {
            blocks.push(FoldBlock {
                kind: FoldKind::Comment,
                start_line: start,
                end_line: last_comment_line,
                collapsed: false,
            });
        }

        if lower.starts_with("конецпроцедуры") || lower.starts_with("endprocedure") {
            close_nearest(&mut open_procs, FoldKind::Procedure, line_no, &mut blocks);
        } else if lower.starts_with("конецфункции") || lower.starts_with("endfunction") {
            close_nearest(&mut open_procs, FoldKind::Function, line_no, &mut blocks);
        } else if lower.starts_with("процедура") || lower.starts_with("procedure") {
            open_procs.push((FoldKind::Procedure, line_no));
        } else if lower.starts_with("функция") || lower.starts_with("function") {
            open_procs.push((FoldKind::Function, line_no));
        }
    }

    if let Some(start) = comment_start
        && last_comment_line > start
    {
        blocks.push(FoldBlock {
            kind: FoldKind::Comment,
            start_line: start,
            end_line: last_comment_line,
            collapsed: false,
        });
    }

    blocks.sort_by_key(|b| b.start_line);
    blocks
}

fn close_nearest(
    open: &mut Vec<(FoldKind, usize)>,
    kind: FoldKind,
    line_no: usize,
    blocks: &mut Vec<FoldBlock>,
) {
    if let Some(pos) = open.iter().rposition(|(k, _)| *k == kind) {
        let (_, start) = open.remove(pos);
        if line_no > start {
            blocks.push(FoldBlock {
                kind,
                start_line: start,
                end_line: line_no,
                collapsed: false,
            });
        }
    }
}

/// Apply a `line number -> collapsed` map to scanned blocks, keyed by each
/// block's start line.
pub fn apply_fold_state(blocks: &mut [FoldBlock], state: &HashMap<usize, bool>) {
    for block in blocks {
        if let Some(&collapsed) = state.get(&block.start_line) {
            block.collapsed = collapsed;
        }
    }
}
