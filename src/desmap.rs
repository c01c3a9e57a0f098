//! Prelude template ("desmap") parsing. A desmap file is a list of blocks
//! separated by blank lines: the first line of a block is the expression
//! LaTeX, an optional second line carries a 2-character marker followed by
//! click-metadata LaTeX.

use crate::expr::Expr;

const CLICK_MARKER_LEN: usize = 2;

pub fn parse_blocks(text: &str) -> Vec<Expr> {
    let mut exprs = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !block.is_empty() {
                exprs.push(parse_block(&block));
                block.clear();
            }
        } else {
            block.push(line);
        }
    }
    // The last block may not be followed by a blank line.
    if !block.is_empty() {
        exprs.push(parse_block(&block));
    }

    exprs
}

fn parse_block(block: &[&str]) -> Expr {
    let latex = block[0];
    match block.get(1).and_then(|meta| meta.get(CLICK_MARKER_LEN..)) {
        Some(info) => Expr::with_click(latex, info),
        None => Expr::new(latex),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ClickableInfo;
    use pretty_assertions::assert_eq;

    #[test]
    fn blocks_split_on_blank_lines() {
        let exprs = parse_blocks("T=1\n\nG_{oto}\\left(l\\right)=T\\to l\n\n");
        assert_eq!(
            exprs,
            vec![
                Expr::new("T=1"),
                Expr::new("G_{oto}\\left(l\\right)=T\\to l"),
            ]
        );
    }

    #[test]
    fn second_line_supplies_click_metadata() {
        let exprs = parse_blocks("T=1\n>>T\\to 1\n");
        assert_eq!(
            exprs[0].clickable_info,
            Some(ClickableInfo {
                enabled: true,
                latex: "T\\to 1".to_string(),
            })
        );
    }

    #[test]
    fn trailing_block_without_final_blank_line_is_kept() {
        let exprs = parse_blocks("A=1\n\nB=2");
        assert_eq!(exprs.len(), 2);
        assert_eq!(exprs[1].latex, "B=2");
    }

    #[test]
    fn consecutive_blank_lines_yield_no_empty_blocks() {
        let exprs = parse_blocks("A=1\n\n\n\nB=2\n");
        assert_eq!(exprs.len(), 2);
    }
}
