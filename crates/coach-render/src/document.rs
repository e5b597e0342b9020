//! Block model for a rendered career plan.
//!
//! Plain text is split into lines and each line is classified into a
//! [`Block`]. The resulting [`Document`] is what the PDF backend lays out.

use chrono::{DateTime, Utc};

pub const BULLET: &str = "•";

/// One layout element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title(String),
    /// `Career Goal: ...` label taken from the first user turn.
    Goal(String),
    /// `Generated on: ...` stamp.
    Generated(String),
    Heading2(String),
    Heading3(String),
    /// Bullet text already prefixed with [`BULLET`].
    Bullet(String),
    Paragraph(String),
    Spacer,
}

/// Classify a block of plain text, one [`Block`] per line.
pub fn classify(body: &str) -> Vec<Block> {
    body.split('\n').map(classify_line).collect()
}

fn classify_line(raw: &str) -> Block {
    let line = raw.strip_suffix('\r').unwrap_or(raw);
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Block::Spacer;
    }
    if let Some(text) = line.strip_prefix("## ") {
        return Block::Heading2(text.trim().to_owned());
    }
    if let Some(text) = line.strip_prefix("### ") {
        return Block::Heading3(text.trim().to_owned());
    }
    for marker in ["- ", "* ", "• "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return Block::Bullet(format!("{BULLET} {}", rest.trim()));
        }
    }
    Block::Paragraph(line.to_owned())
}

/// A fully laid-out (but not yet rendered) career plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Document {
    /// Title, optional goal label, generated stamp, then the classified body.
    pub fn build(title: &str, body: &str, goal_label: &str, generated_at: DateTime<Utc>) -> Self {
        let mut blocks = vec![Block::Title(title.to_owned())];
        let goal = goal_label.trim();
        if !goal.is_empty() {
            blocks.push(Block::Goal(goal.to_owned()));
        }
        blocks.push(Block::Generated(
            generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        ));
        blocks.extend(classify(body));
        Self { title: title.to_owned(), blocks }
    }

    /// Blocks other than the generated stamp.
    pub fn content_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(|b| !matches!(b, Block::Generated(_)))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
