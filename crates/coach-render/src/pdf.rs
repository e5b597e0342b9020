//! genpdf backend. All wrapping and pagination is left to genpdf.

use std::path::Path;

use genpdf::elements::{Break, Paragraph};
use genpdf::style::Style;
use genpdf::{Element, SimplePageDecorator};

use crate::document::{Block, Document};
use crate::error::RenderError;

const MARGIN_MM: i32 = 25;

pub(crate) fn render_pdf(
    doc: &Document,
    font_dir: &Path,
    font_family: &str,
) -> Result<Vec<u8>, RenderError> {
    let family = genpdf::fonts::from_files(font_dir, font_family, None).map_err(|source| {
        RenderError::Font {
            dir: font_dir.to_path_buf(),
            family: font_family.to_owned(),
            source,
        }
    })?;

    let mut pdf = genpdf::Document::new(family);
    pdf.set_title(doc.title.clone());
    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(MARGIN_MM);
    pdf.set_page_decorator(decorator);

    for block in &doc.blocks {
        push_block(&mut pdf, block);
    }

    let mut out = Vec::new();
    pdf.render(&mut out)?;
    Ok(out)
}

fn push_block(pdf: &mut genpdf::Document, block: &Block) {
    match block {
        Block::Title(text) => {
            pdf.push(Paragraph::new(text.as_str()).styled(Style::new().bold().with_font_size(20)));
            pdf.push(Break::new(1.5));
        }
        Block::Goal(goal) => {
            pdf.push(
                Paragraph::new(format!("Career Goal: {goal}"))
                    .styled(Style::new().bold().with_font_size(14)),
            );
            pdf.push(Break::new(1));
        }
        Block::Generated(stamp) => {
            pdf.push(Paragraph::new(format!("Generated on: {stamp}")).styled(Style::new().with_font_size(9)));
            pdf.push(Break::new(1.5));
        }
        Block::Heading2(text) => {
            pdf.push(Paragraph::new(text.as_str()).styled(Style::new().bold().with_font_size(14)));
        }
        Block::Heading3(text) => {
            pdf.push(Paragraph::new(text.as_str()).styled(Style::new().bold().with_font_size(12)));
        }
        Block::Bullet(text) | Block::Paragraph(text) => {
            pdf.push(Paragraph::new(text.as_str()));
        }
        Block::Spacer => pdf.push(Break::new(0.5)),
    }
}
