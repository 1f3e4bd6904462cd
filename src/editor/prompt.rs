//! Interactive prompts for the `editor` binary.
//!
//! Answers are gathered into an [`AddRequest`] in one go; validation and
//! mutation happen afterwards, so an abandoned or invalid session never
//! touches the document.

use std::io::{self, BufRead, Write};

use crate::core::model::{Document, MediaType};

use super::ops::{type_label, AddRequest};

/// Print `question` and read one trimmed line.  EOF reads as empty.
pub fn ask(input: &mut impl BufRead, out: &mut impl Write, question: &str) -> io::Result<String> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Walk the user through adding an item.
pub fn collect_add_request(
    input: &mut impl BufRead,
    out: &mut impl Write,
    doc: &Document,
) -> io::Result<AddRequest> {
    writeln!(out, "\nAdd New Item to Gallery\n")?;

    let groups = doc.groups();
    if !groups.is_empty() {
        writeln!(out, "Available groups:")?;
        for (idx, group) in groups.iter().enumerate() {
            writeln!(out, "  {}. {} ({} items)", idx + 1, group.id, group.items.len())?;
        }
        writeln!(out)?;
    }

    let kind = match ask(input, out, "Type (image/video): ")?
        .to_lowercase()
        .as_str()
    {
        "video" => MediaType::Video,
        _ => MediaType::Image,
    };

    let (source_q, alt_q) = match kind {
        MediaType::Video => ("YouTube Video URL: ", "Description: "),
        MediaType::Image => ("Image URL: ", "Alt text: "),
    };
    let source = ask(input, out, source_q)?;
    let alt = ask(input, out, alt_q)?;
    let category = ask(input, out, "Category: ")?;
    let group = ask(input, out, "Group ID (or \"new\" for new group): ")?;
    let width = ask(input, out, "Width (w-full, md:w-1/2, etc.): ")?;

    Ok(AddRequest {
        kind,
        source,
        alt,
        category,
        group,
        width,
    })
}

/// Show the current items and ask which one to remove.  Returns `None` when
/// there is nothing to remove.
pub fn ask_remove_id(
    input: &mut impl BufRead,
    out: &mut impl Write,
    doc: &Document,
) -> io::Result<Option<String>> {
    if doc.item_count() == 0 {
        writeln!(out, "No items to remove.")?;
        return Ok(None);
    }

    writeln!(out, "\nCurrent Items:")?;
    match doc {
        Document::Grouped { groups, .. } => {
            for group in groups {
                for item in &group.items {
                    writeln!(
                        out,
                        "   {} #{}: {} ({})",
                        type_label(item),
                        item.id,
                        item.alt_text(),
                        group.id
                    )?;
                }
            }
        }
        Document::Legacy { images, .. } => {
            for item in images {
                writeln!(out, "   {} #{}: {}", type_label(item), item.id, item.alt_text())?;
            }
        }
    }

    ask(input, out, "\nEnter item ID to remove: ").map(Some)
}
