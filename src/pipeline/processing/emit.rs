use crate::constants::OUTPUT_HEADER;
use crate::types::{MergeFields, MergeTable, OutputRow, ResolvedRecipient};

/// Builds one output row per recipient, broadcasting the constant fields.
/// Names are emitted without their collision suffix.
pub fn emit(recipients: &[ResolvedRecipient], fields: &MergeFields) -> MergeTable {
    let rows = recipients
        .iter()
        .map(|r| OutputRow {
            known_as: r.name.clone(),
            to: r.joined_emails(),
            cc: fields.cc.clone(),
            bcc: fields.bcc.clone(),
            subject: fields.subject.clone(),
            send_as: fields.send_as.clone(),
            attachment: fields.attachment.clone(),
        })
        .collect();
    MergeTable { rows }
}

/// Column-aligned plain-text rendering of the table for terminal preview.
pub fn render_preview(table: &MergeTable) -> String {
    let mut widths: Vec<usize> = OUTPUT_HEADER.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row.to_record()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_line = |cells: [&str; 7]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    lines.push(render_line(OUTPUT_HEADER));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &table.rows {
        lines.push(render_line(row.to_record()));
    }
    lines.join("\n")
}
