use std::io::{self, Write};

use promptframe_io::core::{Document, fingerprint};
use promptframe_io::engine::{Segment, section_body_text};
use promptframe_io::registry::{PrefixOverlap, Registry, format_checklist_label};
use tabwriter::TabWriter;

const PREVIEW_CHARS: usize = 60;

pub fn print_frameworks(registry: &Registry) -> io::Result<()> {
    let mut tw = TabWriter::new(io::stdout()).padding(2);
    writeln!(tw, "framework\tsection_key\tlabel\tdefault\thelper")?;
    for framework in registry.frameworks() {
        for section in &framework.sections {
            writeln!(
                tw,
                "{}\t{}\t{}\t{}\t{}",
                framework.id,
                section.section_key,
                format_checklist_label(&section.label),
                if section.default_enabled { "yes" } else { "no" },
                section.helper
            )?;
        }
    }
    tw.flush()
}

pub fn print_collisions(collisions: &[PrefixOverlap]) -> io::Result<()> {
    let mut tw = TabWriter::new(io::stdout()).padding(2);
    writeln!(tw, "shorter\tlonger")?;
    for overlap in collisions {
        writeln!(tw, "{}\t{}", overlap.shorter, overlap.longer)?;
    }
    tw.flush()
}

/// One row per section run, then the document fingerprint.
pub fn print_segments(registry: &Registry, doc: &Document, segments: &[Segment<'_>]) -> io::Result<()> {
    let mut tw = TabWriter::new(io::stdout()).padding(2);
    writeln!(tw, "section_key\tblocks\tstatus\tpreview")?;

    let mut seen = Vec::new();
    for segment in segments {
        let body = section_body_text(registry, segment.body_nodes);
        let status = if seen.contains(&&segment.section_key) {
            "repeat"
        } else if body.is_empty() {
            "placeholder"
        } else {
            "filled"
        };
        seen.push(&segment.section_key);

        writeln!(
            tw,
            "{}\t{}..{}\t{}\t{}",
            segment.section_key,
            segment.start_index,
            segment.end_index,
            status,
            preview(&body)
        )?;
    }
    tw.flush()?;

    let loose = loose_block_count(doc, segments);
    println!("other blocks: {loose}");
    println!("fingerprint: {}", fingerprint(doc));
    Ok(())
}

fn loose_block_count(doc: &Document, segments: &[Segment<'_>]) -> usize {
    (0..doc.blocks.len())
        .filter(|i| !segments.iter().any(|s| (s.start_index..s.end_index).contains(i)))
        .count()
}

fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let mut cut: String = flat.chars().take(PREVIEW_CHARS - 1).collect();
    cut.push('…');
    cut
}
