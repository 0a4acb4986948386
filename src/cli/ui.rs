use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Terminal emphasis for text printed around tables.
pub enum Tone {
    Heading,
    Positive,
    Muted,
}

pub fn paint(text: &str, tone: Tone) -> String {
    let styled = match tone {
        Tone::Heading => style(text).bold().underlined(),
        Tone::Positive => style(text).green().bold(),
        Tone::Muted => style(text).dim(),
    };
    styled.to_string()
}

/// Rounded UTF-8 table that wraps to the terminal width.
pub fn bordered_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| {
            Cell::new(h)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold)
        }));
    table
}

pub fn number_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Bold green number, used for the converted amount.
pub fn highlight_cell(text: String) -> Cell {
    number_cell(text)
        .add_attribute(Attribute::Bold)
        .fg(Color::Green)
}
