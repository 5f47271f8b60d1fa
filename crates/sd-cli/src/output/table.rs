#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render a simple aligned table for string rows.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
                .max(MIN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false, 0))
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    let divider = "-".repeat(header_line.chars().count());

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let text = truncate_text(value, *width);
                let numeric = looks_numeric(&text);
                match status_color(&text).filter(|_| options.color) {
                    Some(code) => {
                        let colored = format!("\u{1b}[{code}m{text}\u{1b}[0m");
                        let extra = colored.len() - text.len();
                        pad(&colored, *width, numeric, extra)
                    }
                    None => pad(&text, *width, numeric, 0),
                }
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    });

    std::iter::once(header_line)
        .chain(std::iter::once(divider))
        .chain(row_lines)
        .collect::<Vec<_>>()
        .join("\n")
}

const MIN_WIDTH: usize = 4;
const SEPARATOR: &str = "  ";

/// Shrink the widest column one char at a time until the row fits.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].len().max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | '%'))
}

/// `invisible` counts escape bytes that take no columns.
fn pad(value: &str, width: usize, right_align: bool, invisible: usize) -> String {
    let visible = value.chars().count().saturating_sub(invisible);
    let fill = " ".repeat(width.saturating_sub(visible));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// ANSI color for workflow states: green when finished, yellow while
/// waiting, red when broken.
fn status_color(value: &str) -> Option<&'static str> {
    match value {
        "DONE" | "CLOSED" | "FIXED" | "ACTIVE" | "ready" | "true" => Some("32"),
        "REVIEW" | "TESTING" | "IN_PROGRESS" | "ON_HOLD" | "pending" => Some("33"),
        "NEW" | "CONFIRMED" | "CRITICAL" | "false" => Some("31"),
        _ => None,
    }
}
