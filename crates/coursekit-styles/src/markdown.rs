//! Markdown helpers

use crate::rendered::Rendered;
use std::fmt::Display;

/// `#`-style header; `level` is clamped to 1..=6
pub fn section_header(title: &str, level: usize, emoji: Option<&str>) -> Rendered {
    let level = level.clamp(1, 6);
    let prefix = match emoji {
        Some(e) if !e.is_empty() => format!("{} ", e),
        _ => String::new(),
    };
    Rendered::Markdown(format!("{} {}{}", "#".repeat(level), prefix, title))
}

/// Fenced code block
pub fn code_block(code: &str, language: &str) -> Rendered {
    Rendered::Markdown(format!("```{}\n{}\n```", language, code))
}

/// Pipe table. An empty `headers` slice omits the header row.
pub fn table<R, C>(rows: &[R], headers: &[&str]) -> Rendered
where
    R: AsRef<[C]>,
    C: Display,
{
    let mut out = String::new();
    if !headers.is_empty() {
        out.push_str(&format!("| {} |\n", headers.join(" | ")));
        out.push_str(&format!("| {} |\n", vec!["---"; headers.len()].join(" | ")));
    }
    for row in rows {
        let cells: Vec<String> = row.as_ref().iter().map(|c| c.to_string()).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    Rendered::Markdown(out)
}

/// `### title` followed by one bullet per point
pub fn key_points<I>(points: I, title: &str) -> Rendered
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut out = format!("### {}\n\n", title);
    push_bullets(&mut out, "- ", points);
    Rendered::Markdown(out)
}

/// Numbered exercise with optional hints
pub fn exercise(number: u32, description: &str, hints: &[&str]) -> Rendered {
    let mut out = format!("### Exercise {}\n\n", number);
    out.push_str(&format!("**Task:** {}\n\n", description));
    if !hints.is_empty() {
        out.push_str("**Hints:**\n");
        push_bullets(&mut out, "- ", hints);
    }
    Rendered::Markdown(out)
}

/// Two-column comparison keyed by `labels`.
///
/// Rows stop at the shortest of the three inputs.
pub fn comparison_table<L, A, B>(
    labels: &[L],
    values1: &[A],
    values2: &[B],
    label1: &str,
    label2: &str,
) -> Rendered
where
    L: Display,
    A: Display,
    B: Display,
{
    let rows: Vec<[String; 3]> = labels
        .iter()
        .zip(values1)
        .zip(values2)
        .map(|((l, a), b)| [l.to_string(), a.to_string(), b.to_string()])
        .collect();
    table(&rows, &["Metric", label1, label2])
}

/// Learning objectives as an unchecked checklist
pub fn objectives<I>(items: I, title: &str) -> Rendered
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut out = format!("### {}\n\n", title);
    out.push_str("By the end of this section, you should be able to:\n\n");
    push_bullets(&mut out, "- [ ] ", items);
    Rendered::Markdown(out)
}

/// `## title` with one `###` section per category, in the given order
pub fn summary<I, K, V>(categories: I, title: &str) -> Rendered
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: IntoIterator,
    V::Item: Display,
{
    let mut out = format!("## {}\n\n", title);
    for (category, items) in categories {
        out.push_str(&format!("### {}\n\n", category));
        push_bullets(&mut out, "- ", items);
        out.push('\n');
    }
    Rendered::Markdown(out)
}

fn push_bullets<I>(out: &mut String, marker: &str, items: I)
where
    I: IntoIterator,
    I::Item: Display,
{
    for item in items {
        out.push_str(&format!("{}{}\n", marker, item));
    }
}
