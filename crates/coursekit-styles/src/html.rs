//! HTML helpers

use crate::rendered::Rendered;
use crate::theme::Palette;

/// Bootstrap alert flavours understood by the notebook stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertKind {
    #[default]
    Info,
    Warning,
    Success,
    Danger,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Info => "info",
            AlertKind::Warning => "warning",
            AlertKind::Success => "success",
            AlertKind::Danger => "danger",
        }
    }
}

/// Styled alert box
pub fn alert(message: &str, kind: AlertKind) -> Rendered {
    Rendered::Html(format!(
        "<div class=\"alert alert-{}\" role=\"alert\">\n    {}\n</div>\n",
        kind.as_str(),
        message
    ))
}

/// Collapsible solution block
pub fn solution(code: &str, explanation: Option<&str>) -> Rendered {
    let explanation = match explanation {
        Some(text) if !text.is_empty() => {
            format!("<p><b>Explanation:</b> {}</p>\n\n", text)
        }
        _ => String::new(),
    };
    Rendered::Html(format!(
        "<details>\n<summary><b>Click to see solution</b></summary>\n\n```python\n{}\n```\n\n{}</details>\n",
        code, explanation
    ))
}

/// Horizontal progress bar with a `current/total (P%)` caption.
///
/// A zero `total` renders as 0%.
pub fn progress_bar(current: u64, total: u64, label: &str) -> Rendered {
    let percentage = if total == 0 {
        0.0
    } else {
        current as f64 / total as f64 * 100.0
    };

    Rendered::Html(format!(
        concat!(
            "<div style=\"margin: 10px 0;\">\n",
            "    <p><strong>{label}:</strong> {current}/{total} ({pct:.1}%)</p>\n",
            "    <div style=\"width: 100%; background-color: #f0f0f0; border-radius: 5px; overflow: hidden;\">\n",
            "        <div style=\"width: {pct}%; background-color: {fill}; height: 20px; transition: width 0.3s;\"></div>\n",
            "    </div>\n",
            "</div>\n"
        ),
        label = label,
        current = current,
        total = total,
        pct = percentage,
        fill = Palette::Primary.hex(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert() {
        let rendered = alert("Careful!", AlertKind::Warning);
        assert_eq!(rendered.mime_type(), "text/html");
        assert!(rendered
            .body()
            .starts_with("<div class=\"alert alert-warning\" role=\"alert\">"));
        assert!(rendered.body().contains("Careful!"));
    }

    #[test]
    fn test_solution_with_and_without_explanation() {
        let with = solution("x = 1", Some("assigns one"));
        assert!(with.body().contains("```python\nx = 1\n```"));
        assert!(with.body().contains("<p><b>Explanation:</b> assigns one</p>"));

        let without = solution("x = 1", None);
        assert!(!without.body().contains("Explanation"));
        assert!(without.body().ends_with("</details>\n"));
    }

    #[test]
    fn test_progress_bar_caption() {
        let rendered = progress_bar(1, 3, "Progress");
        assert!(rendered
            .body()
            .contains("<strong>Progress:</strong> 1/3 (33.3%)"));
        assert!(rendered.body().contains("background-color: #3498db"));
    }

    #[test]
    fn test_progress_bar_zero_total() {
        let rendered = progress_bar(0, 0, "Done");
        assert!(rendered.body().contains("0/0 (0.0%)"));
        assert!(rendered.body().contains("width: 0%;"));
    }
}
