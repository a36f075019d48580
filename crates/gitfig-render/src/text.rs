use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

pub const FONT_FAMILY_BODY: &str = "Segoe UI, Arial, sans-serif";
pub const FONT_FAMILY_MONO: &str = "Consolas, Cascadia Mono, monospace";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-free measurer: width from display-cell counts, height from a fixed
/// line-height factor. Deterministic across platforms, which is what keeps the
/// rendered markup byte-for-byte reproducible.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let font_size = style.font_size.max(1.0);
        let lines: Vec<&str> = text.split('\n').collect();
        let mut max_cells = 0usize;
        for line in &lines {
            max_cells = max_cells.max(line.width());
        }

        TextMetrics {
            width: max_cells as f64 * font_size * char_width_factor,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}

/// Measures `text` with one extra trailing character of advance, reserving a
/// right-hand inner margin. All layout-facing widths go through this.
pub fn measure_padded(measurer: &dyn TextMeasurer, text: &str, style: &TextStyle) -> TextMetrics {
    let mut padded = String::with_capacity(text.len() + 1);
    padded.push_str(text);
    padded.push('Z');
    measurer.measure(&padded, style)
}

fn split_tokens(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut in_whitespace = false;
    for ch in text.chars() {
        if ch == '/' || ch == '\\' {
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
            in_whitespace = false;
            out.push(ch.to_string());
        } else if ch.is_whitespace() {
            if !in_whitespace && !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
            in_whitespace = true;
            cur.push(ch);
        } else {
            if in_whitespace && !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
            in_whitespace = false;
            cur.push(ch);
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// Greedy wrap on whitespace and path separators; a single token wider than
/// `max_width_px` is hard-wrapped per character.
pub fn wrap_text_px(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: &TextStyle,
    max_width_px: f64,
) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for tok in split_tokens(text) {
        let candidate = format!("{cur}{tok}");
        if measure_padded(measurer, &candidate, style).width <= max_width_px {
            cur = candidate;
            continue;
        }

        if !cur.trim().is_empty() {
            lines.push(cur.trim_end().to_string());
            cur.clear();
        }
        if tok.trim().is_empty() {
            // Never start a line with whitespace.
            continue;
        }
        if measure_padded(measurer, &tok, style).width <= max_width_px {
            cur = tok;
            continue;
        }

        // Token alone is too wide even for an empty line.
        let mut buf = String::new();
        for ch in tok.chars() {
            let grown = format!("{buf}{ch}");
            if measure_padded(measurer, &grown, style).width <= max_width_px {
                buf = grown;
            } else {
                if !buf.is_empty() {
                    lines.push(buf);
                }
                buf = ch.to_string();
            }
        }
        cur = buf;
    }
    if !cur.trim().is_empty() {
        lines.push(cur.trim_end().to_string());
    }

    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

/// Middle-ellipsis shortening: keeps roughly 60% of the head and 40% of the
/// tail, trimming the longer side first until the text fits `max_width_px`.
pub fn shorten_middle(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: &TextStyle,
    max_width_px: f64,
) -> String {
    if text.is_empty() {
        return String::new();
    }
    if measure_padded(measurer, text, style).width <= max_width_px {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let split = (chars.len() as f64 * 0.6) as usize;
    let mut head: Vec<char> = chars[..split].to_vec();
    let mut tail: Vec<char> = chars[split..].to_vec();

    let joined = |head: &[char], tail: &[char]| -> String {
        let mut s = String::with_capacity(head.len() + tail.len() + 3);
        s.extend(head.iter());
        s.push('…');
        s.extend(tail.iter());
        s
    };

    while measure_padded(measurer, &joined(&head, &tail), style).width > max_width_px
        && (head.len() > 1 || tail.len() > 1)
    {
        if head.len() >= tail.len() && head.len() > 1 {
            head.pop();
        } else if tail.len() > 1 {
            tail.remove(0);
        } else {
            break;
        }
    }

    joined(&head, &tail)
}
