// Number and text formatting for SVG attributes.

use std::fmt::Write as _;

/// Attribute number: round-trippable decimal without `-0` or float noise.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Num(pub f64);

impl std::fmt::Display for Num {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut v = self.0;
        if !v.is_finite() {
            return f.write_str("0");
        }

        if v.abs() < 1e-9 {
            v = 0.0;
        }
        let nearest = v.round();
        if (v - nearest).abs() < 1e-6 {
            v = nearest;
        }
        if v == -0.0 {
            v = 0.0;
        }

        write!(f, "{v}")
    }
}

/// Path coordinates use three fractional digits, rounded half-up.
pub(crate) fn fmt_path_into(out: &mut String, v: f64) {
    if !v.is_finite() || v.abs() < 0.0005 {
        out.push('0');
        return;
    }

    let k = (v * 1000.0 + 0.5).floor() as i64;
    append_fixed_3dp_trimmed(out, k);
}

fn append_fixed_3dp_trimmed(out: &mut String, k: i64) {
    if k == 0 {
        out.push('0');
        return;
    }

    if k.is_negative() {
        out.push('-');
    }
    let abs = k.unsigned_abs();
    let _ = write!(out, "{}", abs / 1000);

    let frac = abs % 1000;
    if frac == 0 {
        return;
    }
    let digits = format!("{frac:03}");
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}

/// Escapes markup and replaces characters XML 1.0 cannot carry with U+FFFD.
pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if is_xml_char(c) => out.push(c),
            _ => out.push('\u{FFFD}'),
        }
    }
}

fn is_xml_char(c: char) -> bool {
    !(c < '\u{20}' || c == '\u{FFFE}' || c == '\u{FFFF}')
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

/// Keeps ids usable inside CSS selectors and `id` attributes.
pub(crate) fn sanitize_id(raw: &str) -> String {
    let out: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if out.is_empty() {
        "wordtree".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(v: f64) -> String {
        Num(v).to_string()
    }

    #[test]
    fn num_hides_noise_and_negative_zero() {
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(1.0000004), "1");
        assert_eq!(fmt(-1.0000004), "-1");
        assert_eq!(fmt(12.5), "12.5");
        assert_eq!(fmt(-1e-12), "0");
    }

    #[test]
    fn path_numbers_use_three_digits() {
        let cases = [
            (0.0, "0"),
            (-0.0004, "0"),
            (1.0, "1"),
            (1.23456, "1.235"),
            (-1.23456, "-1.235"),
            (240.1, "240.1"),
            (-0.5, "-0.5"),
        ];
        for (v, want) in cases {
            let mut s = String::new();
            fmt_path_into(&mut s, v);
            assert_eq!(s, want, "{v}");
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_xml(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn control_characters_become_replacement_chars() {
        assert_eq!(escape_xml("bell\u{7}char"), "bell\u{FFFD}char");
        assert_eq!(escape_xml("a\u{0}b\u{1F}c"), "a\u{FFFD}b\u{FFFD}c");
        assert_eq!(escape_xml("\u{FFFE}\u{FFFF}"), "\u{FFFD}\u{FFFD}");
        assert_eq!(escape_xml("tab\tline\nret\r"), "tab\tline\nret\r");
        assert_eq!(escape_xml("caf\u{e9} \u{6f22}"), "caf\u{e9} \u{6f22}");
    }

    #[test]
    fn ids_are_sanitized() {
        assert_eq!(sanitize_id("my tree#1"), "my-tree-1");
        assert_eq!(sanitize_id(""), "wordtree");
    }
}
