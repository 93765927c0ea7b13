use std::fmt::{self, Write};

pub(crate) const BUILTIN_SCALARS: &[&str] = &["ID", "String", "Int", "Float", "Boolean"];

pub(crate) fn write_quoted(sdl: &mut impl Write, s: &str) -> fmt::Result {
    sdl.write_char('"')?;
    for c in s.chars() {
        match c {
            '\r' => sdl.write_str("\\r"),
            '\n' => sdl.write_str("\\n"),
            '\t' => sdl.write_str("\\t"),
            '\\' => sdl.write_str("\\\\"),
            '"' => sdl.write_str("\\\""),
            c if c.is_control() => write!(sdl, "\\u{:04x}", c as u32),
            c => sdl.write_char(c),
        }?
    }
    sdl.write_char('"')
}

/// A block string description, written at the given indentation.
pub(crate) struct Description<'a>(pub &'a str, pub &'a str);

impl fmt::Display for Description<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Description(description, indentation) = self;

        writeln!(f, r#"{indentation}""""#)?;

        for line in description.trim().lines() {
            let line = line.trim().replace(r#"""""#, r#"\""""#);

            if line.is_empty() {
                writeln!(f)?;
            } else {
                writeln!(f, "{indentation}{line}")?;
            }
        }

        writeln!(f, r#"{indentation}""""#)
    }
}

/// Writes `items` separated by `separator`.
pub(crate) struct Joined<'a, T>(pub &'a [T], pub &'a str);

impl<T: fmt::Display> fmt::Display for Joined<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Joined(items, separator) = self;
        let mut items = items.iter().peekable();

        while let Some(item) = items.next() {
            fmt::Display::fmt(item, f)?;

            if items.peek().is_some() {
                f.write_str(separator)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_block() {
        let rendered = Description("\nFirst line\n\nsecond line  \n", "  ").to_string();

        assert_eq!(rendered, "  \"\"\"\n  First line\n\n  second line\n  \"\"\"\n");
    }

    #[test]
    fn joined() {
        assert_eq!(Joined(&["A", "B", "C"], " | ").to_string(), "A | B | C");
        assert_eq!(Joined::<&str>(&[], ", ").to_string(), "");
    }
}
