//! Line-oriented table reading shared by every loader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{LexiconError, LexiconResult};

#[derive(Debug, Clone, Copy)]
pub enum Separator {
    Tab,
    Space,
    Whitespace,
}

/// Call `f(line_number, line)` for every non-blank line, 1-based.
/// Returns the number of lines handed to `f`.
pub fn for_each_line<F>(path: &Path, mut f: F) -> LexiconResult<usize>
where
    F: FnMut(usize, &str) -> LexiconResult<()>,
{
    let file = File::open(path).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut count = 0;
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line.trim_end();
        if line.trim_start().is_empty() {
            continue;
        }
        f(idx + 1, line)?;
        count += 1;
    }
    Ok(count)
}

/// Split a line into exactly `arity` fields.
pub fn split_fields<'a>(
    path: &Path,
    line_no: usize,
    line: &'a str,
    sep: Separator,
    arity: usize,
) -> LexiconResult<Vec<&'a str>> {
    let fields: Vec<&str> = match sep {
        Separator::Tab => line.split('\t').collect(),
        Separator::Space => line.split(' ').collect(),
        Separator::Whitespace => line.split_whitespace().collect(),
    };
    if fields.len() != arity {
        return Err(LexiconError::Malformed {
            path: path.to_path_buf(),
            line: line_no,
            reason: format!("expected {} fields, found {}", arity, fields.len()),
        });
    }
    if let Some(pos) = fields.iter().position(|f| f.is_empty()) {
        return Err(LexiconError::Malformed {
            path: path.to_path_buf(),
            line: line_no,
            reason: format!("field {} is empty", pos + 1),
        });
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn skips_blank_lines_and_counts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a\tb").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "c\td").unwrap();

        let mut seen = Vec::new();
        let count = for_each_line(file.path(), |n, line| {
            seen.push((n, line.to_string()));
            Ok(())
        })
        .unwrap();
        assert_eq!(count, 2);
        assert_eq!(seen[1].0, 3);
    }

    #[test]
    fn wrong_arity_is_malformed() {
        let path = Path::new("t.tsv");
        let err = split_fields(path, 4, "only-one", Separator::Tab, 2).unwrap_err();
        assert!(matches!(err, LexiconError::Malformed { line: 4, .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = for_each_line(Path::new("/nonexistent/table.tsv"), |_, _| Ok(())).unwrap_err();
        assert!(matches!(err, LexiconError::Io { .. }));
    }
}
