// Reel Scout Script Input
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Where the script text comes from: an inline argument, a file, or stdin.

use std::io::{self, BufRead};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl ScriptSource {
    /// Inline text wins over a file; neither means stdin.
    pub fn pick(script: Option<String>, file: Option<PathBuf>) -> Self {
        match (script, file) {
            (Some(text), _) => ScriptSource::Inline(text),
            (None, Some(path)) => ScriptSource::File(path),
            (None, None) => ScriptSource::Stdin,
        }
    }

    pub fn read(&self) -> io::Result<String> {
        match self {
            ScriptSource::Inline(text) => Ok(text.trim().to_string()),
            ScriptSource::File(path) => Ok(std::fs::read_to_string(path)?.trim().to_string()),
            ScriptSource::Stdin => {
                eprintln!("Paste your reel script, then press Enter twice:");
                read_script(io::stdin().lock())
            }
        }
    }
}

/// Read lines until two consecutive blank lines or EOF.
pub fn read_script<R: BufRead>(reader: R) -> io::Result<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut blank_run = 0;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run >= 2 {
                break;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }

    Ok(lines.join("\n").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_stops_at_double_blank_line() {
        let input = "Morning coffee.\n\nThen a run.\n\n\nignored tail\n";
        let script = read_script(Cursor::new(input)).unwrap();
        assert_eq!(script, "Morning coffee.\n\nThen a run.");
    }

    #[test]
    fn test_reads_to_eof() {
        let script = read_script(Cursor::new("one line")).unwrap();
        assert_eq!(script, "one line");
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert_eq!(read_script(Cursor::new("\n   \n")).unwrap(), "");
    }

    #[test]
    fn test_source_priority() {
        let file = PathBuf::from("script.txt");
        assert_eq!(
            ScriptSource::pick(Some("hi".into()), Some(file.clone())),
            ScriptSource::Inline("hi".into())
        );
        assert_eq!(ScriptSource::pick(None, Some(file.clone())), ScriptSource::File(file));
        assert_eq!(ScriptSource::pick(None, None), ScriptSource::Stdin);
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.txt");
        std::fs::write(&path, "  city at night \n").unwrap();
        assert_eq!(ScriptSource::File(path).read().unwrap(), "city at night");
    }
}
