//! Commands typed at the prompt.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Analyze(String),
    Next,
    Previous,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "analyze" | "a" => Command::Analyze(rest.to_string()),
            "next" | "n" => Command::Next,
            "prev" | "previous" | "p" => Command::Previous,
            "show" | "s" => Command::Show,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ if looks_like_link(word) && rest.is_empty() => Command::Analyze(word.to_string()),
            other => return Err(format!("unknown command '{other}'; type `help`")),
        };
        Ok(Some(command))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Analyze(_) => "analyze",
            Command::Next => "next",
            Command::Previous => "previous",
            Command::Show => "show",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

fn looks_like_link(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

pub const HELP: &str = "\
Commands:
  analyze <url>   analyze a video's comments from the first page
  next | prev     move between pages
  show            print the current result
  help            show this message
  quit            exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_with_url() {
        assert_eq!(
            Command::parse("analyze https://youtu.be/abc"),
            Ok(Some(Command::Analyze("https://youtu.be/abc".into())))
        );
        assert_eq!(
            Command::parse("  A   https://youtu.be/abc  "),
            Ok(Some(Command::Analyze("https://youtu.be/abc".into())))
        );
    }

    #[test]
    fn bare_link_is_an_analyze_command() {
        assert_eq!(
            Command::parse("https://www.youtube.com/watch?v=abc"),
            Ok(Some(Command::Analyze(
                "https://www.youtube.com/watch?v=abc".into()
            )))
        );
    }

    #[test]
    fn analyze_without_url_carries_empty_url() {
        assert_eq!(
            Command::parse("analyze"),
            Ok(Some(Command::Analyze(String::new())))
        );
    }

    #[test]
    fn navigation_aliases() {
        assert_eq!(Command::parse("n"), Ok(Some(Command::Next)));
        assert_eq!(Command::parse("previous"), Ok(Some(Command::Previous)));
        assert_eq!(Command::parse("P"), Ok(Some(Command::Previous)));
        assert_eq!(Command::parse("exit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(Command::parse("   "), Ok(None));
        assert!(Command::parse("dance").is_err());
    }
}
