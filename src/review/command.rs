#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Exit,
    Help,
    Summary,
    Clear,
    Review {
        query: String,
        filter: Option<String>,
    },
    Ask(String),
}

impl Command {
    /// Keywords match case-insensitively. Input that is not a command is a
    /// question for the assistant.
    pub fn parse(input: &str) -> Command {
        let input = input.trim();
        if input.is_empty() {
            return Command::Empty;
        }

        let lower = input.to_lowercase();
        match lower.as_str() {
            "exit" | "quit" => return Command::Exit,
            "help" => return Command::Help,
            "summary" => return Command::Summary,
            "clear" => return Command::Clear,
            _ => {}
        }

        if starts_with_word(&lower, "review") {
            let (query, filter) = parse_review(input);
            return Command::Review { query, filter };
        }

        if starts_with_word(&lower, "ask") {
            let question: String = input.chars().skip("ask".len()).collect();
            return Command::Ask(question.trim().to_string());
        }

        Command::Ask(input.to_string())
    }
}

fn starts_with_word(lower: &str, word: &str) -> bool {
    lower.starts_with(word)
        && lower[word.len()..]
            .chars()
            .next()
            .map(char::is_whitespace)
            .unwrap_or(true)
}

/// Splits `review ... --filter <pattern> ...` into the query text and the
/// pattern. The first token after `--filter` is the pattern.
fn parse_review(input: &str) -> (String, Option<String>) {
    let Some((before, after)) = input.split_once("--filter") else {
        return (input.to_string(), None);
    };

    let mut parts = after.trim().splitn(2, char::is_whitespace);
    let filter = parts
        .next()
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    let remaining = parts.next().unwrap_or("").trim();

    let query = format!("{} {}", before.trim(), remaining).trim().to_string();
    (query, filter)
}
