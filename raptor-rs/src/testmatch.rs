use regex::Regex;

/// Selects suites and tests by name from a `suite/test` pattern.
///
/// Both halves are case-insensitive regular expressions. Slashes inside
/// brackets or parentheses do not split the pattern.
#[derive(Clone, Debug)]
pub struct TestMatcher {
    pub suite: Regex,
    pub test: Regex,
    pub pattern: String,
}

impl TestMatcher {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let parts = Self::split_regexp(pattern);
        let suite = Regex::new(&format!("(?i:{})", parts[0]))?;
        let test = if parts.len() > 1 {
            Regex::new(&format!("(?i:{})", parts[1..].join("/")))?
        } else {
            Regex::new("")?
        };
        Ok(Self {
            suite,
            test,
            pattern: pattern.to_string(),
        })
    }

    pub fn match_test(&self, suite: &str, test: &str) -> bool {
        if !self.suite.is_match(suite) {
            return false;
        }

        if !test.is_empty() && !self.test.is_match(test) {
            return false;
        }

        true
    }

    /// split_regexp splits the pattern into /-separated parts.
    fn split_regexp(pattern: &str) -> Vec<&str> {
        let mut parts = Vec::with_capacity(pattern.matches('/').count() + 1);
        let mut square_bracket_counter = 0usize;
        let mut parenthesis_counter = 0isize;
        let mut start = 0;
        let mut escaped = false;

        for (index, character) in pattern.char_indices() {
            if escaped {
                escaped = false;
                continue;
            }
            match character {
                '[' => square_bracket_counter += 1,
                ']' => square_bracket_counter = square_bracket_counter.saturating_sub(1),
                '(' if square_bracket_counter == 0 => parenthesis_counter += 1,
                ')' if square_bracket_counter == 0 => parenthesis_counter -= 1,
                '\\' => escaped = true,
                '/' if square_bracket_counter == 0 && parenthesis_counter == 0 => {
                    parts.push(&pattern[start..index]);
                    start = index + 1;
                }
                _ => {}
            }
        }
        parts.push(&pattern[start..]);
        parts
    }
}
