// ============================================================
// Layer 4 — Sentence Normaliser
// ============================================================
// Cleans one corpus line before it is tokenised.
//
// Corpus files come from different tools and platforms and may
// contain:
//   - A byte order mark at the start of the file
//   - Carriage returns from Windows line endings
//   - Non-breaking or zero-width spaces
//   - Tabs and other control characters
//   - Runs of spaces between tokens
//
// None of these are meaningful tokens, and some of them would
// not be split off by whitespace tokenisation (zero-width space
// is not whitespace), producing near-duplicate vocabulary entries.
//
// Cleaning steps (applied in order):
//   1. Replace whitespace variants and control chars with a space
//   2. Collapse runs of spaces into one
//   3. Trim leading/trailing spaces
//
// Case is left alone here; lowercasing belongs to the tokenizer.
//
// Reference: Rust Book §8 (Strings in Rust)

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean a single sentence line.
    pub fn clean(&self, line: &str) -> String {
        let mut out        = String::with_capacity(line.len());
        let mut last_space = true; // drops leading spaces

        for c in line.chars() {
            let c = match c {
                '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                c if c.is_control() => ' ',
                c => c,
            };
            if c == ' ' {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        // At most one trailing space can be left behind
        if out.ends_with(' ') {
            out.pop();
        }
        out
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
