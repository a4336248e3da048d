//! Single-line text field.

/// State for a text input field.
///
/// The cursor counts characters, not bytes, so multi-byte input edits
/// cleanly.
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    content: String,
    cursor: usize,
}

impl TextInput {
    /// Creates a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the content and moves the cursor to the end.
    pub fn set(&mut self, value: &str) {
        self.content = value.to_string();
        self.cursor = self.char_len();
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Deletes the character at the cursor position (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the current content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Returns whether the input is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// One bullet per character, for secrets.
    pub fn masked(&self) -> String {
        "•".repeat(self.char_len())
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_at_cursor() {
        let mut input = TextInput::new();
        for c in "AIza".chars() {
            input.insert(c);
        }
        input.move_left();
        input.backspace();
        assert_eq!(input.as_str(), "AIa");
        input.move_home();
        input.delete();
        assert_eq!(input.as_str(), "Ia");
        input.move_end();
        input.insert('!');
        assert_eq!(input.as_str(), "Ia!");
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut input = TextInput::new();
        input.set("ключ");
        input.backspace();
        assert_eq!(input.as_str(), "клю");
        input.move_home();
        input.move_right();
        input.insert('x');
        assert_eq!(input.as_str(), "кxлю");
        assert_eq!(input.masked(), "••••");
    }
}
