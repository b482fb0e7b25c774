/// A single-line text buffer with a cursor.  The cursor is a char index in
/// `0..=len`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Create a buffer holding `value` with the cursor at the end
    pub fn new<S: Into<String>>(value: S) -> TextInput {
        let value = value.into();
        let cursor = value.chars().count();
        TextInput { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the contents and move the cursor to the end
    pub fn set<S: Into<String>>(&mut self, value: S) {
        *self = TextInput::new(value);
    }

    pub fn insert(&mut self, ch: char) {
        let i = self.byte_index(self.cursor);
        self.value.insert(i, ch);
        self.cursor += 1;
    }

    // The editing methods below return `false` if there was nothing to do

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let i = self.byte_index(self.cursor);
        self.value.remove(i);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let i = self.byte_index(self.cursor);
        self.value.remove(i);
        true
    }

    pub fn left(&mut self) -> bool {
        if self.cursor == 0 {
            false
        } else {
            self.cursor -= 1;
            true
        }
    }

    pub fn right(&mut self) -> bool {
        if self.cursor >= self.len() {
            false
        } else {
            self.cursor += 1;
            true
        }
    }

    pub fn home(&mut self) -> bool {
        std::mem::replace(&mut self.cursor, 0) != 0
    }

    pub fn end(&mut self) -> bool {
        let len = self.len();
        std::mem::replace(&mut self.cursor, len) != len
    }

    /// Split the text around the cursor into the text before it, the
    /// character under it (if any), and the text after it
    pub fn split_at_cursor(&self) -> (&str, Option<char>, &str) {
        let i = self.byte_index(self.cursor);
        let (before, rest) = self.value.split_at(i);
        let mut chars = rest.chars();
        let under = chars.next();
        (before, under, chars.as_str())
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_puts_cursor_at_end() {
        let input = TextInput::new("2024-01-15");
        assert_eq!(input.value(), "2024-01-15");
        assert_eq!(input.cursor(), 10);
        assert_eq!(input.split_at_cursor(), ("2024-01-15", None, ""));
    }

    #[test]
    fn test_edit_in_middle() {
        let mut input = TextInput::new("2024-01-15");
        assert!(input.left());
        assert!(input.left());
        assert!(input.left());
        assert!(input.backspace());
        assert_eq!(input.value(), "2024-0-15");
        input.insert('2');
        assert_eq!(input.value(), "2024-02-15");
        assert_eq!(input.split_at_cursor(), ("2024-02", Some('-'), "15"));
        assert!(input.delete());
        assert_eq!(input.value(), "2024-0215");
    }

    #[test]
    fn test_bounds() {
        let mut input = TextInput::new("ab");
        assert!(!input.right());
        assert!(!input.delete());
        assert!(input.home());
        assert!(!input.home());
        assert!(!input.left());
        assert!(!input.backspace());
        assert!(input.end());
        assert!(!input.end());
    }

    #[test]
    fn test_multibyte() {
        let mut input = TextInput::new("1er août");
        assert!(input.backspace());
        assert!(input.left());
        assert!(input.backspace());
        assert_eq!(input.value(), "1er aû");
        input.insert('o');
        assert_eq!(input.value(), "1er aoû");
        assert_eq!(input.split_at_cursor(), ("1er ao", Some('û'), ""));
    }

    #[test]
    fn test_set_replaces_contents() {
        let mut input = TextInput::new("garbage");
        input.home();
        input.set("2024-01-15");
        assert_eq!(input.value(), "2024-01-15");
        assert_eq!(input.cursor(), 10);
    }
}
