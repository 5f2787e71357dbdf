//! Useful character extensions.
pub trait CharExt {
    fn is_identifier_start(&self) -> bool;

    fn is_identifier_continue(&self) -> bool;

    fn is_numeral_part(&self) -> bool;

    fn is_linebreak(&self) -> bool;

    fn is_not_linebreak(&self) -> bool {
        !self.is_linebreak()
    }
}
impl CharExt for char {
    fn is_identifier_start(&self) -> bool {
        self.is_ascii_alphabetic() || *self == '_'
    }

    fn is_identifier_continue(&self) -> bool {
        self.is_ascii_alphanumeric() || *self == '_'
    }

    fn is_numeral_part(&self) -> bool {
        self.is_ascii_digit() || *self == '.'
    }

    fn is_linebreak(&self) -> bool {
        *self == '\n'
    }
}
