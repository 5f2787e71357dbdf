use super::Name;

/// Hands out temporary names, counting up from `t0`.
pub struct NameGenerator {
    index: usize,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self { index: 0 }
    }

    /// Generates a new unique temporary name.
    pub fn next_temp(&mut self) -> Name {
        let name = Name::Temp(self.index);
        self.index += 1;
        name
    }
}
