//! Live adapter for the `IdGenerator` port.

use uuid::Uuid;

use crate::ports::{IdGenerator, ID_LEN};

/// The first [`ID_LEN`] hex digits of a random v4 UUID, i.e. 32 bits of
/// entropy per id.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate_id(&self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(ID_LEN);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_short_lowercase_hex() {
        for _ in 0..100 {
            let id = RandomIdGenerator.generate_id();
            assert_eq!(id.len(), ID_LEN);
            assert!(id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')), "{id}");
        }
    }
}
