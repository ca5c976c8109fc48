use rand::Rng;

/// Source of component ids.
///
/// The editor takes one of these by injection so tests can use
/// deterministic ids.
pub trait IdSource {
    fn new_id(&mut self) -> String;
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Collision-resistant ids: counter + millisecond timestamp + random suffix.
///
/// Not cryptographic.
#[derive(Debug, Clone, Default)]
pub struct IDGenerator {
    count: u64,
}

impl IDGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for IDGenerator {
    fn new_id(&mut self) -> String {
        self.count += 1;

        let timestamp = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let mut rng = rand::rng();
        let suffix: String = (0..6)
            .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
            .collect();

        format!("comp-{}-{}-{}", to_base36(timestamp), self.count, suffix)
    }
}

/// Sequential `<seed>-<n>` ids
#[derive(Debug, Clone)]
pub struct SequentialIds {
    seed: String,
    count: u32,
}

impl SequentialIds {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl IdSource for SequentialIds {
    fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_ids() {
        let mut gen = SequentialIds::new("doc");

        let id1 = gen.new_id();
        let id2 = gen.new_id();
        let id3 = gen.new_id();

        assert_eq!(id1, "doc-1");
        assert_eq!(id2, "doc-2");
        assert_eq!(id3, "doc-3");
        assert_eq!(gen.seed(), "doc");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut gen = IDGenerator::new();
        let ids: HashSet<String> = (0..1000).map(|_| gen.new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generated_id_shape() {
        let mut gen = IDGenerator::new();
        let id = gen.new_id();
        let parts: Vec<&str> = id.split('-').collect();

        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "comp");
        assert_eq!(parts[2], "1");
        assert_eq!(parts[3].len(), 6);
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
