//! Stochastic content generators for test variations
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("RVJSON_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Poisson-like count (simplified)
    pub fn poisson(&mut self, lambda: f64) -> usize {
        let l = (-lambda).exp();
        let mut k = 0;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= self.rng.gen::<f64>();
            if p <= l {
                break;
            }
        }
        k - 1
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Zero or more separator bytes (space, tab, LF, CR)
    pub fn whitespace(&mut self) -> Vec<u8> {
        let chars = b" \t\n\r";
        (0..self.geometric(0.5))
            .map(|_| chars[self.rng.gen_range(0..chars.len())])
            .collect()
    }

    /// Random member name, plain ASCII so it can be made unique cheaply
    pub fn name(&mut self) -> Vec<u8> {
        let len = 1 + self.geometric(0.6);
        let chars = b"abcdefghijklmnopqrstuvwxyz0123456789_";
        let mut name = Vec::with_capacity(len);
        name.push(self.rng.gen_range(b'a'..=b'z'));
        for _ in 1..len {
            name.push(chars[self.rng.gen_range(0..chars.len())]);
        }
        name
    }

    /// Raw string payload (between the quotes), possibly with escapes
    pub fn string_payload(&mut self) -> Vec<u8> {
        let mut out = Vec::new();
        for _ in 0..self.geometric(0.8) {
            match self.rng.gen_range(0..10) {
                0 => out.extend(br#"\""#),
                1 => out.extend(br"\\"),
                2 => out.extend(br"\n"),
                3 => out.extend(br"\u00e9"),
                4 => out.extend("é".as_bytes()),
                _ => match self.rng.gen_range(b' '..=b'~') {
                    b'"' | b'\\' => out.push(b'x'),
                    b => out.push(b),
                },
            }
        }
        out
    }

    /// Random number literal accepted by the JSON grammar
    pub fn number(&mut self) -> Vec<u8> {
        let mut out = Vec::new();
        if self.chance(0.3) {
            out.push(b'-');
        }
        if self.chance(0.2) {
            out.push(b'0');
        } else {
            out.push(self.rng.gen_range(b'1'..=b'9'));
            for _ in 0..self.geometric(0.6) {
                out.push(self.rng.gen_range(b'0'..=b'9'));
            }
        }
        if self.chance(0.4) {
            out.push(b'.');
            out.push(self.rng.gen_range(b'0'..=b'9'));
            for _ in 0..self.geometric(0.6) {
                out.push(self.rng.gen_range(b'0'..=b'9'));
            }
        }
        if self.chance(0.3) {
            out.push(if self.chance(0.5) { b'e' } else { b'E' });
            match self.rng.gen_range(0..3) {
                0 => out.push(b'+'),
                1 => out.push(b'-'),
                _ => {}
            }
            let exp: u32 = self.rng.gen_range(0..40);
            out.extend(exp.to_string().as_bytes());
        }
        out
    }

    /// Random JSON value; containers only while `depth` remains
    pub fn value(&mut self, depth: usize) -> Vec<u8> {
        let pick = if depth == 0 {
            self.rng.gen_range(0..4)
        } else {
            self.rng.gen_range(0..6)
        };
        match pick {
            0 => {
                if self.chance(0.5) {
                    b"true".to_vec()
                } else {
                    b"false".to_vec()
                }
            }
            1 => b"null".to_vec(),
            2 => self.number(),
            3 => {
                let mut out = vec![b'"'];
                out.extend(self.string_payload());
                out.push(b'"');
                out
            }
            4 => self.array(depth - 1),
            _ => self.object(depth - 1),
        }
    }

    pub fn array(&mut self, depth: usize) -> Vec<u8> {
        let mut out = vec![b'['];
        out.extend(self.whitespace());
        let count = self.geometric(0.6);
        for i in 0..count {
            if i > 0 {
                out.push(b',');
                out.extend(self.whitespace());
            }
            out.extend(self.value(depth));
            out.extend(self.whitespace());
        }
        out.push(b']');
        out
    }

    /// Random object with unique member names
    pub fn object(&mut self, depth: usize) -> Vec<u8> {
        let mut out = vec![b'{'];
        out.extend(self.whitespace());
        let count = self.geometric(0.6);
        let mut names: Vec<Vec<u8>> = Vec::with_capacity(count);
        for i in 0..count {
            let mut name = self.name();
            while names.contains(&name) {
                name.push(b'_');
            }
            if i > 0 {
                out.push(b',');
                out.extend(self.whitespace());
            }
            out.push(b'"');
            out.extend(&name);
            out.push(b'"');
            out.extend(self.whitespace());
            out.push(b':');
            out.extend(self.whitespace());
            out.extend(self.value(depth));
            out.extend(self.whitespace());
            names.push(name);
        }
        out.push(b'}');
        out
    }

    /// Random valid document, optionally surrounded by whitespace
    pub fn document(&mut self, depth: usize) -> Vec<u8> {
        let mut out = self.whitespace();
        out.extend(self.object(depth));
        out.extend(self.whitespace());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut g1 = Gen::new(42);
        let mut g2 = Gen::new(42);

        for _ in 0..10 {
            assert_eq!(g1.document(3), g2.document(3));
        }
    }

    #[test]
    fn test_generated_documents_are_valid() {
        let mut gen = Gen::new(7);
        for _ in 0..200 {
            let doc = gen.document(4);
            assert_eq!(
                rvjson_core::validate(&doc),
                Ok(()),
                "{}",
                String::from_utf8_lossy(&doc)
            );
        }
    }
}
