// src/model/composition.rs

/// Element counts, kept in first-appearance order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Composition {
    counts: Vec<(String, usize)>,
}

impl Composition {
    pub fn from_species<'a>(species: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for el in species {
            match counts.iter_mut().find(|(name, _)| name == el) {
                Some((_, n)) => *n += 1,
                None => counts.push((el.to_string(), 1)),
            }
        }
        Self { counts }
    }

    pub fn num_atoms(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Full formula, e.g. "H100 O50".
    pub fn formula(&self) -> String {
        self.counts
            .iter()
            .map(|(el, n)| format!("{}{}", el, n))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Formula divided by the common factor, counts of one omitted, e.g. "H2O".
    pub fn reduced_formula(&self) -> String {
        let divisor = self.counts.iter().fold(0, |acc, &(_, n)| gcd(acc, n)).max(1);
        self.counts
            .iter()
            .map(|(el, n)| {
                let n = n / divisor;
                if n > 1 {
                    format!("{}{}", el, n)
                } else {
                    el.clone()
                }
            })
            .collect()
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}
