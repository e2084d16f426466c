//! Random tree instances in the text input format.

use rand::seq::SliceRandom;
use rand::Rng;
use std::io::{self, Write};

/// Lines of a random `n`-node tree instance.
///
/// Node labels are shuffled and edge orientation is random, so instances
/// exercise both store orientations. Weights are uniform in
/// `-max_weight..=max_weight`.
pub fn random_tree(rng: &mut impl Rng, name: &str, n: usize, max_weight: u32) -> Vec<String> {
    let max_weight = i64::from(max_weight);
    let mut labels: Vec<usize> = (0..n).collect();
    labels.shuffle(rng);

    let mut lines = Vec::with_capacity(2 * n + 1);
    lines.push(format!("p {} {} {}", name, n, (2 * n).saturating_sub(1)));
    for node in 0..n {
        let h = rng.gen_range(-max_weight..=max_weight);
        lines.push(format!("{} {} {}", node, node, h));
    }
    for i in 1..n {
        let (child, parent) = (labels[i], labels[rng.gen_range(0..i)]);
        let j = rng.gen_range(-max_weight..=max_weight);
        let (a, b) = if rng.gen_bool(0.5) { (child, parent) } else { (parent, child) };
        lines.push(format!("{} {} {}", a, b, j));
    }
    lines
}

pub fn write_instance<W: Write>(out: &mut W, comment: &str, lines: &[String]) -> io::Result<()> {
    writeln!(out, "c {}", comment)?;
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
