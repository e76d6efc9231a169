use anyhow::{Context, Result};
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

#[derive(Serialize)]
struct Row {
    inputs: String,
    outputs: String,
    labels: String,
}

/// One of the cell shapes the viewer skips: empty, non-numeric or zero.
fn bad_cell(rng: &mut SimpleRng) -> String {
    match rng.next_u64() % 3 {
        0 => String::new(),
        1 => "n/a?".to_string(),
        _ => "0".to_string(),
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let groups = [("Sample_A", 1.8, 0.5), ("Sample_B", 0.9, 2.0), ("Sample_C", -1.2, 4.0)];
    let per_group = 40;

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut written = 0usize;
    let mut corrupted = 0usize;
    for &(label, slope, intercept) in &groups {
        for i in 0..per_group {
            let x = 0.5 + i as f64 * 0.25;
            let y = slope * x + intercept + rng.gauss(0.0, 0.3);

            let mut inputs = format!("{x:.3}");
            let mut outputs = format!("{y:.3}");
            // Roughly one row in ten gets a bad cell.
            if rng.next_f64() < 0.1 {
                if rng.next_u64() % 2 == 0 {
                    inputs = bad_cell(&mut rng);
                } else {
                    outputs = bad_cell(&mut rng);
                }
                corrupted += 1;
            }

            writer
                .serialize(Row {
                    inputs,
                    outputs,
                    labels: format!("{label}_{i:02}"),
                })
                .context("writing sample row")?;
            written += 1;
        }
    }
    writer.flush().context("flushing sample file")?;

    println!("Wrote {written} records ({corrupted} with a bad cell) to {output_path}");
    Ok(())
}
