use anyhow::{Context, Result};

/// A Gaussian blob of points with a label.
struct Cluster {
    label: &'static str,
    center: (f64, f64),
    spread: f64,
    count: usize,
}

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

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_points.csv".to_string());
    let mut rng = SimpleRng::new(42);

    let clusters = [
        Cluster { label: "core", center: (0.0, 0.0), spread: 0.6, count: 120 },
        Cluster { label: "east", center: (4.0, 1.0), spread: 0.9, count: 80 },
        Cluster { label: "north", center: (-1.0, 5.0), spread: 1.2, count: 60 },
    ];

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["id", "x", "y", "cluster"])?;

    let mut id = 0usize;
    for cluster in &clusters {
        for _ in 0..cluster.count {
            let x = rng.gauss(cluster.center.0, cluster.spread);
            let y = rng.gauss(cluster.center.1, cluster.spread);
            writer.write_record([
                id.to_string(),
                format!("{x:.3}"),
                format!("{y:.3}"),
                cluster.label.to_string(),
            ])?;
            id += 1;
        }
    }

    // A few rows without usable coordinates, to exercise exclusion.
    for (x, y) in [("n/a", "1.0"), ("2.0", "")] {
        writer.write_record([id.to_string(), x.to_string(), y.to_string(), "noise".to_string()])?;
        id += 1;
    }

    writer.flush().context("flushing CSV")?;
    log::info!("Wrote {id} points to {output_path}");
    println!("Wrote {id} points to {output_path}");
    Ok(())
}
