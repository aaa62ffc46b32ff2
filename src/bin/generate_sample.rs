use std::f64::consts::PI;
use std::path::Path;

use anyhow::Result;
use spectral_analysis::data::loader::write_trace;
use spectral_analysis::import_trace;

/// Unbalanced MZI transmission in dBm.
///
/// Transmission minima sit at `notch + k * fsr`; `extinction` is the linear
/// floor relative to the 1 mW peak.
fn mzi_dbm(wavelength: f64, notch: f64, fsr: f64, extinction: f64) -> f64 {
    let phase = 2.0 * PI * (wavelength - notch) / fsr;
    let linear_mw = extinction + (1.0 - extinction) * 0.5 * (1.0 - phase.cos());
    10.0 * linear_mw.log10()
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
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    // 1480 → 1515 nm, 10 pm step
    let wavelengths: Vec<f64> = (0..=3500).map(|i| 1480.0 + i as f64 * 0.01).collect();

    // One file per temperature step; the notch drifts 80 pm per step.
    let fsr = 12.4;
    let notch_at_start = 1494.2;
    let drift_per_step = 0.08;

    for step in 0..4 {
        let notch = notch_at_start + drift_per_step * step as f64;
        let trace = import_trace(wavelengths.iter().map(|&wl| {
            let dbm = mzi_dbm(wl, notch, fsr, 0.003) + rng.gauss(0.0, 0.05);
            (wl, dbm)
        }))?;

        let name = format!("mzi_step{}.csv", step + 1);
        write_trace(Path::new(&name), &trace)?;
        println!("Wrote {name}: {} samples, notch at {notch:.3} nm", trace.len());
    }

    println!("FSR {fsr} nm, drift {drift_per_step} nm per step");
    Ok(())
}
