//! Writes a deterministic `soja_dashboard_final.csv` for local development:
//! three years of daily soybean prices with a seasonal cycle, a correlated
//! PTAX series and the crop-calendar phase labels the dashboard expects.

use anyhow::{Context, Result};
use chrono::{Datelike, Days, NaiveDate};

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

/// Southern-hemisphere soy calendar, keyed by month.
fn phase_for_month(month: u32) -> &'static str {
    match month {
        9..=11 => "1.Plantio",
        12 | 1 | 2 => "2.Crescimento",
        3..=5 => "3.Colheita",
        _ => "4.Entressafra",
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

    let output_path = "soja_dashboard_final.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "data",
        "preco_soja_brl",
        "dolar_ptax",
        "status_safra",
        "var_soja_pct",
        "var_dolar_pct",
    ])?;

    let mut price = 150.0_f64;
    let mut fx = 5.0_f64;
    let mut prev_price = price;
    let mut prev_fx = fx;
    let mut rows = 0usize;

    let mut date = start;
    while date <= end {
        let day_of_year = date.ordinal() as f64;
        // Harvest pressure pulls prices down mid-year, planting season pulls
        // them back up; the dollar drifts with its own noise and leaks into
        // the soy price.
        let seasonal = 8.0 * (2.0 * std::f64::consts::PI * (day_of_year - 60.0) / 365.0).sin();
        fx = (fx + rng.gauss(0.0, 0.02)).clamp(4.2, 6.2);
        price = (140.0 + seasonal + 18.0 * (fx - 5.0) + rng.gauss(0.0, 1.2)).max(80.0);

        let price_pct = (price - prev_price) / prev_price * 100.0;
        let fx_pct = (fx - prev_fx) / prev_fx * 100.0;

        writer.write_record([
            date.format("%Y-%m-%d").to_string(),
            format!("{price:.2}"),
            format!("{fx:.4}"),
            phase_for_month(date.month()).to_string(),
            format!("{price_pct:.4}"),
            format!("{fx_pct:.4}"),
        ])?;

        prev_price = price;
        prev_fx = fx;
        rows += 1;
        date = date
            .checked_add_days(Days::new(1))
            .context("date overflow")?;
    }

    writer.flush()?;
    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
