//! Writes a deterministic sample survey (`sample_data.csv`) shaped like
//! the remote dataset, for offline runs and demos.

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

fn main() {
    let mut rng = SimpleRng::new(42);

    // City, typical net income and typical rent in €/month.
    let cities: [(&str, f64, f64); 10] = [
        ("Amszterdam", 2650.0, 1350.0),
        ("Budapest", 1150.0, 480.0),
        ("Berlin", 2500.0, 1100.0),
        ("Bécs", 2400.0, 950.0),
        ("Lisszabon", 1400.0, 850.0),
        ("Madrid", 1700.0, 900.0),
        ("Prága", 1450.0, 650.0),
        ("Párizs", 2550.0, 1300.0),
        ("Róma", 1800.0, 950.0),
        ("Varsó", 1300.0, 600.0),
    ];
    let years = 2018..=2023;
    let age_groups: [(&str, f64); 4] = [
        ("18-25", 0.75),
        ("26-35", 1.0),
        ("36-45", 1.15),
        ("46-60", 1.25),
    ];
    // Property type, rent multiplier, typical size in m².
    let property_types: [(&str, f64, f64); 3] = [
        ("Garzon", 0.80, 34.0),
        ("Lakás", 1.00, 62.0),
        ("Családi ház", 1.35, 104.0),
    ];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Város",
            "Év",
            "Korosztály",
            "Ingatlantípus",
            "Jövedelem (€/hó)",
            "Bérleti díj (€/hó)",
            "Lakásméret (m²)",
            "Lakhatási arány (%)",
        ])
        .expect("Failed to write header");

    let mut rows: u64 = 0;
    for &(city, base_income, base_rent) in &cities {
        for year in years.clone() {
            let growth = 1.03f64.powi(year - 2018);
            for &(age, income_mul) in &age_groups {
                for &(property_type, rent_mul, base_size) in &property_types {
                    // The survey codes unreported income as zero.
                    let income = if rng.next_f64() < 0.01 {
                        0.0
                    } else {
                        base_income * income_mul * growth
                            + rng.gauss(0.0, base_income * 0.06)
                    };
                    let rent =
                        base_rent * rent_mul * growth + rng.gauss(0.0, base_rent * 0.08);
                    let size = (base_size + rng.gauss(0.0, 6.0)).max(16.0);

                    let stored_ratio = if income > 0.0 {
                        format!("{:.2}", rent / income * 100.0)
                    } else {
                        String::new()
                    };

                    let record = [
                        city.to_string(),
                        year.to_string(),
                        age.to_string(),
                        property_type.to_string(),
                        format!("{:.0}", income.max(0.0)),
                        format!("{:.0}", rent.max(150.0)),
                        format!("{size:.1}"),
                        stored_ratio,
                    ];
                    writer.write_record(&record).expect("Failed to write row");
                    rows += 1;
                }
            }
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} observations to {output_path}");
}
