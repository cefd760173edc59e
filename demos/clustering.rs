//! Exact 1-D clustering with a fixed k and with BIC-selected k.

use breaks::{bic, Ckmeans, Clustering};
use rand::prelude::*;

fn main() {
    // Three value groups.
    let x = vec![-1.0, 2.0, -1.0, 2.0, 4.0, 5.0, 6.0, -1.0, 2.0, -1.0];

    // --- Exact k = 3 ---
    let fit = Ckmeans::new(3).fit(&x).unwrap();
    println!("=== Ckmeans (k=3) ===");
    for (i, label) in fit.clustering.iter().enumerate() {
        println!(
            "  point {:2} ({:5.1}) => cluster {} (center {:5.2})",
            i, x[i], label, fit.centers[*label]
        );
    }
    println!(
        "  total_ss = {:.3}, between_ss = {:.3}, BIC = {:.3}",
        fit.total_ss,
        fit.between_ss,
        bic(&x, &fit).unwrap()
    );

    // --- k chosen by BIC over 1..=10 ---
    let mut rng = StdRng::seed_from_u64(42);
    let sample: Vec<f64> = (0..20)
        .map(|i| {
            let center = if i % 2 == 0 { 3.0 } else { 23.0 };
            center + rng.random::<f64>() - 0.5
        })
        .collect();

    let fit = Ckmeans::k_range(1, 10).fit(&sample).unwrap();
    println!("\n=== Ckmeans (k in 1..=10, BIC) ===");
    println!("  picked k = {}", fit.k());
    for (m, center) in fit.centers.iter().enumerate() {
        println!(
            "  cluster {} => center {:6.2}, size {:2}, within_ss {:.4}",
            m, center, fit.sizes[m], fit.within_ss[m]
        );
    }

    // Labels in original order via the trait.
    let labels = Ckmeans::k_range(1, 10).fit_predict(&sample).unwrap();
    println!("  labels: {:?}", labels);
}
