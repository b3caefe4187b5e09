//! Example usage of the seistrace crate

use seistrace::{find_best_shift, Trace};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Trace Examples ===\n");

    // A synthetic pulse sampled every 0.05 s
    let t: Vec<f64> = (0..200).map(|i| i as f64 * 0.05).collect();
    let amplitude: Vec<f64> = t
        .iter()
        .map(|&t| (-(t - 4.0).powi(2)).exp() * (6.0 * t).sin())
        .collect();
    let record = Trace::new(t, amplitude)?;

    println!("1. Summary:");
    println!(
        "  {} samples, max {:.3} at t = {:.2}, min {:.3} at t = {:.2}",
        record.len(),
        record.max_value(),
        record.x_for_max_value(),
        record.min_value(),
        record.x_for_min_value()
    );
    println!("  mean {:.4}, variance {:.4}", record.mean(), record.variance());

    println!("\n2. Local maxima:");
    for i in record.index_of_upward_convex() {
        println!("  t = {:5.2}  y = {:6.3}", record.x_at(i), record.y_at(i));
    }

    println!("\n3. Cubic interpolation between samples:");
    for c in [3.71, 4.02, 4.33] {
        println!("  f({:.2}) = {:.4}", c, record.to_value(3, c)?);
    }

    println!("\n4. Alignment of a window cut from the record:");
    let window = record.cut_window(3.5, 4.5)?.shift_x(-3.5);
    println!("  window of {} samples fits at shift {:.2} s", window.len(), record.find_best_shift(&window)?);
    println!(
        "  index shift between raw arrays: {}",
        find_best_shift(record.y(), window.y())
    );

    Ok(())
}
