//! Basic Activity Tracking Example
//!
//! Feeds a simulated five-minute session through a pipeline: one minute
//! sitting, two minutes walking, one minute running, one minute cooling
//! down. Prints the classified state and calorie rate every 15 seconds.
//!
//! ## What You'll Learn
//!
//! - Building a pipeline from a configuration
//! - Interleaving samples from three sensor channels
//! - How the 30-second smoother delays state changes
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_tracking
//! ```

use kinetrack_core::{
    constants::STANDARD_GRAVITY_MS2, ActivityPipeline, PipelineConfig, SensorSample, UserProfile,
};

/// (label, linear accel m/s², rotation rad/s, seconds)
const PHASES: [(&str, f32, f32, u64); 4] = [
    ("sitting", 0.2, 0.05, 60),
    ("walking", 3.0, 0.4, 120),
    ("running", 11.0, 2.2, 60),
    ("cooldown", 1.8, 0.2, 60),
];

fn main() {
    println!("KineTrack Basic Tracking Example");
    println!("===============================\n");

    let config = PipelineConfig::default().with_profile(UserProfile::with_weight(68.0));
    let mut pipeline = match ActivityPipeline::new(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Cannot start pipeline: {e}");
            return;
        }
    };

    let mut t = 0u64;
    let mut total_kcal = 0.0f32;

    println!("{:>6}  {:<9} {:>6}  {:<9} {:>9}", "time", "phase", "level", "state", "kcal/min");
    println!("{}", "-".repeat(46));

    for (label, linear, rotation, seconds) in PHASES {
        for _ in 0..seconds {
            // Ten accelerometer samples per second, gyro and light at 1 Hz
            pipeline.process(&SensorSample::light(t, 350.0)).ok();
            pipeline.process(&SensorSample::gyroscope(t, [0.0, rotation, 0.0])).ok();

            for k in 0..10u64 {
                let sway = if k % 2 == 0 { 0.1 } else { -0.1 };
                let accel = [sway, STANDARD_GRAVITY_MS2 + linear, 0.0];

                if let Ok(Some(sample)) =
                    pipeline.process(&SensorSample::accelerometer(t + k * 100, accel))
                {
                    total_kcal += sample.calories_per_minute * sample.elapsed_seconds() / 60.0;

                    if (sample.timestamp_ms / 1000) % 15 == 0 {
                        println!(
                            "{:>5}s  {:<9} {:>6.3}  {:<9} {:>9.2}",
                            sample.timestamp_ms / 1000,
                            label,
                            sample.activity_level,
                            sample.state.label(),
                            sample.calories_per_minute,
                        );
                    }
                }
            }
            t += 1000;
        }
    }

    let metrics = pipeline.metrics();
    println!("\nSession summary");
    println!("---------------");
    println!("Ticks emitted:     {}", metrics.ticks_emitted);
    println!("Samples gated:     {}", metrics.gated_samples);
    println!("Energy burned:     {total_kcal:.1} kcal");
}
