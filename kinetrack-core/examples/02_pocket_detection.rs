//! Pocket Detection Example
//!
//! Runs the same walk twice, once with the phone in hand and once in a
//! pocket, and compares the resulting activity levels.
//!
//! A phone in a pocket sees less of the wearer's motion. When the ambient
//! light estimate drops below 10 lux and the raw score is above 0.1, fusion
//! scales the score by 1.1 to compensate. Resting in the dark (a phone on a
//! nightstand) is not boosted.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_pocket_detection
//! ```

use kinetrack_core::{
    constants::STANDARD_GRAVITY_MS2, ActivityPipeline, ActivitySample, PipelineConfig,
    PipelineResult, SensorSample,
};

fn walk(lux: f32, linear: f32, seconds: u64) -> PipelineResult<Option<ActivitySample>> {
    let mut pipeline = ActivityPipeline::new(PipelineConfig::default())?;
    let mut last = None;

    for s in 0..seconds {
        let t = s * 1000;
        pipeline.process(&SensorSample::light(t, lux))?;
        pipeline.process(&SensorSample::gyroscope(t, [0.0, 0.0, 0.3]))?;
        if let Some(sample) =
            pipeline.process(&SensorSample::accelerometer(t, [0.0, STANDARD_GRAVITY_MS2 + linear, 0.0]))?
        {
            last = Some(sample);
        }
    }

    Ok(last)
}

fn report(label: &str, result: PipelineResult<Option<ActivitySample>>) {
    match result {
        Ok(Some(s)) => println!(
            "{label:<22} level {:.3}  {:<8}  pocket={}  light={:.1} lux",
            s.activity_level,
            s.state.label(),
            s.in_pocket,
            s.ambient_light,
        ),
        Ok(None) => println!("{label:<22} no ticks"),
        Err(e) => println!("{label:<22} error: {e}"),
    }
}

fn main() {
    println!("KineTrack Pocket Detection Example");
    println!("==================================\n");

    report("Walk, phone in hand", walk(420.0, 3.5, 60));
    report("Walk, phone in pocket", walk(3.0, 3.5, 60));
    report("Still, dark room", walk(3.0, 0.0, 60));
}
