//! Image assembly
//!
//! Every pixel is an independent task: build its ray, march it, shade it and
//! write the result into the pixel's own 4-byte slot of the output buffer.
//! Slots are disjoint, so the parallel pass needs no locking; the scene is
//! only ever read.
//!
//! Uses Rayon for the parallel pass. With [`RenderConfig::threads`] set, the
//! pass runs on a dedicated pool of that size instead of the global one.

use crate::camera::{PixelTask, RayMapping};
use crate::config::RenderConfig;
use crate::march::{MarchOutcome, Marcher};
use crate::scene::Scene;
use crate::Result;
use image::RgbaImage;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

const CHANNELS: usize = 4;

/// Counts gathered while rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub pixels: u64,
    pub hits: u64,
    pub misses: u64,
    /// Scene queries made by all rays together
    pub steps: u64,
    pub elapsed: Duration,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    steps: AtomicU64,
}

impl Counters {
    fn record(&self, outcome: &MarchOutcome) {
        let counter = if outcome.is_hit() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);

        let steps = match outcome {
            MarchOutcome::Hit(hit) => hit.steps,
            MarchOutcome::Exhausted { steps, .. } => *steps,
        };
        self.steps.fetch_add(u64::from(steps), Ordering::Relaxed);
    }

    fn finish(self, elapsed: Duration) -> RenderStats {
        let hits = self.hits.into_inner();
        let misses = self.misses.into_inner();
        RenderStats {
            pixels: hits + misses,
            hits,
            misses,
            steps: self.steps.into_inner(),
            elapsed,
        }
    }
}

/// Render `scene` in parallel
pub fn render<M: RayMapping + ?Sized>(
    scene: &Scene,
    camera: &M,
    config: &RenderConfig,
) -> Result<RgbaImage> {
    render_with_stats(scene, camera, config).map(|(image, _)| image)
}

/// Render `scene` in parallel and report hit/miss counts
pub fn render_with_stats<M: RayMapping + ?Sized>(
    scene: &Scene,
    camera: &M,
    config: &RenderConfig,
) -> Result<(RgbaImage, RenderStats)> {
    config.validate()?;
    info!(
        width = config.width,
        height = config.height,
        shapes = scene.len(),
        threads = ?config.threads,
        "Rendering"
    );

    let marcher = Marcher::new(scene, config.march);
    debug!(
        pixels = config.pixel_count(),
        max_iterations = marcher.config().max_iterations,
        normal_mode = ?marcher.config().normal_mode,
        "Marcher ready"
    );
    let counters = Counters::default();
    let mut image = RgbaImage::new(config.width, config.height);
    let start = Instant::now();

    {
        let buffer: &mut [u8] = &mut image;
        match config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("umbra-worker-{i}"))
                    .build()?;
                debug!(threads, "Created worker pool");
                pool.install(|| fill_parallel(buffer, config, camera, &marcher, &counters))?;
            }
            None => fill_parallel(buffer, config, camera, &marcher, &counters)?,
        }
    }

    let stats = counters.finish(start.elapsed());
    report(&stats);
    Ok((image, stats))
}

/// Render `scene` on the calling thread; produces the same image as [`render`]
pub fn render_sequential<M: RayMapping + ?Sized>(
    scene: &Scene,
    camera: &M,
    config: &RenderConfig,
) -> Result<(RgbaImage, RenderStats)> {
    config.validate()?;
    info!(
        width = config.width,
        height = config.height,
        shapes = scene.len(),
        "Rendering on a single thread"
    );

    let marcher = Marcher::new(scene, config.march);
    debug!(
        pixels = config.pixel_count(),
        max_iterations = marcher.config().max_iterations,
        normal_mode = ?marcher.config().normal_mode,
        "Marcher ready"
    );
    let counters = Counters::default();
    let mut image = RgbaImage::new(config.width, config.height);
    let start = Instant::now();

    let buffer: &mut [u8] = &mut image;
    buffer
        .chunks_exact_mut(CHANNELS)
        .enumerate()
        .try_for_each(|(index, slot)| {
            render_pixel(index, slot, config, camera, &marcher, &counters)
        })?;

    let stats = counters.finish(start.elapsed());
    report(&stats);
    Ok((image, stats))
}

fn fill_parallel<M: RayMapping + ?Sized>(
    buffer: &mut [u8],
    config: &RenderConfig,
    camera: &M,
    marcher: &Marcher<'_>,
    counters: &Counters,
) -> Result<()> {
    buffer
        .par_chunks_exact_mut(CHANNELS)
        .enumerate()
        .try_for_each(|(index, slot)| render_pixel(index, slot, config, camera, marcher, counters))
}

fn render_pixel<M: RayMapping + ?Sized>(
    index: usize,
    slot: &mut [u8],
    config: &RenderConfig,
    camera: &M,
    marcher: &Marcher<'_>,
    counters: &Counters,
) -> Result<()> {
    let task = PixelTask::from_index(index, config.width, config.height, camera)?;
    let outcome = marcher.march(&task.ray);
    counters.record(&outcome);
    slot.copy_from_slice(&marcher.shade(&outcome).0);
    Ok(())
}

fn report(stats: &RenderStats) {
    debug!(
        hits = stats.hits,
        misses = stats.misses,
        steps = stats.steps,
        "Render statistics"
    );
    info!(
        pixels = stats.pixels,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "Render finished"
    );
}
