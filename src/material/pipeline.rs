use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::{
    effects::{
        blur::BlurConfig,
        composite::{Layer, LayerAlignment, composite},
        saturation::saturate,
        scale::{check_scale_factor, scale},
    },
    foundation::{
        core::{ArgbColor, PixelBuffer},
        error::{AcrylicError, AcrylicResult},
    },
    material::config::Configuration,
};

/// Lifecycle of one generation. `Done` and `Failed` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Configuring,
    Validating,
    Scaling,
    Blurring,
    Saturating,
    Compositing,
    Done,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Instrumentation hook around a pipeline run. Both callbacks default to no-ops.
pub trait PipelineObserver {
    fn on_transition(&mut self, _from: Stage, _to: Stage) {}

    /// Called exactly once, after the terminal transition.
    fn on_finish(&mut self, _result: Result<&PixelBuffer, &AcrylicError>, _elapsed: Duration) {}
}

impl<T: PipelineObserver + ?Sized> PipelineObserver for &mut T {
    fn on_transition(&mut self, from: Stage, to: Stage) {
        (**self).on_transition(from, to);
    }

    fn on_finish(&mut self, result: Result<&PixelBuffer, &AcrylicError>, elapsed: Duration) {
        (**self).on_finish(result, elapsed);
    }
}

/// Default observer: stage changes at `debug`, elapsed time at `info`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_transition(&mut self, from: Stage, to: Stage) {
        tracing::debug!(?from, ?to, "acrylic stage");
    }

    fn on_finish(&mut self, result: Result<&PixelBuffer, &AcrylicError>, elapsed: Duration) {
        let elapsed_ms = elapsed.as_millis() as u64;
        match result {
            Ok(out) => tracing::info!(
                elapsed_ms,
                width = out.width(),
                height = out.height(),
                "generate finished"
            ),
            Err(err) => tracing::warn!(elapsed_ms, error = %err, "generate failed"),
        }
    }
}

/// Settings that survived validation, borrowed from the configuration.
struct Plan<'c> {
    background: &'c PixelBuffer,
    scale_factor: f32,
    blur: BlurConfig,
    saturation: f32,
    tint: Option<ArgbColor>,
    noise: Option<&'c PixelBuffer>,
    alignment: LayerAlignment,
}

fn validate(config: &Configuration) -> AcrylicResult<Plan<'_>> {
    let params = config.params();
    let background = config
        .background()
        .ok_or_else(|| AcrylicError::missing_configuration("no background set"))?;
    let blur = params
        .blur
        .ok_or_else(|| AcrylicError::missing_configuration("no blur algorithm selected"))?;

    check_scale_factor(params.scale_factor)?;
    blur.validate()?;

    let noise = match config.noise() {
        Some(n) if n.is_empty() => {
            tracing::warn!(
                width = n.width(),
                height = n.height(),
                "noise texture unavailable; continuing without it"
            );
            None
        }
        other => other,
    };

    Ok(Plan {
        background,
        scale_factor: params.scale_factor,
        blur,
        saturation: params.saturation,
        tint: params.tint,
        noise,
        alignment: params.alignment,
    })
}

/// One generation: validate, scale, blur, saturate, composite.
///
/// Single-shot: [`Pipeline::run`] consumes it and yields either the final
/// raster or the first error. Nothing partial is ever returned.
pub struct Pipeline<'c, O = TracingObserver> {
    config: &'c Configuration,
    stage: Stage,
    observer: O,
}

impl<'c> Pipeline<'c> {
    pub fn new(config: &'c Configuration) -> Self {
        Self {
            config,
            stage: Stage::Configuring,
            observer: TracingObserver,
        }
    }
}

impl<'c, O: PipelineObserver> Pipeline<'c, O> {
    pub fn with_observer<P: PipelineObserver>(self, observer: P) -> Pipeline<'c, P> {
        Pipeline {
            config: self.config,
            stage: self.stage,
            observer,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn run(mut self) -> AcrylicResult<PixelBuffer> {
        let start = Instant::now();
        let result = self.execute();
        self.advance(if result.is_ok() {
            Stage::Done
        } else {
            Stage::Failed
        });
        self.observer.on_finish(result.as_ref(), start.elapsed());
        result
    }

    fn advance(&mut self, to: Stage) {
        let from = self.stage;
        self.stage = to;
        self.observer.on_transition(from, to);
    }

    fn execute(&mut self) -> AcrylicResult<PixelBuffer> {
        let config = self.config;

        self.advance(Stage::Validating);
        let plan = validate(config)?;

        self.advance(Stage::Scaling);
        let scaled = scale(plan.background, plan.scale_factor)?;

        self.advance(Stage::Blurring);
        let blurred = plan.blur.apply(&scaled)?;
        drop(scaled);

        self.advance(Stage::Saturating);
        let base = saturate(&blurred, plan.saturation);
        drop(blurred);

        self.advance(Stage::Compositing);
        let mut layers = Vec::with_capacity(3);
        layers.push(Layer::Raster(&base));
        if let Some(tint) = plan.tint {
            layers.push(Layer::Solid(tint.to_premul()));
        }
        if let Some(noise) = plan.noise {
            layers.push(Layer::Raster(noise));
        }
        composite(&layers, plan.alignment)
    }
}

/// Run one generation with the default [`TracingObserver`].
#[tracing::instrument(skip(config))]
pub fn generate(config: &Configuration) -> AcrylicResult<PixelBuffer> {
    Pipeline::new(config).run()
}

#[derive(Clone, Debug, Default)]
pub struct BatchOptions {
    /// Worker count; `None` lets rayon decide.
    pub threads: Option<usize>,
}

/// Run independent generations in parallel. Results keep the input order.
pub fn generate_batch(
    configs: &[Configuration],
    opts: &BatchOptions,
) -> AcrylicResult<Vec<AcrylicResult<PixelBuffer>>> {
    let pool = build_thread_pool(opts.threads)?;
    Ok(pool.install(|| configs.par_iter().map(generate).collect()))
}

fn build_thread_pool(threads: Option<usize>) -> AcrylicResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(AcrylicError::invalid_argument(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
#[path = "../../tests/unit/material/pipeline.rs"]
mod tests;
