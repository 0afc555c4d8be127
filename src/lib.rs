//! studio-fx: two small interactive effects for a studio website, modeled headlessly.
//!
//! - A pointer-reactive line ([`LineAnimator`]) whose horizontal offset follows the pointer
//!   through a damped spring, drawn either as a straight column or as a sine wave.
//! - An adaptive contrast sampler ([`ContrastSampler`]) that picks a black or white foreground
//!   from the background under a fixed viewport point, recomputing at most once per frame
//!   while the page scrolls.
//!
//! The browser host is replaced by three narrow seams: a [`DrawSurface`] to stroke into, a
//! [`FrameScheduler`] for "next display refresh" callbacks, and a [`BackgroundStack`] query.
//! [`Stage`] wires them together for a single-threaded host loop.
#![forbid(unsafe_code)]

mod config;
mod contrast;
mod foundation;
mod motion;
mod page;
mod render;
mod schedule;
mod session;

pub use crate::config::EffectConfig;
pub use crate::contrast::foreground::{Foreground, LIGHT_THRESHOLD, pick_foreground, yiq_luma};
pub use crate::contrast::sampler::{
    BackgroundStack, ContrastSampler, SampleOutcome, SamplerConfig,
};
pub use crate::foundation::color::{Hsl, Rgba8};
pub use crate::foundation::core::{BezPath, FrameIndex, Point, SurfaceSize, Viewport};
pub use crate::foundation::error::{FxError, FxResult};
pub use crate::motion::animator::{
    ColumnConfig, LineAnimator, LineEffect, OFFSCREEN_POINTER, WaveConfig,
};
pub use crate::motion::hover::HoverParams;
pub use crate::motion::spring::{Spring, SpringParams};
pub use crate::page::model::{Page, Section};
pub use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};
pub use crate::render::line::{WaveShape, column_path};
pub use crate::render::surface::{
    DrawCall, DrawSurface, FrameRGBA, LINE_COLOR, RecordingSurface, StrokeStyle,
};
pub use crate::schedule::frame::{
    FrameClock, FrameRequest, FrameScheduler, FrameTick, ManualScheduler,
};
pub use crate::schedule::interval::IntervalScheduler;
pub use crate::session::sink::{FrameSink, InMemorySink, PngSequenceSink};
pub use crate::session::stage::{HostEvent, Stage, StepReport};
