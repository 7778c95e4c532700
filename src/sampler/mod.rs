//! Sampling controller: runs one cancellable, time-boxed polling session in
//! the background and publishes its status.
//!
//! Control flow: [`SamplingController::start`] spawns the session task, which
//! calls the [`ReadingSource`](crate::model::ReadingSource) once per tick,
//! sleeps for the plan's interval and checks for cancellation before every
//! fetch. When the loop ends the task publishes exactly one terminal
//! snapshot: `Stopped` if cancelled, `Done` with the mean of the readings,
//! or `Failed` if no tick produced one.

mod cancel;
mod controller;
mod plan;
mod session;

pub use controller::SamplingController;
pub use plan::SamplingPlan;
