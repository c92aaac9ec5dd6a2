mod analyze;
mod dispatch;
mod export;
mod score;

pub use dispatch::dispatch;
