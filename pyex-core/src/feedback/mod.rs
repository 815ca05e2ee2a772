//! Human feedback capture.
//!
//! Feedback is attached to a model invocation through its run id. Runs are
//! logged by the [`tracer::RunTracer`] as they complete; the
//! [`sink::FeedbackSink`] later records a comment, score and correction
//! against one of them. Both talk to a LangSmith-compatible backend.

pub mod langsmith;
pub mod sink;
pub mod tracer;

pub use langsmith::LangSmithClient;
pub use sink::{
    FeedbackAck, FeedbackBackend, FeedbackEntry, FeedbackSink, clamp_score, correction_payload,
    validate_run_id,
};
pub use tracer::{RunRecord, RunTracer};
