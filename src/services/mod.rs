pub mod chess_rules;
pub mod clock;
pub mod engine;
pub mod matchmaker;
pub mod rating;
pub mod session_router;
pub mod timers;
pub mod worker_pool;
