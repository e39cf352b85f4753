mod common;

mod disconnect_timeout;
mod draw_flow;
mod first_move_timeout;
mod fools_mate;
mod idempotence;
mod matchmaking;
mod time_forfeit;
