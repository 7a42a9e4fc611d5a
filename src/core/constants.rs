// Board
pub const BOARD_WIDTH: f64 = 360.0;
pub const BOARD_HEIGHT: f64 = 640.0;

// Bird (sprite ratio 408/228 ≈ 17/12)
pub const BIRD_WIDTH: f64 = 60.0;
pub const BIRD_HEIGHT: f64 = 48.0;
pub const BIRD_START_X: f64 = BOARD_WIDTH / 8.0;
pub const BIRD_START_Y: f64 = BOARD_HEIGHT / 2.0;

// Pipes (sprite ratio 384/3072 = 1/8)
pub const PIPE_WIDTH: f64 = 64.0;
pub const PIPE_HEIGHT: f64 = 512.0;
pub const PIPE_SPAWN_X: f64 = BOARD_WIDTH;
pub const PIPE_BASE_Y: f64 = 0.0;
/// Vertical opening between the top and bottom pipe of a pair.
pub const PIPE_GAP: f64 = BOARD_HEIGHT / 4.0;

// Physics (per frame, not time-scaled)
pub const PIPE_VELOCITY_X: f64 = -2.0;
pub const GRAVITY: f64 = 0.4;
pub const JUMP_VELOCITY: f64 = -6.0;

// Timing
pub const JUMP_COOLDOWN_MS: u64 = 100;
pub const PIPE_SPAWN_INTERVAL_MS: u64 = 1600;
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
pub const BIRD_FRAME_INTERVAL_MS: u64 = 100;
pub const BIRD_FRAME_COUNT: usize = 3;

// Jump key codes
pub const JUMP_KEY_CODES: [&str; 3] = ["Space", "ArrowUp", "KeyX"];
