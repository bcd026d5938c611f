//! Simulation constants and tuning parameters.
//!
//! Pixel offsets are tuned against a 32px tile and are not expected to
//! scale with `TILE_SIZE`.

/// Edge length of one tile in pixels.
pub const TILE_SIZE: f64 = 32.0;

/// Milliseconds per simulation tick (one display refresh at 60Hz).
pub const TICK_MS: f64 = 1000.0 / 60.0;

/// Downward acceleration applied to every gravity-driven actor (px/tick²).
pub const GRAVITY: f64 = 0.3;

// --- Sensor geometry ---

/// How far a half-height tile's hit is raised for upward casts.
pub const HALF_BLOCK_RAISE: f64 = 14.0;

/// Horizontal casts ignore a half-height tile once the origin sits this
/// far below the tile's top edge.
pub const HALF_BLOCK_MAX_PENETRATION: f64 = 18.0 / 32.0 * TILE_SIZE;

/// Default reach of a vertical or horizontal probe.
pub const SENSOR_LENGTH: f64 = 256.0;

// --- Spatial index ---

/// Boxes held per quadtree node before it subdivides.
pub const QUADTREE_BUCKET_CAPACITY: usize = 16;

/// Quadtree nodes narrower than this never subdivide.
pub const QUADTREE_MIN_NODE_SIZE: f64 = 1.0;

/// Height of the indexed strip for a half-height tile.
pub const HALF_BLOCK_HEIGHT: f64 = 17.0;

// --- Player ---

pub const PLAYER_WIDTH: f64 = 32.0;
pub const PLAYER_HEIGHT: f64 = 46.0;

/// X offsets of the two vertical probes, measured from the player's left edge.
pub const PLAYER_SENSOR_LEFT: f64 = 6.0;
pub const PLAYER_SENSOR_RIGHT: f64 = 23.0;

/// Maximum horizontal speed on normal ground (px/tick).
pub const PLAYER_SPEED: f64 = 3.5;

/// Maximum horizontal speed on slippery ground (px/tick).
pub const PLAYER_SPEED_SLIPPERY: f64 = 7.0;

/// Horizontal velocity gained per tick while a direction is held.
pub const PLAYER_ACCELERATION: f64 = 1.0;

/// Initial vertical speed of a jump.
pub const JUMP_SPEED: f64 = 7.0;

/// Vertical speed granted by the one-off super jump boost.
pub const SUPER_JUMP_SPEED: f64 = 10.0;

/// Vertical speed while flying.
pub const FLY_SPEED: f64 = PLAYER_SPEED * 0.5;

pub const FRICTION_DEFAULT: f64 = 0.8;
pub const FRICTION_CROUCH: f64 = 0.7;
pub const FRICTION_SLIPPERY: f64 = 0.999;

/// Slope acceleration on slippery ramps (px/tick²).
pub const SLOPE_ACCELERATION: f64 = 0.25;

/// Slope acceleration stops once speed reaches this fraction of max speed.
pub const SLOPE_SPEED_FRACTION: f64 = 0.5;

/// Minimum time between two gravity flips (ms).
pub const GRAVITY_FLIP_DEBOUNCE_MS: f64 = 200.0;

/// Vertical probes start this far inside the actor's bounds.
pub const PROBE_INSET: f64 = 10.0;

/// Ground is snapped to when the nearest hit is closer than this.
pub const GROUND_SNAP: f64 = 10.0;

/// Ceiling is snapped to when the nearest hit is closer than this.
pub const CEILING_SNAP: f64 = 4.0;

/// Overlap allowed with a ceiling after snapping.
pub const CEILING_OVERLAP: f64 = 6.0;

/// The player sinks and drowns once the water surface is this far above the probe.
pub const WATER_DROWN_DEPTH: f64 = -8.0;

/// Minimum horizontal speed to stay on top of water.
pub const WATER_WALK_MIN_SPEED: f64 = 0.1;

/// Horizontal probes start this far inside the player's side edges.
pub const WALL_PROBE_INSET: f64 = 10.0;

/// Horizontal probes run this far above the player's feet.
pub const WALL_PROBE_RISE: f64 = 20.0;

/// Walls are snapped to when the nearest hit is closer than this.
pub const WALL_SNAP: f64 = 10.0;

/// Sprite code subtracted from the top row tile to get the permitted action.
pub const PERMISSION_TILE_BASE: u32 = 0x0900;

// --- Other actors ---

pub const ACTOR_SIZE: f64 = 32.0;

pub const SNAIL_WIDTH: f64 = 24.0;
pub const SNAIL_HEIGHT: f64 = 18.0;

/// Small actors sink this far into water before resting.
pub const ACTOR_WATER_SINK: f64 = 24.0;

/// Rocks sink this far into water before resting.
pub const ROCK_WATER_SINK: f64 = 18.0;

/// Height of the contact strip used for push and teleport checks.
pub const CONTACT_STRIP_HEIGHT: f64 = 16.0;

pub const HUNT_LERP_X: f64 = 0.2;
pub const HUNT_LERP_Y: f64 = 0.3;

/// Per-tick easing of a dead enemy's rotation toward π.
pub const DYING_ROTATION_LERP: f64 = 0.025;

/// Rock collider insets (left/right, top) while in rock mode.
pub const ROCK_COLLIDER_INSET_X: f64 = 5.0;
pub const ROCK_COLLIDER_INSET_TOP: f64 = 14.0;

pub const HITSWITCH_COLLIDER_INSET: f64 = 4.0;

/// A frog only yields to pushes shallower than this.
pub const FROG_MAX_PUSH: f64 = 5.0;

/// Default worm rear-up limit (px).
pub const WORM_DEFAULT_MAX_HEIGHT: f64 = 7.0 * TILE_SIZE;

pub const WORM_REAR_LERP: f64 = 0.4;
pub const WORM_SETTLE_LERP: f64 = 0.1;

// --- Sprite codes ---

pub const SPRITE_EMPTY: u32 = 0x0000;
pub const SPRITE_PLAYER: u32 = 0x0002;
pub const SPRITE_QUICKSAND: u32 = 0x0115;
pub const SPRITE_PETRIFIED_SAND: u32 = 0x0116;
pub const SPRITE_EXIT: u32 = 0x0505;

pub const SPRITE_ENEMY_FLY: u32 = 0x0A00;
pub const SPRITE_ENEMY_BEE: u32 = 0x0A03;
pub const SPRITE_ENEMY_BAT: u32 = 0x0A06;
pub const SPRITE_ENEMY_LADYBUG: u32 = 0x0A0A;

/// Inclusive range of enemy sprite codes.
pub const ENEMY_SPRITE_MIN: u32 = 0x0A00;
pub const ENEMY_SPRITE_MAX: u32 = 0x0B00;

/// Slippery sprite ranges (snow, planet).
pub const SLIPPERY_RANGES: [(u32, u32); 2] = [(0x0120, 0x012F), (0x0130, 0x013F)];

/// Sprites a switch cycles through.
pub const SWITCH_STATES: [u32; 4] = [0x0704, 0x0705, 0x0706, 0x0705];

// --- Level documents ---

pub const LEVEL_VERSION: u32 = 2;

/// Upgraded players are raised so their 46px body stands on the tile below.
pub const UPGRADE_PLAYER_RAISE: f64 = 12.0;

/// Spawn point of the player added to upgraded levels that have none.
pub const DEFAULT_PLAYER_SPAWN: (f64, f64) = (TILE_SIZE, 4.0 * TILE_SIZE);

pub const DEFAULT_PLAYER_NAME: &str = "player_1";
