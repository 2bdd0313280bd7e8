//! Game entity types and their constructors. No behaviour beyond data;
//! the update pipeline mutates the public fields directly.

use crate::consts::*;

// ── Categories ────────────────────────────────────────────────────────────────

/// Category tag shared by every simulated object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Player,
    SlowEnemy,
    FastEnemy,
    ExtraLife,
    WeaponBoost,
    Shot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyClass {
    Slow,
    Fast,
}

/// Per-enemy scoring data.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyStats {
    pub class: EnemyClass,
    /// Score awarded when a shot destroys this enemy.
    pub value: u32,
    /// Factor applied to speed and value on every level-up.
    pub level_multiplier: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CreatureKind {
    Enemy(EnemyStats),
    ExtraLife,
    WeaponBoost,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ── Creatures ─────────────────────────────────────────────────────────────────

/// A descending entity: enemy or power-up.
#[derive(Clone, Debug, PartialEq)]
pub struct Creature {
    pub kind: CreatureKind,
    pub pos: Position,
    /// Rows descended per tick.
    pub speed: f64,
}

/// `base * mult^(level-1)` for level ≥ 1.
fn level_factor(multiplier: f64, level: u32) -> f64 {
    multiplier.powi(level.saturating_sub(1) as i32)
}

impl Creature {
    fn enemy(
        class: EnemyClass,
        pos: Position,
        level: u32,
        base_speed: f64,
        base_value: u32,
        multiplier: f64,
    ) -> Self {
        let factor = level_factor(multiplier, level);
        Creature {
            kind: CreatureKind::Enemy(EnemyStats {
                class,
                value: (base_value as f64 * factor).round() as u32,
                level_multiplier: multiplier,
            }),
            pos,
            speed: base_speed * factor,
        }
    }

    pub fn slow_enemy(pos: Position, level: u32) -> Self {
        Self::enemy(
            EnemyClass::Slow,
            pos,
            level,
            SLOW_ENEMY_SPEED,
            SLOW_ENEMY_VALUE,
            SLOW_ENEMY_MULTIPLIER,
        )
    }

    pub fn fast_enemy(pos: Position, level: u32) -> Self {
        Self::enemy(
            EnemyClass::Fast,
            pos,
            level,
            FAST_ENEMY_SPEED,
            FAST_ENEMY_VALUE,
            FAST_ENEMY_MULTIPLIER,
        )
    }

    pub fn extra_life(pos: Position) -> Self {
        Creature {
            kind: CreatureKind::ExtraLife,
            pos,
            speed: POWER_UP_SPEED,
        }
    }

    pub fn weapon_boost(pos: Position) -> Self {
        Creature {
            kind: CreatureKind::WeaponBoost,
            pos,
            speed: POWER_UP_SPEED,
        }
    }

    pub fn category(&self) -> Category {
        match &self.kind {
            CreatureKind::Enemy(stats) => match stats.class {
                EnemyClass::Slow => Category::SlowEnemy,
                EnemyClass::Fast => Category::FastEnemy,
            },
            CreatureKind::ExtraLife => Category::ExtraLife,
            CreatureKind::WeaponBoost => Category::WeaponBoost,
        }
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, CreatureKind::Enemy(_))
    }

    /// Kill value, `None` for power-ups.
    pub fn value(&self) -> Option<u32> {
        match &self.kind {
            CreatureKind::Enemy(stats) => Some(stats.value),
            _ => None,
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Shot {
    pub pos: Position,
    /// Rows ascended per tick.
    pub speed: f64,
}

impl Shot {
    pub fn new(pos: Position) -> Self {
        Shot {
            pos,
            speed: SHOT_SPEED,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Position,
    /// Columns moved per move command.
    pub step: f64,
    pub life: i32,
    pub score: u64,
    /// Score at which the next promotion happens.
    pub next_level: u64,
    pub level: u32,
    /// Cleared by the alive check once `life < 1`.
    pub is_alive: bool,
}

impl Player {
    pub fn new(pos: Position, step: f64) -> Self {
        Player {
            pos,
            step,
            life: PLAYER_START_LIFE,
            score: 0,
            next_level: FIRST_LEVEL_THRESHOLD,
            level: 1,
            is_alive: true,
        }
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// One logical command per input poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Fire,
    /// Forfeit the run and go straight to the end-of-run sequence.
    Quit,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Play-field extents in screen-space rows/columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
    pub ceiling: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            width: WIDTH,
            height: HEIGHT,
            ceiling: CEILING,
        }
    }
}

/// Everything the update pipeline reads and writes. Owned by the game loop.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub creatures: Vec<Creature>,
    pub shots: Vec<Shot>,
    pub status: GameStatus,
    pub bounds: Bounds,
    /// Render ticks left to show the level-up banner.
    pub level_up_timer: u32,
    /// Value `level_up_timer` is reset to on promotion.
    pub level_up_banner_frames: u32,
    /// Simulation ticks since the run started.
    pub tick: u64,
    /// Frames rendered during the last full second.
    pub fps: u32,
    /// Updates run during the last full second.
    pub ups: u32,
}

impl GameState {
    /// Fresh run: player centred on the bottom row, no creatures or shots.
    pub fn new(bounds: Bounds) -> Self {
        GameState {
            player: Player::new(Position::new(bounds.width / 2.0, bounds.height), PLAYER_STEP),
            creatures: Vec::new(),
            shots: Vec::new(),
            status: GameStatus::Running,
            bounds,
            level_up_timer: 0,
            level_up_banner_frames: LEVEL_UP_BANNER_FRAMES,
            tick: 0,
            fps: 0,
            ups: 0,
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: &self.player,
            creatures: &self.creatures,
            shots: &self.shots,
            bounds: self.bounds,
            fps: self.fps,
            ups: self.ups,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Bounds::default())
    }
}

/// Read-only view handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub player: &'a Player,
    pub creatures: &'a [Creature],
    pub shots: &'a [Shot],
    pub bounds: Bounds,
    pub fps: u32,
    pub ups: u32,
}

impl Snapshot<'_> {
    pub fn level(&self) -> u32 {
        self.player.level
    }

    pub fn score(&self) -> u64 {
        self.player.score
    }
}
