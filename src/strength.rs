use crate::error::Error;

/// Ratings at or above this are played by the engine's own strength
/// limiter; everything below goes through [`crate::policy`].
pub const LIMITER_THRESHOLD: u32 = 1350;

pub const MIN_RATING: u32 = 200;
pub const MAX_RATING: u32 = 3200;
pub const DEFAULT_RATING: u32 = 1500;

/// A validated target rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u32);

impl Rating {
    pub fn new(rating: i64) -> Result<Self, Error> {
        if (i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&rating) {
            Ok(Self(rating as u32))
        } else {
            Err(Error::RatingOutOfRange {
                rating,
                min: MIN_RATING,
                max: MAX_RATING,
            })
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn band(self) -> Band {
        Band::of(self.0)
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(DEFAULT_RATING)
    }
}

/// Contiguous rating range with one move selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Below 600: random moves with a growing taste for captures and checks.
    Novice,
    /// 600 to 999: shallow engine search, frequent blunders.
    Beginner,
    /// 1000 to 1349: shallow engine search, occasional blunders.
    Intermediate,
    /// 1350 and up: the engine's native `UCI_Elo` limiter.
    Limited,
}

impl Band {
    pub fn of(rating: u32) -> Self {
        match rating {
            ..600 => Band::Novice,
            600..1000 => Band::Beginner,
            1000..LIMITER_THRESHOLD => Band::Intermediate,
            _ => Band::Limited,
        }
    }
}

/// Search depth and blunder rate for the shallow-search bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchProfile {
    pub depth: u32,
    pub blunder_probability: f64,
}

impl SearchProfile {
    pub fn for_rating(rating: u32) -> Self {
        let (depth, blunder_probability) = if rating < 700 {
            (1, 0.5)
        } else if rating < 1000 {
            (2, 0.3)
        } else {
            (3, 0.1)
        };
        Self {
            depth,
            blunder_probability,
        }
    }
}

/// How often a novice looks for captures and checks: 0.0 at 200, rising
/// linearly to 0.5 at 600.
pub fn heuristic_probability(rating: u32) -> f64 {
    ((f64::from(rating) - 200.0) / 800.0).clamp(0.0, 0.5)
}

/// Value for `UCI_Elo`, kept within what the engine advertises. Without an
/// advertised minimum the limiter threshold is used as the floor.
pub fn limiter_elo(rating: Rating, min: Option<i64>, max: Option<i64>) -> i64 {
    let floor = min.unwrap_or(i64::from(LIMITER_THRESHOLD));
    let elo = i64::from(rating.get()).max(floor);
    match max {
        Some(max) if max >= floor => elo.min(max),
        _ => elo,
    }
}
