/// One stream of the game's multiplicative random series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RandomSeries {
    seed: u32,
}

impl RandomSeries {
    fn next(&mut self, range: u32) -> u32 {
        if range == 0 {
            return 0;
        }
        let i = self.seed.wrapping_mul(9377).wrapping_add(9439);
        self.seed = i.rotate_right(13);
        self.seed % range
    }
}

/// Dual-stream RNG matching the game's `LbRandomSeries` generator.
///
/// The game keeps two independent series:
/// - **Action**: synchronised between network players; drives everything
///   that changes game state, including `RANDOM(min,max)` in level scripts
/// - **Unsync**: local only, for cosmetic choices that must not desync
///   network games
#[derive(Debug, Clone)]
pub struct KeeperRng {
    action: RandomSeries,
    unsync: RandomSeries,
}

impl KeeperRng {
    /// Create a new dual-stream RNG with both series seeded by `seed`.
    pub fn new(seed: u32) -> Self {
        Self::new_dual(seed, seed)
    }

    /// Create with separate seeds for the action and unsync series.
    pub fn new_dual(action_seed: u32, unsync_seed: u32) -> Self {
        Self {
            action: RandomSeries { seed: action_seed },
            unsync: RandomSeries { seed: unsync_seed },
        }
    }

    /// Current seed of the action series, for saving and replays.
    pub fn action_seed(&self) -> u32 {
        self.action.seed
    }

    /// `0 <= random(x) < x` on the action series. `random(0)` is 0 but still
    /// leaves the series untouched.
    pub fn random(&mut self, range: u32) -> u32 {
        self.action.next(range)
    }

    /// `0 <= unsync_random(x) < x` on the unsync series.
    pub fn unsync_random(&mut self, range: u32) -> u32 {
        self.unsync.next(range)
    }

    /// `min <= range_inclusive(min, max) <= max` on the action series.
    pub fn range_inclusive(&mut self, min: i64, max: i64) -> i64 {
        if max < min {
            log::warn!("range_inclusive({min},{max}) attempted");
            return min;
        }
        let span = max.checked_sub(min).and_then(|d| d.checked_add(1));
        match span.and_then(|span| u32::try_from(span).ok()) {
            Some(span) => min + self.random(span) as i64,
            None => {
                log::warn!("range_inclusive({min},{max}) span too wide");
                min + self.random(u32::MAX) as i64
            }
        }
    }
}
